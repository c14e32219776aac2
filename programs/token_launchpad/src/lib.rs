//! # Token Launchpad
//!
//! Launch a fixed-supply token and sell it through a staircase bonding
//! curve until its funding target is reached.
//!
//! ## Overview
//!
//! - Anyone pays the factory's creation fee to launch a token. The whole
//!   supply is minted to the factory and the mint authority is revoked.
//! - Buyers purchase whole tokens at the curve price for the amount
//!   already sold, paying exactly the quoted lamports.
//! - A sale closes on the buy that sells it out or reaches its target.
//! - The creator then deposits: leftover tokens and every raised lamport
//!   go to the creator, once.
//! - Creation fees accumulate in a separate pool only the factory owner
//!   can withdraw.
//!
//! ## How it works
//! - `curve` prices a purchase from the sale's pre-trade position.
//! - `state` validates and commits each transition in memory.
//! - `instructions` move tokens and lamports after the state is committed.
//!

use anchor_lang::prelude::*;

pub mod constants;
pub mod curve;
pub mod errors;
pub mod instructions;
pub mod state;

pub use curve::*;
pub use instructions::*;
pub use state::{Sale, SaleParams, SaleStatus};

declare_id!("CjfbVQfy3Zam6SapAUmbQarFz1mawG435t6DbTTspHqm");

/// Main Token Launchpad program
#[program]
pub mod token_launchpad {
    use super::*;

    /// Create the factory; the caller becomes its owner
    pub fn initialize(
        ctx: Context<Initialize>,
        fee_amount: u64,
        params: SaleParams,
    ) -> Result<()> {
        ctx.accounts.initialize(fee_amount, params, &ctx.bumps)
    }

    /// Launch a token and open its sale, paying exactly the creation fee
    pub fn create_token(
        ctx: Context<CreateToken>,
        name: String,
        symbol: String,
        payment: u64,
    ) -> Result<Pubkey> {
        ctx.accounts.create_token(name, symbol, payment, &ctx.bumps)
    }

    /// Buy `amount` base units, paying exactly the quoted lamports
    pub fn buy(ctx: Context<Buy>, amount: u64, payment: u64) -> Result<u64> {
        ctx.accounts.buy(amount, payment)
    }

    /// Pay out a closed sale to its creator
    pub fn deposit(ctx: Context<Deposit>) -> Result<()> {
        ctx.accounts.deposit()
    }

    /// Withdraw creation fees (owner only)
    pub fn withdraw_fee(ctx: Context<WithdrawFee>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw_fee(amount)
    }

    /// Lamports charged per launch
    pub fn fee(ctx: Context<FactoryView>) -> Result<u64> {
        Ok(ctx.accounts.factory.fee_amount)
    }

    /// Factory owner
    pub fn owner(ctx: Context<FactoryView>) -> Result<Pubkey> {
        Ok(ctx.accounts.factory.owner)
    }

    /// Number of tokens launched
    pub fn total_tokens(ctx: Context<FactoryView>) -> Result<u64> {
        Ok(ctx.accounts.factory.total_tokens)
    }

    /// Per-token price after `sold` base units have been sold
    pub fn get_cost(ctx: Context<FactoryView>, sold: u64) -> Result<u64> {
        ctx.accounts.factory.params.curve.get_cost(sold)
    }

    /// Sale record by registry index
    pub fn get_token_sale(ctx: Context<TokenSaleByIndex>, index: u64) -> Result<Sale> {
        ctx.accounts.get_token_sale(index)
    }

    /// Sale record by token handle
    pub fn sale_of(ctx: Context<SaleByToken>) -> Result<Sale> {
        ctx.accounts.sale_of()
    }
}
