//! Token Sale State
//!
//! Each launched token has exactly one sale, created alongside its mint.
//!
//! ## Lifecycle
//!
//! ```text
//!   create_token        buy (threshold hit)        deposit (creator)
//!  ─────────────▶ Open ────────────────────▶ Closed ─────────────────▶ Finalized
//!                  │ ▲
//!                  └─┘ buy
//! ```
//!
//! The methods here validate and commit a transition in memory. The
//! instruction handlers move tokens and lamports only after they return.

use anchor_lang::prelude::*;

use crate::constants::{MAX_NAME_LEN, MAX_SYMBOL_LEN, SALE_SEED};
use crate::errors::LaunchpadError;
use crate::state::SaleParams;

/// Sale account for one launched token
///
/// Seeds: ["sale", mint]
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Sale {
    /// Position in the factory's registry
    pub index: u64,

    /// Token handle (the mint)
    pub mint: Pubkey,

    #[max_len(32)]
    pub name: String,

    #[max_len(10)]
    pub symbol: String,

    /// Launcher; receives leftovers and raised funds on deposit
    pub creator: Pubkey,

    /// Base units minted for this token
    pub total_supply: u64,

    /// Base units sold so far
    pub sold: u64,

    /// Lamports paid by accepted buys
    pub raised: u64,

    /// Raised lamports at which the sale closes
    pub target: u64,

    pub status: SaleStatus,

    /// PDA bump seed
    pub bump: u8,
}

impl Sale {
    pub const SEED: &'static [u8] = SALE_SEED;

    pub fn open(
        index: u64,
        mint: Pubkey,
        name: String,
        symbol: String,
        creator: Pubkey,
        params: &SaleParams,
        bump: u8,
    ) -> Self {
        Self {
            index,
            mint,
            name,
            symbol,
            creator,
            total_supply: params.total_supply,
            sold: 0,
            raised: 0,
            target: params.target,
            status: SaleStatus::Open,
            bump,
        }
    }

    /// Base units still held by the factory for this sale
    pub fn remaining(&self) -> u64 {
        self.total_supply.saturating_sub(self.sold)
    }

    pub fn is_open(&self) -> bool {
        self.status == SaleStatus::Open
    }

    fn reached_threshold(&self) -> bool {
        self.sold >= self.total_supply || self.raised >= self.target
    }

    /// Validates a purchase and commits it to the sale.
    ///
    /// All checks run before any field is written:
    /// 1. the sale must be open
    /// 2. `amount` must fit the per-call bounds; buying exactly what is
    ///    left is allowed below the minimum
    /// 3. `payment` must equal the pre-trade quote exactly
    /// 4. `amount` must not exceed what is left
    ///
    /// Closes the sale when supply or target is reached.
    pub fn apply_buy(
        &mut self,
        params: &SaleParams,
        amount: u64,
        payment: u64,
    ) -> Result<BuyReceipt> {
        require!(self.is_open(), LaunchpadError::SaleClosed);
        params.check_purchase(amount, self.remaining())?;

        let price = params.curve.get_cost(self.sold)?;
        let cost = params.curve.quote(self.sold, amount)?;
        require!(payment == cost, LaunchpadError::PaymentMismatch);
        require!(amount <= self.remaining(), LaunchpadError::ExceedsAvailable);

        let sold = self
            .sold
            .checked_add(amount)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;
        let raised = self
            .raised
            .checked_add(payment)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;

        self.sold = sold;
        self.raised = raised;

        let closed = self.reached_threshold();
        if closed {
            self.status = SaleStatus::Closed;
        }

        Ok(BuyReceipt { price, cost, closed })
    }

    /// Moves a closed sale to its terminal state and reports what the
    /// creator is owed.
    pub fn finalize(&mut self, caller: Pubkey) -> Result<Settlement> {
        require_keys_eq!(caller, self.creator, LaunchpadError::Unauthorized);
        match self.status {
            SaleStatus::Open => return err!(LaunchpadError::SaleStillOpen),
            SaleStatus::Finalized => return err!(LaunchpadError::AlreadyFinalized),
            SaleStatus::Closed => {}
        }

        self.status = SaleStatus::Finalized;

        Ok(Settlement {
            tokens: self.remaining(),
            lamports: self.raised,
        })
    }
}

/// Sale lifecycle status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum SaleStatus {
    /// Accepting buys
    #[default]
    Open,
    /// Supply sold out or target reached; waiting for the creator
    Closed,
    /// Leftover tokens and raised funds paid out to the creator
    Finalized,
}

/// Outcome of an accepted buy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyReceipt {
    /// Pre-trade price in lamports per whole token
    pub price: u64,
    /// Lamports charged for the whole amount
    pub cost: u64,
    /// Whether this buy closed the sale
    pub closed: bool,
}

/// What a finalized sale pays its creator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Base units moved from the factory vault
    pub tokens: u64,
    /// Lamports moved from the sale account
    pub lamports: u64,
}

/// Name and symbol must be non-empty and fit the metadata limits.
pub fn validate_metadata(name: &str, symbol: &str) -> Result<()> {
    require!(
        !name.trim().is_empty() && name.len() <= MAX_NAME_LEN,
        LaunchpadError::InvalidName
    );
    require!(
        !symbol.trim().is_empty() && symbol.len() <= MAX_SYMBOL_LEN,
        LaunchpadError::InvalidSymbol
    );
    Ok(())
}
