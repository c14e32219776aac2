//! Factory (Registry) State
//!
//! The singleton account that launches tokens, holds the creation-fee pool
//! and carries the sale parameters shared by every launch.

use anchor_lang::prelude::*;

use crate::constants::{
    DEFAULT_MAX_BUY, DEFAULT_MIN_BUY, DEFAULT_TARGET, DEFAULT_TOTAL_SUPPLY, FACTORY_SEED,
    TOKEN_UNIT,
};
use crate::curve::StaircaseCurve;
use crate::errors::LaunchpadError;

/// Parameters copied into every sale the factory launches
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub struct SaleParams {
    /// Base units minted per launched token
    pub total_supply: u64,
    /// Raised lamports at which a sale closes
    pub target: u64,
    /// Price schedule
    pub curve: StaircaseCurve,
    /// Smallest purchase per call, in base units
    pub min_buy: u64,
    /// Largest purchase per call, in base units
    pub max_buy: u64,
}

impl Default for SaleParams {
    fn default() -> Self {
        Self {
            total_supply: DEFAULT_TOTAL_SUPPLY,
            target: DEFAULT_TARGET,
            curve: StaircaseCurve::DEFAULT,
            min_buy: DEFAULT_MIN_BUY,
            max_buy: DEFAULT_MAX_BUY,
        }
    }
}

impl SaleParams {
    pub fn validate(&self) -> Result<()> {
        self.curve.validate()?;
        require!(self.total_supply > 0, LaunchpadError::InvalidParams);
        require!(self.total_supply % TOKEN_UNIT == 0, LaunchpadError::InvalidParams);
        require!(self.target > 0, LaunchpadError::InvalidParams);
        require!(self.min_buy > 0, LaunchpadError::InvalidParams);
        require!(self.min_buy <= self.max_buy, LaunchpadError::InvalidParams);
        require!(self.min_buy % TOKEN_UNIT == 0, LaunchpadError::InvalidParams);
        require!(self.max_buy % TOKEN_UNIT == 0, LaunchpadError::InvalidParams);
        require!(self.min_buy <= self.total_supply, LaunchpadError::InvalidParams);
        Ok(())
    }

    /// Shape checks on a purchase amount against a sale with `remaining`
    /// base units left.
    ///
    /// A buy of exactly `remaining` is exempt from `min_buy`, so a sale
    /// whose tail is smaller than the minimum can still sell out.
    pub fn check_purchase(&self, amount: u64, remaining: u64) -> Result<()> {
        require!(amount > 0, LaunchpadError::InvalidAmount);
        require!(amount % TOKEN_UNIT == 0, LaunchpadError::FractionalAmount);
        require!(
            amount >= self.min_buy || amount == remaining,
            LaunchpadError::BelowMinimumBuy
        );
        require!(amount <= self.max_buy, LaunchpadError::AboveMaximumBuy);
        Ok(())
    }
}

/// Global factory account (singleton PDA)
///
/// Seeds: ["factory"]
///
/// The fee pool's lamports sit on this account. Raised funds never do:
/// they sit on each sale's own account.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Factory {
    /// Platform operator, the only identity allowed to withdraw fees
    pub owner: Pubkey,

    /// Exact lamports charged to launch a token
    pub fee_amount: u64,

    /// Creation fees collected and not yet withdrawn
    pub fee_balance: u64,

    /// Tokens launched so far; the next launch gets this index
    pub total_tokens: u64,

    /// Parameters for every sale, fixed at initialization
    pub params: SaleParams,

    /// PDA bump seed
    pub bump: u8,
}

impl Factory {
    pub const SEED: &'static [u8] = FACTORY_SEED;

    pub fn new(owner: Pubkey, fee_amount: u64, params: SaleParams, bump: u8) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            owner,
            fee_amount,
            fee_balance: 0,
            total_tokens: 0,
            params,
            bump,
        })
    }

    /// Accepts a launch fee and reserves the next registry index.
    ///
    /// Nothing changes unless `payment` matches the fee exactly.
    pub fn record_creation(&mut self, payment: u64) -> Result<u64> {
        require!(payment == self.fee_amount, LaunchpadError::PaymentMismatch);

        let index = self.total_tokens;
        let total_tokens = index
            .checked_add(1)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;
        let fee_balance = self
            .fee_balance
            .checked_add(payment)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;

        self.total_tokens = total_tokens;
        self.fee_balance = fee_balance;
        Ok(index)
    }

    /// Fails `NotFound` unless `index` was issued by a launch.
    pub fn check_index(&self, index: u64) -> Result<()> {
        require!(index < self.total_tokens, LaunchpadError::NotFound);
        Ok(())
    }

    /// Removes `amount` from the fee pool on behalf of `caller`.
    pub fn debit_fee(&mut self, caller: Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(caller, self.owner, LaunchpadError::Unauthorized);
        require!(amount > 0, LaunchpadError::InvalidAmount);
        require!(amount <= self.fee_balance, LaunchpadError::InsufficientBalance);

        self.fee_balance -= amount;
        Ok(())
    }
}
