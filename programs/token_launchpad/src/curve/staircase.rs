//! # Staircase Bonding Curve
//!
//! ## The Pricing Rule
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │   price = base_price + ⌊sold / band_width⌋ × increment       │
//! │                                                              │
//! │   Where:                                                     │
//! │   • price      = lamports per whole token                    │
//! │   • sold       = base units already sold by the sale         │
//! │   • band_width = base units per price band                   │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quoting a Purchase
//!
//! A purchase is priced once, from the pre-trade `sold`, at a single flat
//! rate for the whole amount, even when the amount reaches into the next
//! band:
//!
//! ```text
//! required = get_cost(sold) × amount / TOKEN_UNIT
//! ```
//!
//! `amount` must be a whole number of tokens, so the division is exact.
//! Intermediate products are computed in `u128`.

use anchor_lang::prelude::*;

use crate::constants::{
    DEFAULT_BAND_WIDTH, DEFAULT_BASE_PRICE, DEFAULT_PRICE_INCREMENT, TOKEN_UNIT,
};
use crate::errors::LaunchpadError;

/// Piecewise-constant price schedule
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub struct StaircaseCurve {
    /// Price of band 0, in lamports per whole token
    pub base_price: u64,
    /// Price added at every band boundary, in lamports per whole token
    pub increment: u64,
    /// Base units sold per band
    pub band_width: u64,
}

impl Default for StaircaseCurve {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl StaircaseCurve {
    /// 10,000 tokens cost 1 SOL at launch; the price doubles after
    /// 10,000 tokens have been sold.
    pub const DEFAULT: StaircaseCurve = StaircaseCurve {
        base_price: DEFAULT_BASE_PRICE,
        increment: DEFAULT_PRICE_INCREMENT,
        band_width: DEFAULT_BAND_WIDTH,
    };

    pub fn validate(&self) -> Result<()> {
        require!(self.base_price > 0, LaunchpadError::InvalidParams);
        require!(self.band_width > 0, LaunchpadError::InvalidParams);
        Ok(())
    }

    /// Index of the band `sold` falls in
    pub fn band_of(&self, sold: u64) -> Result<u64> {
        sold.checked_div(self.band_width)
            .ok_or_else(|| error!(LaunchpadError::InvalidParams))
    }

    /// Per-token price after `sold` base units have been sold
    ///
    /// # Example
    /// ```ignore
    /// let curve = StaircaseCurve::DEFAULT;
    /// assert_eq!(curve.get_cost(0)?, 100_000);
    /// assert_eq!(curve.get_cost(10_000 * TOKEN_UNIT)?, 200_000);
    /// ```
    pub fn get_cost(&self, sold: u64) -> Result<u64> {
        let band = self.band_of(sold)?;
        band.checked_mul(self.increment)
            .and_then(|step| step.checked_add(self.base_price))
            .ok_or_else(|| error!(LaunchpadError::ArithmeticOverflow))
    }

    /// Lamports required to buy `amount` base units at the pre-trade
    /// position `sold`
    pub fn quote(&self, sold: u64, amount: u64) -> Result<u64> {
        require!(amount > 0, LaunchpadError::InvalidAmount);
        require!(amount % TOKEN_UNIT == 0, LaunchpadError::FractionalAmount);

        let price = self.get_cost(sold)? as u128;
        let whole_tokens = (amount / TOKEN_UNIT) as u128;
        let required = price
            .checked_mul(whole_tokens)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;

        u64::try_from(required).map_err(|_| error!(LaunchpadError::ArithmeticOverflow))
    }
}

// ============================================================================
// TESTS
// ============================================================================
