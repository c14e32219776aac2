//! # Pricing Curve Module
//!
//! Prices every launched token with a **staircase bonding curve**: the
//! per-token price depends only on how many tokens the sale has already
//! sold, and steps up by a fixed increment at every band boundary.
//!
//! ```text
//!   price
//!     ▲
//!     │                        ┌───────
//!     │                ┌───────┘
//!     │        ┌───────┘
//!     │────────┘
//!     └──────────────────────────────────▶ sold
//!       band 0   band 1   band 2   band 3
//! ```

pub mod staircase;

pub use staircase::*;
