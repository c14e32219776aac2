//! Protocol-wide constants
//!
//! Seeds, token granularity and the default sale calibration.

use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// Decimals of every launched mint
pub const TOKEN_DECIMALS: u8 = 6;

/// Base units in one whole token
pub const TOKEN_UNIT: u64 = 10u64.pow(TOKEN_DECIMALS as u32);

/// Maximum metadata name length accepted by the token metadata program
pub const MAX_NAME_LEN: usize = 32;

/// Maximum metadata symbol length accepted by the token metadata program
pub const MAX_SYMBOL_LEN: usize = 10;

pub const FACTORY_SEED: &[u8] = b"factory";
pub const MINT_SEED: &[u8] = b"mint";
pub const SALE_SEED: &[u8] = b"sale";

// Default calibration: 10,000 tokens cost 1 SOL at launch, and the price
// doubles once 10,000 tokens have been sold.

/// Tokens minted per launch (1,000,000 whole tokens)
pub const DEFAULT_TOTAL_SUPPLY: u64 = 1_000_000 * TOKEN_UNIT;

/// Funding target in lamports (3 SOL)
pub const DEFAULT_TARGET: u64 = 3 * LAMPORTS_PER_SOL;

/// Launch price in lamports per whole token (0.0001 SOL)
pub const DEFAULT_BASE_PRICE: u64 = LAMPORTS_PER_SOL / 10_000;

/// Price step per band in lamports per whole token
pub const DEFAULT_PRICE_INCREMENT: u64 = LAMPORTS_PER_SOL / 10_000;

/// Width of one price band (10,000 whole tokens)
pub const DEFAULT_BAND_WIDTH: u64 = 10_000 * TOKEN_UNIT;

/// Smallest purchase per call (1 whole token)
pub const DEFAULT_MIN_BUY: u64 = TOKEN_UNIT;

/// Largest purchase per call (10,000 whole tokens)
pub const DEFAULT_MAX_BUY: u64 = 10_000 * TOKEN_UNIT;
