//! Program errors
//!
//! Every failure aborts the whole instruction, so none of these leave
//! partial state behind. [`ErrorKind`] groups them for clients that only
//! need to know which class of failure to show.

use anchor_lang::error::{Error, ErrorCode};
use anchor_lang::prelude::*;

#[error_code]
pub enum LaunchpadError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Amount must be a whole number of tokens")]
    FractionalAmount,
    #[msg("Amount is below the minimum purchase")]
    BelowMinimumBuy,
    #[msg("Amount is above the maximum purchase")]
    AboveMaximumBuy,
    #[msg("Token name must be 1-32 bytes")]
    InvalidName,
    #[msg("Token symbol must be 1-10 bytes")]
    InvalidSymbol,
    #[msg("Invalid sale parameters")]
    InvalidParams,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Attached payment does not match the required amount")]
    PaymentMismatch,
    #[msg("Caller is not allowed to perform this action")]
    Unauthorized,
    #[msg("Sale is closed")]
    SaleClosed,
    #[msg("Sale is still open")]
    SaleStillOpen,
    #[msg("Sale is already finalized")]
    AlreadyFinalized,
    #[msg("Amount exceeds the tokens left for sale")]
    ExceedsAvailable,
    #[msg("Vault holds fewer tokens than the sale has left")]
    VaultShortfall,
    #[msg("Token not found")]
    NotFound,
    #[msg("Fee pool balance is insufficient")]
    InsufficientBalance,
}

/// Failure classes surfaced to clients
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Zero or malformed amount, metadata or parameters
    Validation,
    /// Attached payment differs from the required amount
    PaymentMismatch,
    /// Caller is not the owner or creator
    Authorization,
    /// Operation not allowed in the sale's current state
    State,
    /// Unknown token handle or index
    NotFound,
    /// Fee withdrawal exceeds the pool
    InsufficientBalance,
}

impl LaunchpadError {
    pub const ALL: [LaunchpadError; 17] = [
        LaunchpadError::InvalidAmount,
        LaunchpadError::FractionalAmount,
        LaunchpadError::BelowMinimumBuy,
        LaunchpadError::AboveMaximumBuy,
        LaunchpadError::InvalidName,
        LaunchpadError::InvalidSymbol,
        LaunchpadError::InvalidParams,
        LaunchpadError::ArithmeticOverflow,
        LaunchpadError::PaymentMismatch,
        LaunchpadError::Unauthorized,
        LaunchpadError::SaleClosed,
        LaunchpadError::SaleStillOpen,
        LaunchpadError::AlreadyFinalized,
        LaunchpadError::ExceedsAvailable,
        LaunchpadError::VaultShortfall,
        LaunchpadError::NotFound,
        LaunchpadError::InsufficientBalance,
    ];

    pub fn kind(&self) -> ErrorKind {
        match self {
            LaunchpadError::InvalidAmount
            | LaunchpadError::FractionalAmount
            | LaunchpadError::BelowMinimumBuy
            | LaunchpadError::AboveMaximumBuy
            | LaunchpadError::InvalidName
            | LaunchpadError::InvalidSymbol
            | LaunchpadError::InvalidParams
            | LaunchpadError::ArithmeticOverflow => ErrorKind::Validation,
            LaunchpadError::PaymentMismatch => ErrorKind::PaymentMismatch,
            LaunchpadError::Unauthorized => ErrorKind::Authorization,
            LaunchpadError::SaleClosed
            | LaunchpadError::SaleStillOpen
            | LaunchpadError::AlreadyFinalized
            | LaunchpadError::ExceedsAvailable
            | LaunchpadError::VaultShortfall => ErrorKind::State,
            LaunchpadError::NotFound => ErrorKind::NotFound,
            LaunchpadError::InsufficientBalance => ErrorKind::InsufficientBalance,
        }
    }
}

/// Maps an instruction error to its [`ErrorKind`].
///
/// Unknown handles are usually rejected by Anchor while resolving the mint
/// or sale account, before any handler runs, so those framework codes
/// count as `NotFound` too. A seeds mismatch means the caller paired a
/// mint with the wrong sale; that is a malformed request and stays
/// unclassified. Returns `None` for errors outside the taxonomy.
pub fn classify(error: &Error) -> Option<ErrorKind> {
    let Error::AnchorError(anchor_error) = error else {
        return None;
    };
    let code = anchor_error.error_code_number;

    let missing_account = [
        ErrorCode::AccountNotInitialized,
        ErrorCode::AccountOwnedByWrongProgram,
    ];
    if missing_account.iter().any(|c| u32::from(*c) == code) {
        return Some(ErrorKind::NotFound);
    }

    LaunchpadError::ALL
        .iter()
        .find(|e| u32::from(**e) == code)
        .map(|e| e.kind())
}

/// Asserts that `result` failed with `expected`, comparing error codes.
#[cfg(test)]
pub(crate) fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: LaunchpadError) {
    match result {
        Err(Error::AnchorError(error)) => assert_eq!(
            error.error_code_number,
            u32::from(expected),
            "expected {expected:?}, got {}",
            error.error_name
        ),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}
