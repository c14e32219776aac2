//! Instruction handlers for the token launchpad
//!
//! Each instruction represents an action users can take:
//! - `initialize` - Create the factory (once)
//! - `create_token` - Launch a token and open its sale (permissionless)
//! - `buy` - Buy tokens from an open sale
//! - `deposit` - Pay out a closed sale to its creator
//! - `withdraw_fee` - Withdraw creation fees (owner only)
//! - `queries` - Read-only views over the factory and its sales

pub mod initialize;
pub mod create_token;
pub mod buy;
pub mod deposit;
pub mod withdraw_fee;
pub mod queries;

pub use initialize::*;
pub use create_token::*;
pub use buy::*;
pub use deposit::*;
pub use withdraw_fee::*;
pub use queries::*;

use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;

/// Move lamports out of an account this program owns.
///
/// The system program cannot debit program-owned accounts, so balances
/// are adjusted directly.
pub(crate) fn pay_out_lamports<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let debited = from
        .lamports()
        .checked_sub(amount)
        .ok_or(LaunchpadError::InsufficientBalance)?;
    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(LaunchpadError::ArithmeticOverflow)?;

    **from.try_borrow_mut_lamports()? = debited;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}
