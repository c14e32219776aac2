//! Fee Withdrawal
//!
//! The factory owner pulls creation fees out of the fee pool. Raised
//! funds live on each sale account and can never be reached from here.

use anchor_lang::prelude::*;

use super::pay_out_lamports;
use crate::state::Factory;

/// Event emitted when creation fees are withdrawn
#[event]
pub struct FeeWithdrawn {
    pub owner: Pubkey,
    pub amount: u64,
    pub remaining: u64,
}

#[derive(Accounts)]
pub struct WithdrawFee<'info> {
    /// Must be the factory owner
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [Factory::SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, Factory>,
}

impl<'info> WithdrawFee<'info> {
    pub fn withdraw_fee(&mut self, amount: u64) -> Result<()> {
        self.factory.debit_fee(self.owner.key(), amount)?;

        pay_out_lamports(
            &self.factory.to_account_info(),
            &self.owner.to_account_info(),
            amount,
        )?;

        msg!("Withdrew {} lamports in fees", amount);

        emit!(FeeWithdrawn {
            owner: self.owner.key(),
            amount,
            remaining: self.factory.fee_balance,
        });

        Ok(())
    }
}
