//! Factory Initialization
//!
//! Creates the singleton factory. The caller becomes the owner who can
//! withdraw creation fees. Fee and sale parameters cannot change later.

use anchor_lang::prelude::*;

use crate::state::{Factory, SaleParams};

/// Event emitted when the factory is created
#[event]
pub struct FactoryInitialized {
    pub owner: Pubkey,
    pub fee_amount: u64,
    pub params: SaleParams,
}

/// Accounts required for factory initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Platform operator (becomes the owner)
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Factory account (created)
    #[account(
        init,
        payer = owner,
        space = 8 + Factory::INIT_SPACE,
        seeds = [Factory::SEED],
        bump,
    )]
    pub factory: Account<'info, Factory>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Initialize the factory configuration
    pub fn initialize(
        &mut self,
        fee_amount: u64,
        params: SaleParams,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        let factory = Factory::new(self.owner.key(), fee_amount, params, bumps.factory)?;
        self.factory.set_inner(factory);

        msg!("Factory initialized!");
        msg!("Owner: {}", self.owner.key());
        msg!("Fee: {} lamports", fee_amount);

        emit!(FactoryInitialized {
            owner: self.owner.key(),
            fee_amount,
            params,
        });

        Ok(())
    }
}
