//! Sale Settlement
//!
//! Once a sale has closed, its creator collects the unsold tokens and
//! every lamport the sale raised. A sale settles exactly once.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use super::pay_out_lamports;
use crate::errors::LaunchpadError;
use crate::state::{Factory, Sale};

/// Event emitted when a sale is paid out
#[event]
pub struct SaleFinalized {
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub tokens: u64,
    pub lamports: u64,
}

/// Accounts for settling a closed sale
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// Sale creator
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Factory; vault authority
    #[account(
        seeds = [Factory::SEED],
        bump = factory.bump,
    )]
    pub factory: Box<Account<'info, Factory>>,

    /// Token being settled
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Sale for the token; holds the raised lamports
    #[account(
        mut,
        seeds = [Sale::SEED, mint.key().as_ref()],
        bump = sale.bump,
    )]
    pub sale: Box<Account<'info, Sale>>,

    /// Factory's token account for the mint
    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = factory,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creator's token account
    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = mint,
        associated_token::authority = creator,
        associated_token::token_program = token_program,
    )]
    pub creator_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn deposit(&mut self) -> Result<()> {
        let settlement = self.sale.finalize(self.creator.key())?;

        // Tokens sent straight to the vault stay there
        require!(
            self.vault.amount >= settlement.tokens,
            LaunchpadError::VaultShortfall
        );

        if settlement.tokens > 0 {
            let factory_seeds = &[Factory::SEED, &[self.factory.bump]];
            let signer_seeds = &[&factory_seeds[..]];

            transfer_checked(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.vault.to_account_info(),
                        mint: self.mint.to_account_info(),
                        to: self.creator_token_account.to_account_info(),
                        authority: self.factory.to_account_info(),
                    },
                    signer_seeds,
                ),
                settlement.tokens,
                self.mint.decimals,
            )?;
        }

        pay_out_lamports(
            &self.sale.to_account_info(),
            &self.creator.to_account_info(),
            settlement.lamports,
        )?;

        msg!(
            "Sale for {} settled: {} tokens, {} lamports to {}",
            self.mint.key(),
            settlement.tokens,
            settlement.lamports,
            self.creator.key()
        );

        emit!(SaleFinalized {
            mint: self.mint.key(),
            creator: self.creator.key(),
            tokens: settlement.tokens,
            lamports: settlement.lamports,
        });

        Ok(())
    }
}
