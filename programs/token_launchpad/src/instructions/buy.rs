//! Token Purchase
//!
//! Buys tokens from an open sale at the staircase price for the amount
//! already sold.
//!
//! ## Payment
//!
//! ```text
//! payment = get_cost(sold) × amount / TOKEN_UNIT
//! ```
//!
//! Clients read the price with `get_cost` first and attach exactly this
//! many lamports. Anything else is rejected; there are no refunds.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::state::{Factory, Sale};

/// Event emitted when tokens are bought
#[event]
pub struct TokensBought {
    pub mint: Pubkey,
    pub buyer: Pubkey,
    pub amount: u64,
    pub price: u64,
    pub cost: u64,
    pub sold: u64,
    pub raised: u64,
}

/// Event emitted when a buy closes its sale
#[event]
pub struct SaleClosed {
    pub mint: Pubkey,
    pub sold: u64,
    pub raised: u64,
}

/// Accounts for buying tokens
#[derive(Accounts)]
pub struct Buy<'info> {
    /// Buyer (pays lamports, receives tokens)
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Factory; vault authority and sale parameters
    #[account(
        seeds = [Factory::SEED],
        bump = factory.bump,
    )]
    pub factory: Box<Account<'info, Factory>>,

    /// Token being bought
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Sale for the token; receives the payment
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

    /// Buyer's token account
    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = mint,
        associated_token::authority = buyer,
        associated_token::token_program = token_program,
    )]
    pub buyer_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Buy<'info> {
    /// Buy `amount` base units; returns the lamports paid
    pub fn buy(&mut self, amount: u64, payment: u64) -> Result<u64> {
        // Validate and commit before moving anything
        let params = self.factory.params;
        let receipt = self.sale.apply_buy(&params, amount, payment)?;

        transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.buyer.to_account_info(),
                    to: self.sale.to_account_info(),
                },
            ),
            payment,
        )?;

        let factory_seeds = &[Factory::SEED, &[self.factory.bump]];
        let signer_seeds = &[&factory_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.buyer_token_account.to_account_info(),
                    authority: self.factory.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
            self.mint.decimals,
        )?;

        emit!(TokensBought {
            mint: self.mint.key(),
            buyer: self.buyer.key(),
            amount,
            price: receipt.price,
            cost: receipt.cost,
            sold: self.sale.sold,
            raised: self.sale.raised,
        });

        if receipt.closed {
            msg!(
                "Sale for {} closed: sold {}, raised {}",
                self.mint.key(),
                self.sale.sold,
                self.sale.raised
            );
            emit!(SaleClosed {
                mint: self.mint.key(),
                sold: self.sale.sold,
                raised: self.sale.raised,
            });
        }

        Ok(receipt.cost)
    }
}
