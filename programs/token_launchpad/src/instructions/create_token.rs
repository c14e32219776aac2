//! Permissionless Token Launch
//!
//! Anyone can launch a token by:
//! 1. Choosing a name and symbol
//! 2. Paying exactly the factory's creation fee
//!
//! The whole supply is minted to the factory's vault, the mint authority
//! is revoked so the supply stays fixed, and an open sale is registered
//! under the next registry index.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    metadata::{
        create_metadata_accounts_v3, mpl_token_metadata::types::DataV2,
        CreateMetadataAccountsV3, Metadata,
    },
    token_interface::{
        mint_to, set_authority, spl_token_2022::instruction::AuthorityType, Mint, MintTo,
        SetAuthority, TokenAccount, TokenInterface,
    },
};

use crate::constants::{MINT_SEED, TOKEN_DECIMALS};
use crate::state::{validate_metadata, Factory, Sale};

/// Event emitted when a new token is launched
#[event]
pub struct TokenCreated {
    pub index: u64,
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub name: String,
    pub symbol: String,
    pub total_supply: u64,
    pub fee_paid: u64,
}

/// Accounts for launching a new token
#[derive(Accounts)]
pub struct CreateToken<'info> {
    /// Token creator (pays the fee and account rent)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Factory; receives the creation fee
    #[account(
        mut,
        seeds = [Factory::SEED],
        bump = factory.bump,
    )]
    pub factory: Box<Account<'info, Factory>>,

    /// The new token, addressed by its registry index
    #[account(
        init,
        payer = creator,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = factory,
        mint::token_program = token_program,
        seeds = [MINT_SEED, factory.total_tokens.to_le_bytes().as_ref()],
        bump,
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// The new sale
    #[account(
        init,
        payer = creator,
        space = 8 + Sale::INIT_SPACE,
        seeds = [Sale::SEED, mint.key().as_ref()],
        bump,
    )]
    pub sale: Box<Account<'info, Sale>>,

    /// Factory's token account; holds every unit not yet sold or paid out
    #[account(
        init,
        payer = creator,
        associated_token::mint = mint,
        associated_token::authority = factory,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: created and validated by the token metadata program
    #[account(
        mut,
        seeds = [b"metadata", token_metadata_program.key().as_ref(), mint.key().as_ref()],
        seeds::program = token_metadata_program.key(),
        bump,
    )]
    pub metadata: UncheckedAccount<'info>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Token metadata program
    pub token_metadata_program: Program<'info, Metadata>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
    /// Rent sysvar, required by the metadata program
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> CreateToken<'info> {
    pub fn create_token(
        &mut self,
        name: String,
        symbol: String,
        payment: u64,
        bumps: &CreateTokenBumps,
    ) -> Result<Pubkey> {
        validate_metadata(&name, &symbol)?;

        // Commit registry state before any transfer
        let index = self.factory.record_creation(payment)?;
        let params = self.factory.params;
        let mint_key = self.mint.key();

        self.sale.set_inner(Sale::open(
            index,
            mint_key,
            name.clone(),
            symbol.clone(),
            self.creator.key(),
            &params,
            bumps.sale,
        ));

        // Collect the creation fee into the factory's pool
        transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.creator.to_account_info(),
                    to: self.factory.to_account_info(),
                },
            ),
            payment,
        )?;

        let factory_seeds = &[Factory::SEED, &[self.factory.bump]];
        let signer_seeds = &[&factory_seeds[..]];

        create_metadata_accounts_v3(
            CpiContext::new_with_signer(
                self.token_metadata_program.to_account_info(),
                CreateMetadataAccountsV3 {
                    metadata: self.metadata.to_account_info(),
                    mint: self.mint.to_account_info(),
                    mint_authority: self.factory.to_account_info(),
                    payer: self.creator.to_account_info(),
                    update_authority: self.factory.to_account_info(),
                    system_program: self.system_program.to_account_info(),
                    rent: self.rent.to_account_info(),
                },
                signer_seeds,
            ),
            DataV2 {
                name: name.clone(),
                symbol: symbol.clone(),
                uri: String::new(),
                seller_fee_basis_points: 0,
                creators: None,
                collection: None,
                uses: None,
            },
            false,
            true,
            None,
        )?;

        // Credit the whole supply to the factory
        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.factory.to_account_info(),
                },
                signer_seeds,
            ),
            params.total_supply,
        )?;

        // No further minting, ever
        set_authority(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                SetAuthority {
                    current_authority: self.factory.to_account_info(),
                    account_or_mint: self.mint.to_account_info(),
                },
                signer_seeds,
            ),
            AuthorityType::MintTokens,
            None,
        )?;

        msg!("Token {} ({}) launched at index {}", name, symbol, index);

        emit!(TokenCreated {
            index,
            mint: mint_key,
            creator: self.creator.key(),
            name,
            symbol,
            total_supply: params.total_supply,
            fee_paid: payment,
        });

        Ok(mint_key)
    }
}
