//! Read-only views
//!
//! These instructions change nothing; results come back as return data.
//! Lookups by index or by token report `NotFound` for handles the
//! registry never issued, instead of failing account resolution.

use anchor_lang::prelude::*;

use crate::constants::MINT_SEED;
use crate::errors::LaunchpadError;
use crate::state::{Factory, Sale};

/// Factory-level views: fee, owner, token count and curve price
#[derive(Accounts)]
pub struct FactoryView<'info> {
    #[account(
        seeds = [Factory::SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, Factory>,
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct TokenSaleByIndex<'info> {
    #[account(
        seeds = [Factory::SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, Factory>,

    /// CHECK: address derived from the registry index; may not exist
    #[account(
        seeds = [MINT_SEED, index.to_le_bytes().as_ref()],
        bump,
    )]
    pub mint: UncheckedAccount<'info>,

    /// CHECK: address derived from the mint; contents checked on load
    #[account(
        seeds = [Sale::SEED, mint.key().as_ref()],
        bump,
    )]
    pub sale: UncheckedAccount<'info>,
}

impl<'info> TokenSaleByIndex<'info> {
    pub fn get_token_sale(&self, index: u64) -> Result<Sale> {
        self.factory.check_index(index)?;
        load_sale(&self.sale)
    }
}

#[derive(Accounts)]
pub struct SaleByToken<'info> {
    /// CHECK: any address; unknown tokens have no sale
    pub mint: UncheckedAccount<'info>,

    /// CHECK: address derived from the mint; contents checked on load
    #[account(
        seeds = [Sale::SEED, mint.key().as_ref()],
        bump,
    )]
    pub sale: UncheckedAccount<'info>,
}

impl<'info> SaleByToken<'info> {
    pub fn sale_of(&self) -> Result<Sale> {
        load_sale(&self.sale)
    }
}

/// Reads a sale record, treating an absent account as an unknown handle.
fn load_sale(info: &AccountInfo) -> Result<Sale> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return err!(LaunchpadError::NotFound);
    }
    let data = info.try_borrow_data()?;
    Sale::try_deserialize(&mut &data[..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_error;
    use crate::state::SaleParams;

    fn sale_record() -> Sale {
        Sale::open(
            3,
            Pubkey::new_unique(),
            "ADITYA".to_string(),
            "ADI".to_string(),
            Pubkey::new_unique(),
            &SaleParams::default(),
            253,
        )
    }

    #[test]
    fn test_load_sale_reads_program_owned_record() {
        let sale = sale_record();
        let mut data = Vec::new();
        sale.try_serialize(&mut data).unwrap();

        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let info = AccountInfo::new(
            &key, false, false, &mut lamports, &mut data, &crate::ID, false, 0,
        );

        assert_eq!(load_sale(&info).unwrap(), sale);
    }

    #[test]
    fn test_load_sale_missing_account_is_not_found() {
        let key = Pubkey::new_unique();
        let system = anchor_lang::system_program::ID;
        let mut lamports = 0;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(
            &key, false, false, &mut lamports, &mut data, &system, false, 0,
        );

        assert_error(load_sale(&info), LaunchpadError::NotFound);
    }

    #[test]
    fn test_load_sale_empty_program_account_is_not_found() {
        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(
            &key, false, false, &mut lamports, &mut data, &crate::ID, false, 0,
        );

        assert_error(load_sale(&info), LaunchpadError::NotFound);
    }

    #[test]
    fn test_load_sale_foreign_owner_is_not_found() {
        // A valid record under another program is still unknown here
        let mut data = Vec::new();
        sale_record().try_serialize(&mut data).unwrap();

        let key = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let info = AccountInfo::new(
            &key, false, false, &mut lamports, &mut data, &other, false, 0,
        );

        assert_error(load_sale(&info), LaunchpadError::NotFound);
    }

    #[test]
    fn test_index_beyond_registry_is_not_found() {
        let mut factory = Factory::new(Pubkey::new_unique(), 0, SaleParams::default(), 255).unwrap();
        assert_error(factory.check_index(0), LaunchpadError::NotFound);

        factory.record_creation(0).unwrap();
        factory.record_creation(0).unwrap();
        assert!(factory.check_index(0).is_ok());
        assert!(factory.check_index(1).is_ok());
        assert_error(factory.check_index(2), LaunchpadError::NotFound);
        assert_error(factory.check_index(u64::MAX), LaunchpadError::NotFound);
    }
}
