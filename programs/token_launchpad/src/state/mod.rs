//! State structures for the token launchpad

pub mod factory;
pub mod sale;

pub use factory::*;
pub use sale::*;

// Replays instruction sequences against an in-memory ledger, moving
// balances the way the handlers do once the state methods return.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOKEN_UNIT;
    use crate::errors::assert_error;
    use crate::errors::LaunchpadError;
    use anchor_lang::prelude::*;
    use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;
    use std::collections::BTreeMap;

    const FEE: u64 = LAMPORTS_PER_SOL / 100;

    /// Token balances per (mint, holder) and lamports per account
    struct Ledger {
        factory_key: Pubkey,
        factory: Factory,
        sales: Vec<(Pubkey, Sale)>,
        tokens: BTreeMap<(Pubkey, Pubkey), u64>,
        lamports: BTreeMap<Pubkey, u64>,
    }

    impl Ledger {
        fn new(owner: Pubkey, params: SaleParams) -> Self {
            Self {
                factory_key: Pubkey::new_unique(),
                factory: Factory::new(owner, FEE, params, 255).unwrap(),
                sales: Vec::new(),
                tokens: BTreeMap::new(),
                lamports: BTreeMap::new(),
            }
        }

        fn token_balance(&self, mint: Pubkey, holder: Pubkey) -> u64 {
            self.tokens.get(&(mint, holder)).copied().unwrap_or(0)
        }

        fn lamport_balance(&self, key: Pubkey) -> u64 {
            self.lamports.get(&key).copied().unwrap_or(0)
        }

        fn move_tokens(&mut self, mint: Pubkey, from: Pubkey, to: Pubkey, amount: u64) {
            let source = self.tokens.entry((mint, from)).or_default();
            *source = source.checked_sub(amount).expect("token underflow");
            *self.tokens.entry((mint, to)).or_default() += amount;
        }

        fn move_lamports(&mut self, from: Pubkey, to: Pubkey, amount: u64) {
            let source = self.lamports.entry(from).or_default();
            *source = source.checked_sub(amount).expect("lamport underflow");
            *self.lamports.entry(to).or_default() += amount;
        }

        fn fund(&mut self, key: Pubkey, amount: u64) {
            *self.lamports.entry(key).or_default() += amount;
        }

        fn create(&mut self, creator: Pubkey, name: &str, symbol: &str, payment: u64) -> Result<Pubkey> {
            validate_metadata(name, symbol)?;
            let index = self.factory.record_creation(payment)?;
            let mint = Pubkey::new_unique();
            let params = self.factory.params;
            self.sales.push((
                Pubkey::new_unique(),
                Sale::open(index, mint, name.to_string(), symbol.to_string(), creator, &params, 0),
            ));
            self.move_lamports(creator, self.factory_key, payment);
            *self.tokens.entry((mint, self.factory_key)).or_default() += params.total_supply;
            Ok(mint)
        }

        fn buy(&mut self, index: usize, buyer: Pubkey, amount: u64, payment: u64) -> Result<BuyReceipt> {
            let params = self.factory.params;
            let (sale_key, sale) = &mut self.sales[index];
            let sale_key = *sale_key;
            let receipt = sale.apply_buy(&params, amount, payment)?;
            let mint = sale.mint;
            self.move_lamports(buyer, sale_key, payment);
            self.move_tokens(mint, self.factory_key, buyer, amount);
            Ok(receipt)
        }

        fn deposit(&mut self, index: usize, caller: Pubkey) -> Result<Settlement> {
            let (sale_key, sale) = &mut self.sales[index];
            let sale_key = *sale_key;
            let settlement = sale.finalize(caller)?;
            let mint = sale.mint;
            self.move_tokens(mint, self.factory_key, caller, settlement.tokens);
            self.move_lamports(sale_key, caller, settlement.lamports);
            Ok(settlement)
        }

        fn withdraw_fee(&mut self, caller: Pubkey, amount: u64) -> Result<()> {
            self.factory.debit_fee(caller, amount)?;
            self.move_lamports(self.factory_key, caller, amount);
            Ok(())
        }

        /// Supply, pool and status invariants that must hold between calls
        fn check_invariants(&self) {
            assert_eq!(self.lamport_balance(self.factory_key), self.factory.fee_balance);
            assert_eq!(self.factory.total_tokens as usize, self.sales.len());

            for (sale_key, sale) in &self.sales {
                assert!(sale.sold <= sale.total_supply);

                let held: u64 = self
                    .tokens
                    .iter()
                    .filter(|((mint, _), _)| *mint == sale.mint)
                    .map(|(_, balance)| *balance)
                    .sum();
                assert_eq!(held, sale.total_supply);

                let in_vault = self.token_balance(sale.mint, self.factory_key);
                match sale.status {
                    SaleStatus::Finalized => {
                        assert_eq!(in_vault, 0);
                        assert_eq!(self.lamport_balance(*sale_key), 0);
                    }
                    _ => {
                        assert_eq!(in_vault, sale.remaining());
                        assert_eq!(self.lamport_balance(*sale_key), sale.raised);
                    }
                }
                if sale.status == SaleStatus::Open {
                    assert!(sale.sold < sale.total_supply && sale.raised < sale.target);
                }
            }
        }
    }

    /// Deterministic pseudo-random stream for replaying sequences
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            self.0 >> 33
        }

        fn below(&mut self, bound: u64) -> u64 {
            self.next() % bound
        }
    }

    #[test]
    fn test_launch_buy_and_finalize_scenario() {
        let owner = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let buyer = Pubkey::new_unique();
        let mut ledger = Ledger::new(owner, SaleParams::default());
        ledger.fund(creator, LAMPORTS_PER_SOL);
        ledger.fund(buyer, 10 * LAMPORTS_PER_SOL);

        let mint = ledger.create(creator, "ADITYA", "ADI", FEE).unwrap();
        assert_eq!(ledger.factory.total_tokens, 1);
        assert_eq!(ledger.factory.fee_balance, FEE);
        assert_eq!(ledger.token_balance(mint, ledger.factory_key), 1_000_000 * TOKEN_UNIT);
        ledger.check_invariants();

        let ten_k = 10_000 * TOKEN_UNIT;
        ledger.buy(0, buyer, ten_k, LAMPORTS_PER_SOL).unwrap();
        assert_eq!(ledger.token_balance(mint, buyer), ten_k);
        assert_eq!(ledger.factory.params.curve.get_cost(ledger.sales[0].1.sold).unwrap(), 200_000);
        ledger.check_invariants();

        let receipt = ledger.buy(0, buyer, ten_k, 2 * LAMPORTS_PER_SOL).unwrap();
        assert!(receipt.closed);
        ledger.check_invariants();

        assert_error(ledger.deposit(0, buyer), LaunchpadError::Unauthorized);
        assert_eq!(ledger.sales[0].1.status, SaleStatus::Closed);

        let settlement = ledger.deposit(0, creator).unwrap();
        assert_eq!(settlement.lamports, 3 * LAMPORTS_PER_SOL);
        assert_eq!(ledger.token_balance(mint, creator), 1_000_000 * TOKEN_UNIT - 2 * ten_k);
        assert_eq!(ledger.lamport_balance(creator), LAMPORTS_PER_SOL - FEE + 3 * LAMPORTS_PER_SOL);
        // Fee pool is untouched by the payout
        assert_eq!(ledger.factory.fee_balance, FEE);
        ledger.check_invariants();

        assert_error(ledger.deposit(0, creator), LaunchpadError::AlreadyFinalized);
        ledger.check_invariants();
    }

    #[test]
    fn test_fee_pool_is_separate_from_raised_funds() {
        let owner = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let buyer = Pubkey::new_unique();
        let mut ledger = Ledger::new(owner, SaleParams::default());
        ledger.fund(creator, LAMPORTS_PER_SOL);
        ledger.fund(buyer, 10 * LAMPORTS_PER_SOL);

        ledger.create(creator, "ADITYA", "ADI", FEE).unwrap();
        ledger.buy(0, buyer, 10_000 * TOKEN_UNIT, LAMPORTS_PER_SOL).unwrap();

        // Raised lamports are not part of the pool the owner can draw on
        assert_error(ledger.withdraw_fee(owner, FEE + 1), LaunchpadError::InsufficientBalance);
        assert_eq!(ledger.factory.fee_balance, FEE);
        assert_error(ledger.withdraw_fee(creator, FEE), LaunchpadError::Unauthorized);

        ledger.withdraw_fee(owner, FEE).unwrap();
        assert_eq!(ledger.lamport_balance(owner), FEE);
        assert_eq!(ledger.sales[0].1.raised, LAMPORTS_PER_SOL);
        ledger.check_invariants();
    }

    #[test]
    fn test_rejected_create_changes_nothing() {
        let creator = Pubkey::new_unique();
        let mut ledger = Ledger::new(Pubkey::new_unique(), SaleParams::default());
        ledger.fund(creator, LAMPORTS_PER_SOL);

        assert_error(ledger.create(creator, "ADITYA", "ADI", FEE - 1), LaunchpadError::PaymentMismatch);
        assert_error(ledger.create(creator, "", "ADI", FEE), LaunchpadError::InvalidName);
        assert_eq!(ledger.factory.total_tokens, 0);
        assert_eq!(ledger.factory.fee_balance, 0);
        assert_eq!(ledger.lamport_balance(creator), LAMPORTS_PER_SOL);
        ledger.check_invariants();
    }

    fn replay(params: SaleParams, seed: u64, steps: usize) {
        let owner = Pubkey::new_unique();
        let creators: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let buyers: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let mut ledger = Ledger::new(owner, params);
        for key in creators.iter().chain(buyers.iter()) {
            ledger.fund(*key, u64::MAX / 16);
        }
        let mut rng = Lcg(seed);

        for (i, creator) in creators.iter().enumerate() {
            ledger.create(*creator, &format!("Token {i}"), "TKN", FEE).unwrap();
        }
        ledger.check_invariants();

        let max_whole = params.max_buy / TOKEN_UNIT;
        for _ in 0..steps {
            let index = rng.below(ledger.sales.len() as u64) as usize;
            match rng.below(10) {
                0 => {
                    let caller = if rng.below(2) == 0 {
                        ledger.sales[index].1.creator
                    } else {
                        buyers[rng.below(buyers.len() as u64) as usize]
                    };
                    let before = ledger.sales[index].1.clone();
                    if ledger.deposit(index, caller).is_err() {
                        assert_eq!(ledger.sales[index].1, before);
                    }
                }
                1 => {
                    let amount = rng.below(ledger.factory.fee_balance + 2);
                    let before = ledger.factory.fee_balance;
                    if ledger.withdraw_fee(owner, amount).is_err() {
                        assert_eq!(ledger.factory.fee_balance, before);
                    }
                }
                _ => {
                    let buyer = buyers[rng.below(buyers.len() as u64) as usize];
                    let amount = (1 + rng.below(max_whole)) * TOKEN_UNIT;
                    let sale = &ledger.sales[index].1;
                    let quote = params.curve.quote(sale.sold, amount).unwrap();
                    // Occasionally pay the wrong amount
                    let payment = match rng.below(8) {
                        0 => quote + 1,
                        1 => quote.saturating_sub(1),
                        _ => quote,
                    };
                    let before = sale.clone();
                    let was_open = before.is_open();

                    match ledger.buy(index, buyer, amount, payment) {
                        Ok(receipt) => {
                            let after = &ledger.sales[index].1;
                            assert!(was_open);
                            assert_eq!(payment, quote);
                            assert_eq!(receipt.cost, quote);
                            assert_eq!(after.sold, before.sold + amount);
                            assert_eq!(after.raised, before.raised + quote);
                            assert_eq!(receipt.closed, !after.is_open());
                        }
                        Err(_) => {
                            assert_eq!(ledger.sales[index].1, before);
                            if !was_open {
                                assert_error(
                                    ledger.buy(index, buyer, amount, payment),
                                    LaunchpadError::SaleClosed,
                                );
                            }
                        }
                    }
                }
            }
            ledger.check_invariants();
        }
    }

    #[test]
    fn test_replay_target_bound_sales() {
        replay(SaleParams::default(), 7, 400);
    }

    #[test]
    fn test_replay_supply_bound_sales() {
        let params = SaleParams {
            total_supply: 200 * TOKEN_UNIT,
            target: u64::MAX,
            max_buy: 40 * TOKEN_UNIT,
            curve: crate::curve::StaircaseCurve {
                base_price: 1_000,
                increment: 250,
                band_width: 50 * TOKEN_UNIT,
            },
            ..SaleParams::default()
        };
        replay(params, 42, 400);
    }
}
