use rand::{thread_rng, Rng};

use crate::betmath::{ODDS_PLACES, STAKE_PLACES};
use crate::currency::to_fixed;
use crate::handlers::handle_bet_record;
use crate::state::BetSlip;
use crate::types::{BetRecord, BetSide, CurrencyFloat, RawBetRow};

const MIN_STAKE: CurrencyFloat = 0.001;
const MIN_ODDS: CurrencyFloat = 1.01;
const MAX_ODDS: CurrencyFloat = 20.0;

pub struct BetGenerator {
    slip: BetSlip,
    next_bet: u64,
    num_bets: Option<u64>,
    max_market: u16,
    max_stake: CurrencyFloat,
}

impl BetGenerator {
    fn new(num_bets: Option<u64>, max_market: u16, max_stake: CurrencyFloat) -> Self {
        Self {
            slip: BetSlip::new(),
            next_bet: 1,
            num_bets,
            max_market,
            max_stake,
        }
    }

    /// Generate a random bet that the admission path accepts: odds on the
    /// tick ladder, stake at least the minimum, profit and liability
    /// derived from them.
    fn generate_bet(&self) -> RawBetRow {
        let mut rng = thread_rng();
        let bet_side = if rng.gen() {
            BetSide::Back
        } else {
            BetSide::Lay
        };
        let odds = round_to(rng.gen_range(MIN_ODDS..MAX_ODDS), ODDS_PLACES);
        let stake = round_to(rng.gen_range(MIN_STAKE..self.max_stake), STAKE_PLACES);
        let win = stake * (odds - 1.0);

        let bet = BetRecord {
            id: format!("1.106.{}", self.next_bet),
            betting_market_id: format!("1.105.{}", rng.gen_range(1..=self.max_market)),
            bet_side,
            odds: Some(odds),
            stake: Some(stake),
            profit: Some(win),
            liability: Some(win),
        };

        bet.into()
    }
}

impl Iterator for BetGenerator {
    type Item = RawBetRow;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(desired) = self.num_bets {
            // Maybe break early
            if self.next_bet > desired {
                return None;
            }
        }

        let row = self.generate_bet();
        handle_bet_record(row.clone(), &mut self.slip).expect("Generated invalid bet");
        self.next_bet += 1;
        Some(row)
    }
}

fn round_to(value: CurrencyFloat, places: usize) -> CurrencyFloat {
    to_fixed(value, places).parse().unwrap_or(value)
}

pub fn generate_random_valid_bet_sequence(
    num_bets: Option<u64>,
    max_market: u16,
    max_stake: CurrencyFloat,
) -> impl Iterator<Item = RawBetRow> {
    BetGenerator::new(num_bets, max_market, max_stake)
}
