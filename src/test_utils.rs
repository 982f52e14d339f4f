use std::collections::HashMap;

use crate::betmath;
use crate::currency::{CurrencyFormatter, Denomination};
use crate::handlers::handle_bet_record;
use crate::state::BetSlip;
use crate::types::{BetError, CurrencyFloat, MarketId, RawBetRow};

/// Given a set of raw bet rows, test that the computed per-market
/// exposures and the errors raised during admission both match their
/// expected values.
pub fn run_exposure_scenario(
    rows: Vec<RawBetRow>,
    denomination: Denomination,
    expected_exposures: HashMap<MarketId, String>,
    expected_errors: Vec<BetError>,
) {
    let mut slip = BetSlip::new();
    let mut actual_errors = Vec::new();

    for row in rows {
        if let Err(err) = handle_bet_record(row, &mut slip) {
            actual_errors.push(err);
        }
    }

    let formatter = CurrencyFormatter::default();
    let actual_exposures: HashMap<MarketId, String> = slip
        .markets()
        .map(|market| {
            (
                market.clone(),
                betmath::market_exposure(market, slip.bets(), &formatter, denomination),
            )
        })
        .collect();

    assert_eq!(expected_exposures, actual_exposures);
    assert_eq!(expected_errors, actual_errors);
}

/// Shorthand for a fully-populated raw row.
pub fn bet_row(
    id: &str,
    market: &str,
    side: &str,
    odds: Option<CurrencyFloat>,
    stake: Option<CurrencyFloat>,
    profit: Option<CurrencyFloat>,
    liability: Option<CurrencyFloat>,
) -> RawBetRow {
    RawBetRow {
        id: id.to_string(),
        betting_market_id: market.to_string(),
        bet_side: side.to_string(),
        odds,
        stake,
        profit,
        liability,
    }
}
