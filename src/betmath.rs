//! Bet economics formulas.
//!
//! Summary of formulas:
//!   Stake = Profit / (Odds - 1)
//!   Backer's Stake = Liability / (Odds - 1)
//!   Profit = Stake * (Odds - 1)
//!   Liability = Backer's Stake * (Odds - 1)
//!   Payout = Backer's Stake * Odds

use crate::currency::{to_fixed, BetField, CurrencyFloat, CurrencyFormatter, Denomination};
use crate::traits::Bet;
use crate::types::{BestOffer, BetRecord, BetSide, GroupedBets, GroupedSideBets};
use crate::types::{MatchedBet, NormalizedBet};
use crate::validate;

/// Odds precision (display places)
pub const ODDS_PLACES: usize = 2;
/// Stake / backer's stake precision, base units
pub const STAKE_PLACES: usize = 3;
/// Exposure / profit / liability precision, base units
pub const EXPOSURE_PLACES: usize = ODDS_PLACES + STAKE_PLACES;

fn formula_inputs_valid(amount: CurrencyFloat, odds: CurrencyFloat) -> bool {
    amount.is_finite() && !validate::odds_below_floor(odds)
}

/// Stake = Profit / (Odds - 1)
pub fn stake_from_profit(
    odds: CurrencyFloat,
    profit: CurrencyFloat,
    formatter: &CurrencyFormatter,
    denomination: Denomination,
) -> Option<String> {
    if !formula_inputs_valid(profit, odds) {
        return None;
    }
    Some(formatter.format(profit / (odds - 1.0), BetField::Stake, denomination))
}

/// Profit = Stake * (Odds - 1); liability reads the same for a lay.
pub fn profit_or_liability_from_stake(
    stake: CurrencyFloat,
    odds: CurrencyFloat,
    formatter: &CurrencyFormatter,
    denomination: Denomination,
) -> Option<String> {
    if !formula_inputs_valid(stake, odds) {
        return None;
    }
    Some(formatter.format(stake * (odds - 1.0), BetField::Exposure, denomination))
}

/// Payout = Backer's Stake * Odds
pub fn payout(
    stake: CurrencyFloat,
    odds: CurrencyFloat,
    formatter: &CurrencyFormatter,
    denomination: Denomination,
) -> Option<String> {
    if !formula_inputs_valid(stake, odds) {
        return None;
    }
    Some(formatter.format(stake * odds, BetField::Exposure, denomination))
}

/// Net exposure of one market across the whole slip.
///
/// Matching a bet moves every selection of the event at once: the market
/// the bet originates from takes +profit (back) or -liability (lay), and
/// every other market takes -stake (back) or +backer's stake (lay).
pub fn market_exposure(
    market_id: &str,
    bets: &[BetRecord],
    formatter: &CurrencyFormatter,
    denomination: Denomination,
) -> String {
    let mut exposure: CurrencyFloat = 0.0;
    for bet in bets {
        if !validate::bet_usable(bet) {
            continue;
        }
        let (stake, profit, liability) = match (bet.stake, bet.profit, bet.liability) {
            (Some(stake), Some(profit), Some(liability)) => (stake, profit, liability),
            _ => continue,
        };
        exposure += if bet.market_id() == market_id {
            match bet.side() {
                BetSide::Back => profit,
                BetSide::Lay => -liability,
            }
        } else {
            match bet.side() {
                BetSide::Back => -stake,
                BetSide::Lay => stake,
            }
        };
    }
    formatter.format(exposure, BetField::Exposure, denomination)
}

/// Combined market and betslip exposure. Both inputs are already in
/// display units, so the sum is fixed without currency conversion.
pub fn potential_exposure(
    market_exposure: CurrencyFloat,
    betslip_exposure: CurrencyFloat,
) -> String {
    to_fixed(market_exposure + betslip_exposure, EXPOSURE_PLACES)
}

/// Book percentage: sum of 100 / odds over the best offer of each
/// selection, rounded to the nearest whole percent.
pub fn book_percentage(best_offers: &[BestOffer]) -> i64 {
    let total: CurrencyFloat = best_offers
        .iter()
        .filter_map(|offer| offer.odds)
        .filter(|&odds| !validate::odds_below_floor(odds))
        .map(|odds| 100.0 / odds)
        .sum();
    total.round() as i64
}

/// Betslip running total: back stakes plus lay liabilities.
pub fn betslip_total(
    bets: &[BetRecord],
    formatter: &CurrencyFormatter,
    denomination: Denomination,
) -> String {
    let total = bets
        .iter()
        .filter(|bet| validate::bet_usable(bet))
        .fold(0.0, |total, bet| match bet.side() {
            BetSide::Back => total + bet.stake.unwrap_or(0.0),
            BetSide::Lay => total + bet.liability.unwrap_or(0.0),
        });
    formatter.format(total, BetField::Exposure, denomination)
}

/// Grouped totals and average odds over matched bets in raw minor units.
///
/// Average Odds (2 places) = (sum stake + sum profit) / sum stake.
/// Returns `None` when no usable stake accumulated, since the average
/// divides by the grouped stake.
pub fn average_odds_from_matched_bets(
    matched_bets: &[MatchedBet],
    formatter: &CurrencyFormatter,
    denomination: Denomination,
    scale_exponent: u32,
) -> Option<GroupedBets> {
    let mut grouped_stake: CurrencyFloat = 0.0;
    let mut grouped_profit: CurrencyFloat = 0.0;
    let mut grouped_liability: CurrencyFloat = 0.0;
    for bet in matched_bets {
        if bet.amount_to_bet <= 0 || bet.amount_to_win <= 0 {
            continue;
        }
        let normalized = bet.normalized(scale_exponent);
        grouped_stake += normalized.stake;
        grouped_profit += normalized.profit;
        grouped_liability += normalized.liability;
    }
    if grouped_stake == 0.0 {
        return None;
    }
    let average_odds = (grouped_stake + grouped_profit) / grouped_stake;
    Some(GroupedBets {
        average_odds: to_fixed(average_odds, ODDS_PLACES),
        grouped_profit: formatter.format(
            grouped_profit,
            BetField::AvgProfitLiability,
            denomination,
        ),
        grouped_liability: formatter.format(
            grouped_liability,
            BetField::AvgProfitLiability,
            denomination,
        ),
        grouped_stake: formatter.format(grouped_stake, BetField::AvgStake, denomination),
    })
}

/// Simplified average-odds fold over matched bets that share one side and
/// already carry normalized amounts. The win amount summed is the
/// side-appropriate one: profit for back bets, liability for lay bets.
pub fn average_odds_from_normalized_bets(
    matched_bets: &[NormalizedBet],
    formatter: &CurrencyFormatter,
    denomination: Denomination,
) -> Option<GroupedSideBets> {
    let side = matched_bets.first()?.bet_side;
    let mut grouped_stake: CurrencyFloat = 0.0;
    let mut grouped_profit_or_liability: CurrencyFloat = 0.0;
    for bet in matched_bets {
        let win = match side {
            BetSide::Back => bet.profit,
            BetSide::Lay => bet.liability,
        };
        if !bet.stake.is_finite() || bet.stake == 0.0 || !win.is_finite() || win == 0.0 {
            continue;
        }
        grouped_stake += bet.stake;
        grouped_profit_or_liability += win;
    }
    if grouped_stake == 0.0 {
        return None;
    }
    let average_odds = (grouped_stake + grouped_profit_or_liability) / grouped_stake;
    Some(GroupedSideBets {
        average_odds: to_fixed(average_odds, ODDS_PLACES),
        grouped_profit_or_liability: formatter.format(
            grouped_profit_or_liability,
            BetField::AvgProfitLiability,
            denomination,
        ),
        grouped_stake: formatter.format(grouped_stake, BetField::AvgStake, denomination),
    })
}
