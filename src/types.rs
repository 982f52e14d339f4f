use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display};

use crate::currency::{BetField, Denomination};
pub use crate::currency::CurrencyFloat;

/// Opaque blockchain object id, e.g. "1.106.2"
pub type BetId = String;
/// Opaque betting market id, e.g. "1.105.12"
pub type MarketId = String;

/// A single row in the final per-market report CSV
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct MarketReportRecord {
    /// Id of the betting market
    pub market: MarketId,
    /// Number of bets admitted for this market
    pub bets: usize,
    /// Net exposure of this market across the whole bet slip
    pub exposure: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BetError {
    UnknownBetSide { id: BetId, side: String },
    OddsBelowFloor { id: BetId, odds: CurrencyFloat },
    DuplicateBetId { id: BetId },
}

impl Display for BetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self, f)
    }
}

impl Error for BetError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatError {
    NonFinite,
    UnknownPrecision {
        field: BetField,
        denomination: Denomination,
    },
}

impl Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self, f)
    }
}

impl Error for FormatError {}

// Bet structs

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BetSide {
    Back,
    Lay,
}

/// A bet as it arrives from the data layer: plain keyed fields, none of
/// which are guaranteed to be present or sensible.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawBetRow {
    pub id: BetId,
    #[serde(rename = "market")]
    pub betting_market_id: MarketId,
    #[serde(rename = "side")]
    pub bet_side: String,
    pub odds: Option<CurrencyFloat>,
    pub stake: Option<CurrencyFloat>,
    pub profit: Option<CurrencyFloat>,
    pub liability: Option<CurrencyFloat>,
}

/// An open position on the bet slip. Values are kept as supplied;
/// aggregate folds decide per calculation whether a record is usable.
#[derive(Debug, Clone, PartialEq)]
pub struct BetRecord {
    pub id: BetId,
    pub betting_market_id: MarketId,
    pub bet_side: BetSide,
    pub odds: Option<CurrencyFloat>,
    pub stake: Option<CurrencyFloat>,
    pub profit: Option<CurrencyFloat>,
    pub liability: Option<CurrencyFloat>,
}

/// A matched bet in raw integer minor units, scaled by the asset's
/// precision exponent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchedBet {
    pub id: BetId,
    pub betting_market_id: MarketId,
    pub back_or_lay: BetSide,
    pub amount_to_bet: i64,
    pub amount_to_win: i64,
}

/// A matched bet with amounts already converted out of minor units; the
/// form the app works with internally.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBet {
    pub bet_side: BetSide,
    pub stake: CurrencyFloat,
    pub profit: CurrencyFloat,
    pub liability: CurrencyFloat,
}

/// Best available offer for one selection of a market.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BestOffer {
    pub odds: Option<CurrencyFloat>,
}

/// Grouped totals over a list of matched bets, both sides mixed.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBets {
    pub average_odds: String,
    pub grouped_profit: String,
    pub grouped_liability: String,
    pub grouped_stake: String,
}

/// Grouped totals over matched bets that all share one side.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSideBets {
    pub average_odds: String,
    pub grouped_profit_or_liability: String,
    pub grouped_stake: String,
}
