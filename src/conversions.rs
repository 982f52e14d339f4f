use std::str::FromStr;

use crate::types::{BetError, BetRecord, BetSide, MatchedBet, NormalizedBet, RawBetRow};
use crate::types::CurrencyFloat;

impl FromStr for BetSide {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Chain data is inconsistent about casing ("Back" vs "back")
        match s.to_ascii_lowercase().as_str() {
            "back" => Ok(BetSide::Back),
            "lay" => Ok(BetSide::Lay),
            _ => Err(()),
        }
    }
}

impl BetSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetSide::Back => "back",
            BetSide::Lay => "lay",
        }
    }
}

/// Upgrade a raw row to a slip record, resolving the side string.
pub fn bet_from_row(row: RawBetRow) -> Result<BetRecord, BetError> {
    match row.bet_side.parse() {
        Ok(side) => Ok(BetRecord {
            id: row.id,
            betting_market_id: row.betting_market_id,
            bet_side: side,
            odds: row.odds,
            stake: row.stake,
            profit: row.profit,
            liability: row.liability,
        }),
        Err(()) => Err(BetError::UnknownBetSide {
            id: row.id,
            side: row.bet_side,
        }),
    }
}

// Convert back to the wire form for the sake of serializing generated bets

impl From<BetRecord> for RawBetRow {
    fn from(bet: BetRecord) -> Self {
        Self {
            id: bet.id,
            betting_market_id: bet.betting_market_id,
            bet_side: bet.bet_side.as_str().to_string(),
            odds: bet.odds,
            stake: bet.stake,
            profit: bet.profit,
            liability: bet.liability,
        }
    }
}

impl MatchedBet {
    /// Convert raw minor-unit amounts into the normalized form.
    ///
    /// For a back bet the amount risked is the stake and the amount won is
    /// the profit; for a lay bet the amount won is the backer's stake and
    /// the amount risked is the liability.
    pub fn normalized(&self, scale_exponent: u32) -> NormalizedBet {
        let scale = (10.0 as CurrencyFloat).powi(scale_exponent as i32);
        let amount_to_bet = self.amount_to_bet as CurrencyFloat / scale;
        let amount_to_win = self.amount_to_win as CurrencyFloat / scale;
        match self.back_or_lay {
            BetSide::Back => NormalizedBet {
                bet_side: BetSide::Back,
                stake: amount_to_bet,
                profit: amount_to_win,
                liability: amount_to_win,
            },
            BetSide::Lay => NormalizedBet {
                bet_side: BetSide::Lay,
                stake: amount_to_win,
                profit: amount_to_bet,
                liability: amount_to_bet,
            },
        }
    }
}
