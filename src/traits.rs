use crate::types::{BetRecord, BetSide, MatchedBet};

/// Common surface over the bet-like records the engine reads.
pub trait Bet {
    fn id(&self) -> &str;
    fn market_id(&self) -> &str;
    fn side(&self) -> BetSide;
}

impl Bet for BetRecord {
    #[inline]
    fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    fn market_id(&self) -> &str {
        &self.betting_market_id
    }

    #[inline]
    fn side(&self) -> BetSide {
        self.bet_side
    }
}

impl Bet for MatchedBet {
    #[inline]
    fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    fn market_id(&self) -> &str {
        &self.betting_market_id
    }

    #[inline]
    fn side(&self) -> BetSide {
        self.back_or_lay
    }
}
