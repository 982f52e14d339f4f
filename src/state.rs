use std::collections::{BTreeSet, HashSet};

use crate::traits::Bet;
use crate::types::{BetRecord, MarketId};

/// The set of open positions a report is computed over.
///
/// Records are kept verbatim in arrival order; aggregate folds decide per
/// calculation whether a record is usable.
#[derive(Debug, Default)]
pub struct BetSlip {
    bets: Vec<BetRecord>,
    ids: HashSet<String>,
    markets: BTreeSet<MarketId>,
}

impl BetSlip {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, bet: BetRecord) {
        self.ids.insert(bet.id().to_string());
        self.markets.insert(bet.betting_market_id.clone());
        self.bets.push(bet);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn bets(&self) -> &[BetRecord] {
        &self.bets
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    /// Markets in stable order, for deterministic report output.
    pub fn markets(&self) -> impl Iterator<Item = &MarketId> {
        self.markets.iter()
    }

    pub fn market_bet_count(&self, market: &str) -> usize {
        self.bets
            .iter()
            .filter(|bet| bet.betting_market_id == market)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::BetSlip;
    use crate::types::{BetRecord, BetSide};

    fn bet(id: &str, market: &str) -> BetRecord {
        BetRecord {
            id: id.to_string(),
            betting_market_id: market.to_string(),
            bet_side: BetSide::Back,
            odds: Some(2.0),
            stake: Some(0.1),
            profit: Some(0.1),
            liability: Some(0.1),
        }
    }

    #[test]
    fn test_markets_are_sorted_and_deduplicated() {
        let mut slip = BetSlip::new();
        slip.push(bet("1.106.3", "1.105.2"));
        slip.push(bet("1.106.1", "1.105.1"));
        slip.push(bet("1.106.2", "1.105.1"));

        let markets: Vec<_> = slip.markets().cloned().collect();
        assert_eq!(markets, vec!["1.105.1".to_string(), "1.105.2".to_string()]);
        assert_eq!(slip.market_bet_count("1.105.1"), 2);
        assert_eq!(slip.market_bet_count("1.105.2"), 1);
        assert_eq!(slip.len(), 3);
        assert!(slip.contains("1.106.2"));
        assert!(!slip.contains("1.106.9"));
    }
}
