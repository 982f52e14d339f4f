use crate::state::BetSlip;
use crate::traits::Bet;
use crate::types::{BetError, BetRecord, CurrencyFloat};

/// A numeric field is unusable when it is absent, zero, or not a finite
/// number.
pub fn numeric_invalid(value: Option<CurrencyFloat>) -> bool {
    match value {
        None => true,
        Some(v) => v == 0.0 || !v.is_finite(),
    }
}

/// Odds are quoted to two places; anything that rounds below 1.01 is off
/// the tick ladder.
pub fn odds_below_floor(odds: CurrencyFloat) -> bool {
    !odds.is_finite() || (odds * 100.0).round() < 101.0
}

/// Whether a slip record may contribute to aggregate calculations.
pub fn bet_usable(bet: &BetRecord) -> bool {
    if numeric_invalid(bet.odds)
        || numeric_invalid(bet.stake)
        || numeric_invalid(bet.profit)
        || numeric_invalid(bet.liability)
    {
        return false;
    }
    match bet.odds {
        Some(odds) => !odds_below_floor(odds),
        None => false,
    }
}

pub fn check_for_duplicate_bet_id(bet: &BetRecord, slip: &BetSlip) -> Result<(), BetError> {
    // NOTE: duplicate ids are discarded; the chain never re-issues one
    if slip.contains(bet.id()) {
        Err(BetError::DuplicateBetId {
            id: bet.id().to_string(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BetSide;

    fn record(odds: Option<f64>, stake: Option<f64>) -> BetRecord {
        BetRecord {
            id: "1.106.1".to_string(),
            betting_market_id: "1.105.1".to_string(),
            bet_side: BetSide::Back,
            odds,
            stake,
            profit: Some(0.1),
            liability: Some(0.1),
        }
    }

    #[test]
    fn test_numeric_invalid() {
        assert!(numeric_invalid(None));
        assert!(numeric_invalid(Some(0.0)));
        assert!(numeric_invalid(Some(f64::NAN)));
        assert!(numeric_invalid(Some(f64::INFINITY)));
        assert!(!numeric_invalid(Some(0.001)));
        assert!(!numeric_invalid(Some(-0.5)));
    }

    #[test]
    fn test_odds_below_floor() {
        assert!(odds_below_floor(1.0));
        assert!(odds_below_floor(1.005));
        assert!(odds_below_floor(f64::NAN));
        assert!(!odds_below_floor(1.01));
        // Rounds up onto the ladder
        assert!(!odds_below_floor(1.0149999));
        assert!(!odds_below_floor(20.0));
    }

    #[test]
    fn test_bet_usable() {
        assert!(bet_usable(&record(Some(2.0), Some(0.1))));
        assert!(!bet_usable(&record(None, Some(0.1))));
        assert!(!bet_usable(&record(Some(2.0), None)));
        assert!(!bet_usable(&record(Some(2.0), Some(0.0))));
        assert!(!bet_usable(&record(Some(2.0), Some(f64::NAN))));
        assert!(!bet_usable(&record(Some(1.0), Some(0.1))));
    }

    #[test]
    fn test_duplicate_bet_id() {
        let mut slip = BetSlip::new();
        let bet = record(Some(2.0), Some(0.1));
        assert_eq!(Ok(()), check_for_duplicate_bet_id(&bet, &slip));
        slip.push(bet.clone());
        assert_eq!(
            Err(BetError::DuplicateBetId {
                id: "1.106.1".to_string()
            }),
            check_for_duplicate_bet_id(&bet, &slip)
        );
    }
}
