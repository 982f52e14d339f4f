use crate::conversions;
use crate::state::BetSlip;
use crate::types::{BetError, RawBetRow};
use crate::validate;

/// Admit one raw row onto the bet slip.
///
/// Rows that cannot name a side, rows re-using an id already on the slip,
/// and rows quoting odds below the tick floor are rejected with a typed
/// error. Rows whose numeric fields are merely missing or unusable are
/// admitted; every aggregate fold skips them on its own.
pub fn handle_bet_record(row: RawBetRow, slip: &mut BetSlip) -> Result<(), BetError> {
    let bet = conversions::bet_from_row(row)?;
    validate::check_for_duplicate_bet_id(&bet, slip)?;
    if let Some(odds) = bet.odds {
        if odds.is_finite() && validate::odds_below_floor(odds) {
            return Err(BetError::OddsBelowFloor { id: bet.id, odds });
        }
    }
    slip.push(bet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::handle_bet_record;
    use crate::state::BetSlip;
    use crate::types::{BetError, RawBetRow};

    fn row(id: &str, side: &str, odds: Option<f64>) -> RawBetRow {
        RawBetRow {
            id: id.to_string(),
            betting_market_id: "1.105.1".to_string(),
            bet_side: side.to_string(),
            odds,
            stake: Some(0.1),
            profit: Some(0.1),
            liability: Some(0.1),
        }
    }

    #[test]
    fn test_admits_valid_rows() {
        let mut slip = BetSlip::new();
        assert_eq!(Ok(()), handle_bet_record(row("1.106.1", "back", Some(2.0)), &mut slip));
        assert_eq!(Ok(()), handle_bet_record(row("1.106.2", "Lay", Some(3.5)), &mut slip));
        assert_eq!(slip.len(), 2);
    }

    #[test]
    fn test_rejects_unknown_side() {
        let mut slip = BetSlip::new();
        assert_eq!(
            handle_bet_record(row("1.106.1", "draw", Some(2.0)), &mut slip),
            Err(BetError::UnknownBetSide {
                id: "1.106.1".to_string(),
                side: "draw".to_string(),
            })
        );
        assert!(slip.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let mut slip = BetSlip::new();
        handle_bet_record(row("1.106.1", "back", Some(2.0)), &mut slip).unwrap();
        assert_eq!(
            handle_bet_record(row("1.106.1", "lay", Some(3.0)), &mut slip),
            Err(BetError::DuplicateBetId {
                id: "1.106.1".to_string(),
            })
        );
        assert_eq!(slip.len(), 1);
    }

    #[test]
    fn test_rejects_off_ladder_odds() {
        let mut slip = BetSlip::new();
        assert_eq!(
            handle_bet_record(row("1.106.1", "back", Some(1.0)), &mut slip),
            Err(BetError::OddsBelowFloor {
                id: "1.106.1".to_string(),
                odds: 1.0,
            })
        );
        assert!(slip.is_empty());
    }

    #[test]
    fn test_admits_rows_with_unusable_numerics() {
        // Folds skip these later; admission keeps them for bookkeeping
        let mut slip = BetSlip::new();
        assert_eq!(Ok(()), handle_bet_record(row("1.106.1", "back", None), &mut slip));
        assert_eq!(
            Ok(()),
            handle_bet_record(row("1.106.2", "back", Some(f64::NAN)), &mut slip)
        );
        assert_eq!(slip.len(), 2);
    }
}
