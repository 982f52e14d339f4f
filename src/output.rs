use std::io;

use crate::betmath;
use crate::currency::{CurrencyFormatter, Denomination};
use crate::state::BetSlip;
use crate::types::MarketReportRecord;

/// Write the per-market exposure report, one row per market on the slip.
pub fn write_report<W: io::Write>(
    slip: &BetSlip,
    formatter: &CurrencyFormatter,
    denomination: Denomination,
    output_stream: W,
) {
    let mut writer = csv::Writer::from_writer(output_stream);
    for market in slip.markets() {
        let record = MarketReportRecord {
            market: market.clone(),
            bets: slip.market_bet_count(market),
            exposure: betmath::market_exposure(market, slip.bets(), formatter, denomination),
        };

        if let Err(err) = writer.serialize(&record) {
            log::error!("error writing serialized market report: {}", err);
        }
    }
    if let Err(err) = writer.flush() {
        log::error!("error flushing serialized market report: {}", err);
    }
}
