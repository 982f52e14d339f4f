use std::io;

use structopt::StructOpt;

use betting_engine_example::rand::generate_random_valid_bet_sequence;
use betting_engine_example::types::CurrencyFloat;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "generate-bets",
    version = "0.1",
    about = "Generate random valid bet records for the betting engine."
)]
struct CliOpts {
    /// Number of bets to generate.
    /// Defaults to infinite (run until cancelled)
    #[structopt(short, long)]
    bets: Option<u64>,

    /// Number of betting markets to spread bets across.
    #[structopt(short, long, default_value = "10")]
    markets: u16,

    /// Maximum stake per bet, in base units.
    #[structopt(short, long, default_value = "1.0")]
    stake: CurrencyFloat,
}

fn generate_bets(num_bets: Option<u64>, max_market: u16, max_stake: CurrencyFloat) {
    // Write to stdout
    let output = io::stdout();
    let mut writer = csv::Writer::from_writer(output);

    for row in generate_random_valid_bet_sequence(num_bets, max_market, max_stake) {
        if let Err(err) = writer.serialize(row) {
            log::error!("Error writing generated bet: {}", err);
        }
    }

    if let Err(err) = writer.flush() {
        log::error!("Error flushing generated bets: {}", err);
    }
}

fn main() {
    // Allow log level to be set via env vars without recompiling
    env_logger::init();

    // Parse arguments
    let CliOpts {
        bets,
        markets,
        stake,
    } = CliOpts::from_args();

    generate_bets(bets, markets, stake);
}
