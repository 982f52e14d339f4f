use std::fs;
use std::io;
use std::path;

use structopt::StructOpt;

use betting_engine_example::currency::Denomination;
use betting_engine_example::process_bets;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "betting-engine-example",
    version = "0.1",
    about = "Simple engine to process streaming bet records from a betting exchange and write per-market exposures as output"
)]
struct CliOpts {
    /// Path to bets CSV file
    #[structopt(parse(from_os_str))]
    input_csv_path: path::PathBuf,

    /// Display denomination for report values ("base" or "milli")
    #[structopt(short, long, default_value = "base")]
    denomination: Denomination,

    /// Number of records per deserialization batch
    #[structopt(short, long, default_value = "1000")]
    batch_size: usize,
}

fn main() {
    // Allow log level to be set via env vars without recompiling
    env_logger::init();

    let opts = CliOpts::from_args();

    // Open file and process bets, writing the report to stdout
    if let Ok(input_file) = fs::File::open(&opts.input_csv_path) {
        process_bets(
            input_file,
            &mut io::stdout(),
            opts.denomination,
            opts.batch_size,
        );
    } else {
        log::error!(
            "Could not open input file '{}'",
            &opts.input_csv_path.to_str().unwrap_or("<invalid path>")
        );
    }
}
