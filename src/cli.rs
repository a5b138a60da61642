use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Immutable configuration used by the scheduler and pipeline
#[derive(Debug, Clone)]
pub struct Config {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub utc_offset_hours: i32,
    pub interval: Duration,
}

/// User-facing CLI arguments (kept private to the CLI layer)
#[derive(Parser, Debug)]
#[command(name = "salesagg", version, about = "Hourly sales-log aggregation job")]
struct Args {
    /// Root directory containing hour-stamped (YYYYMMDDHH) batch directories
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    input_root: PathBuf,

    /// Directory that receives one summary file per processed hour
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    output_root: PathBuf,

    /// Fixed UTC offset, in hours, used to compute the current hour
    #[arg(long = "utc-offset", default_value_t = 1, value_parser = clap::value_parser!(i32).range(-23..=23))]
    utc_offset_hours: i32,

    /// Seconds to sleep between pipeline passes
    #[arg(long = "interval-secs", default_value_t = 3600)]
    interval_secs: u64,
}

/// Parse CLI options into an application Config
pub fn parse() -> Config {
    let args = Args::parse();
    Config {
        input_root: args.input_root,
        output_root: args.output_root,
        utc_offset_hours: args.utc_offset_hours,
        interval: Duration::from_secs(args.interval_secs),
    }
}
