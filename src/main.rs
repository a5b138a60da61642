//! salesagg entry point: parses CLI, initializes logging, and starts the
//! scheduler loop. The main function is intentionally thin and delegates to
//! the loop in `scheduler`.

mod aggregate;
mod app;
mod batch;
mod cli;
mod event;
mod filter;
mod log;
mod parse;
mod scheduler;
mod writer;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = cli::parse();
    let clock = scheduler::SystemClock::from_offset_hours(config.utc_offset_hours)?;
    scheduler::run(config, clock).await
}
