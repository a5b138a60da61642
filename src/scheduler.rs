//! Scheduler loop: one pipeline pass per tick, forever.
//!
//! The clock is injectable so a single pass can be exercised in tests with a
//! fixed point in time instead of waiting on the wall clock.

use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, Utc};
use tokio::time::sleep;
use tracing::{error, info};

use crate::app;
use crate::cli::Config;

/// Source of "now" for the scheduler.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock shifted into the configured fixed UTC offset.
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn from_offset_hours(hours: i32) -> Result<Self> {
        let offset = FixedOffset::east_opt(hours * 3600)
            .ok_or_else(|| anyhow!("invalid UTC offset: {hours}h"))?;
        Ok(SystemClock { offset })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Drives the pipeline indefinitely: run one pass, report it, sleep the
/// configured interval, repeat. A failed pass (e.g. the summary write) is
/// reported at error level and the next tick proceeds normally; nothing
/// short of stopping the process ends the loop.
pub async fn run(config: Config, clock: impl Clock) -> Result<()> {
    loop {
        match app::run_once(&config, clock.now()).await {
            Ok(report) => info!(
                stamp = %report.stamp,
                outcome = ?report.outcome,
                files = report.files,
                lines = report.lines,
                parsed = report.parsed,
                dropped = report.dropped,
                buys = report.buys,
                rows = report.rows,
                output = ?report.output,
                "pass finished"
            ),
            Err(err) => error!(error = %err, "pass failed"),
        }
        sleep(config.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_carries_the_configured_offset() {
        let clock = SystemClock::from_offset_hours(1).unwrap();
        assert_eq!(
            *clock.now().offset(),
            FixedOffset::east_opt(3600).unwrap()
        );
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(SystemClock::from_offset_hours(24).is_err());
        assert!(SystemClock::from_offset_hours(-24).is_err());
    }
}
