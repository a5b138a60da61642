//! Value types flowing through the pipeline: a parsed log event, the
//! hour-granular grouping key, and one aggregated output row.

use std::fmt;

use chrono::{Duration, NaiveDateTime, Timelike};

/// One structured log entry, owned by a single pipeline pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub timestamp: NaiveDateTime,
    pub action: String,
    pub product: String,
    pub quantity: u32,
    pub unit_price: f64,
    /// Not used by aggregation; carried for forward compatibility.
    pub route: String,
}

impl LogEvent {
    pub fn revenue(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// A timestamp truncated to hour precision. Formats as `yyyy/MM/dd HH`,
/// which is zero-padded and therefore sorts the same lexically and
/// chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourBucket(NaiveDateTime);

impl HourBucket {
    pub fn of(ts: NaiveDateTime) -> Self {
        let into_hour = Duration::seconds(i64::from(ts.minute() * 60 + ts.second()))
            + Duration::nanoseconds(i64::from(ts.nanosecond()));
        HourBucket(ts - into_hour)
    }
}

impl fmt::Display for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y/%m/%d %H"))
    }
}

/// One output record: total revenue for a (hour, product) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub hour: HourBucket,
    pub product: String,
    pub total_revenue: f64,
}
