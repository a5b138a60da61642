//! Hour aggregator: sums revenue per (hour bucket, product).
//!
//! The reducer is a plain sum, so it is commutative and associative; partial
//! aggregates built by concurrent workers can be merged in any order without
//! changing the result. No ordering is guaranteed on the emitted rows; the
//! output writer owns the final sort.

use std::collections::HashMap;

use crate::event::{AggregateRow, HourBucket, LogEvent};

#[derive(Debug, Default)]
pub struct HourAggregator {
    totals: HashMap<(HourBucket, String), f64>,
}

impl HourAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one (already filtered) event to its group.
    pub fn record(&mut self, event: &LogEvent) {
        let key = (HourBucket::of(event.timestamp), event.product.clone());
        *self.totals.entry(key).or_insert(0.0) += event.revenue();
    }

    /// Folds another partial aggregate into this one, summing shared keys.
    pub fn merge(&mut self, other: HourAggregator) {
        for (key, revenue) in other.totals {
            *self.totals.entry(key).or_insert(0.0) += revenue;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Drains the groups into rows, in no particular order.
    pub fn into_rows(self) -> Vec<AggregateRow> {
        self.totals
            .into_iter()
            .map(|((hour, product), total_revenue)| AggregateRow {
                hour,
                product,
                total_revenue,
            })
            .collect()
    }
}
