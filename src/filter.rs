//! Event filter: only purchase events reach aggregation.

use crate::event::LogEvent;

/// The single action token that survives filtering. Exact, case-sensitive.
pub const BUY_ACTION: &str = "buy";

pub fn is_buy(event: &LogEvent) -> bool {
    event.action == BUY_ACTION
}
