//! Record parser: turns one raw log line into a `LogEvent`, or nothing.
//!
//! A line is a fixed-width timestamp, a `|`, and a pipe-delimited payload:
//!
//! ```text
//! 2024/11/18 09:00:00|buy|Widget|2|9.99|route-1
//! ```
//!
//! Malformed lines yield `None`; parse failures are never fatal and never
//! surface as partially-filled events.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::event::LogEvent;

/// Byte length of the leading `YYYY/MM/DD HH:mm:ss` region.
const TIMESTAMP_LEN: usize = 19;
/// Positional payload fields: action, product, quantity, unit price, route.
const PAYLOAD_FIELDS: usize = 5;

fn timestamp_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}$").expect("literal pattern")
    })
}

/// Parses one raw line. Returns `None` for any malformed input: bad or
/// missing timestamp, fewer than five payload fields, non-numeric quantity
/// or price, or an empty product. Fields are trimmed before use; payload
/// fields past the fifth are ignored.
pub fn parse_line(line: &str) -> Option<LogEvent> {
    let ts_text = line.get(..TIMESTAMP_LEN)?;
    if !timestamp_shape().is_match(ts_text) {
        return None;
    }
    let timestamp = NaiveDateTime::parse_from_str(ts_text, "%Y/%m/%d %H:%M:%S").ok()?;

    // The split point between regions must itself be a delimiter.
    if line.as_bytes().get(TIMESTAMP_LEN) != Some(&b'|') {
        return None;
    }
    let payload = &line[TIMESTAMP_LEN + 1..];
    let fields: Vec<&str> = payload.split('|').map(str::trim).collect();
    if fields.len() < PAYLOAD_FIELDS {
        return None;
    }

    let quantity: u32 = fields[2].parse().ok()?;
    let unit_price: f64 = fields[3].parse().ok()?;
    if !unit_price.is_finite() || unit_price < 0.0 {
        return None;
    }
    let product = fields[1];
    if product.is_empty() {
        return None;
    }

    Some(LogEvent {
        timestamp,
        action: fields[0].to_string(),
        product: product.to_string(),
        quantity,
        unit_price,
        route: fields[4].to_string(),
    })
}
