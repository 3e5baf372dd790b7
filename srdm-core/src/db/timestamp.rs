//! Timestamp text encoding
//!
//! Catalog timestamps are stored as local wall-clock text. New values are
//! written as `YYYY-MM-DD HH:MM:SS.sss`, matching the column defaults, with
//! extra fractional digits only when the value carries sub-millisecond
//! precision. Either way the text sorts lexically in time order. Older files may hold
//! second-precision values, ISO `T`-separated values, or values carrying a
//! UTC offset; all of these are accepted on read.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};

const MILLIS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// 6 or 9 fractional digits, whichever holds the value exactly
const PRECISE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f %z"];

/// Render a timestamp for storage.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() % 1_000_000 == 0 {
        ts.format(MILLIS_FORMAT).to_string()
    } else {
        ts.format(PRECISE_FORMAT).to_string()
    }
}

/// Parse a stored timestamp, converting offset-carrying values to local
/// time. Returns `None` if no known layout matches.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
