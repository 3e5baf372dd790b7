//! Formatting helpers shared by the command-line front end.

use chrono::NaiveDateTime;

/// Format a byte count with binary units (e.g., "1.0 KB").
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1} {}B", bytes as f64 / div as f64, PREFIXES[exp])
}

/// Format a catalog timestamp for display.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format an optional timestamp, or "Never" if missing.
pub fn format_timestamp_opt(ts: Option<&NaiveDateTime>) -> String {
    match ts {
        Some(ts) => format_timestamp(ts),
        None => "Never".to_string(),
    }
}
