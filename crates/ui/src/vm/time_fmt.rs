use chrono::{DateTime, Local, Utc};

use quiz_core::time::format_mmss;

/// Countdown label, e.g. `Time left: 4:05`.
#[must_use]
pub fn format_remaining(seconds: u32) -> String {
    format!("Time left: {}", format_mmss(u64::from(seconds)))
}

/// Elapsed label, e.g. `Time taken: 12:30`.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    format!("Time taken: {}", format_mmss(seconds))
}

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
