//! Text formatting shared by the build and plagiarism views.

use chrono::{DateTime, FixedOffset};

/// Day-first timestamp layout used for build and push times.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Formats a percentage the way the dashboard shows it: integral values
/// without a fractional part (`35%`), others as-is (`12.5%`).
pub fn percent(value: f64) -> String {
    format!("{value}%")
}

/// Formats a timestamp in the offset the server reported it in.
pub fn timestamp(at: &DateTime<FixedOffset>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// `"<value> pts"`
pub fn points(value: f64) -> String {
    format!("{value} pts")
}
