//! Calendar-date formatting shared by the normalizers.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::NormalizeError;

/// Formats a timestamp as a calendar date without time of day,
/// e.g. `Tue Jan 15 2019`.
#[must_use]
pub fn date_string(time: DateTime<Utc>) -> String {
    time.format("%a %b %d %Y").to_string()
}

/// Converts Unix epoch seconds into a calendar date string.
pub fn date_string_from_unix(
    field: &'static str,
    seconds: i64,
) -> Result<String, NormalizeError> {
    DateTime::from_timestamp(seconds, 0)
        .map(date_string)
        .ok_or_else(|| NormalizeError::InvalidField {
            field,
            reason: format!("timestamp {seconds} is out of range"),
        })
}

/// Reformats a `YYYY-MM-DD HH:MM:SS` timestamp (UTC) as a calendar date string.
pub fn date_string_from_datetime(
    field: &'static str,
    value: &str,
) -> Result<String, NormalizeError> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M:%S")
        .map(|naive| date_string(naive.and_utc()))
        .map_err(|e| NormalizeError::InvalidField {
            field,
            reason: format!("{value:?}: {e}"),
        })
}
