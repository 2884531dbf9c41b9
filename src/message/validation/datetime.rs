//! ISO 8601 timestamp checks and normalisation.
//!
//! Accepted inputs are RFC 3339 strings carrying an offset (or `Z`), naive
//! `YYYY-MM-DDTHH:MM:SS[.fff]` strings which are read as UTC, and
//! [`chrono::DateTime<Utc>`] values. All of them normalise to UTC with
//! millisecond precision, e.g. `2020-06-03T04:00:00.000Z`.

use chrono::{DateTime, NaiveDateTime, Utc};

const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a timestamp string into a UTC datetime.
#[must_use]
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
}

/// Returns `true` when the string is an acceptable ISO 8601 timestamp.
#[must_use]
pub fn check_datetime(value: &str) -> bool {
    parse_datetime(value).is_some()
}

/// Formats a UTC datetime in the canonical wire representation.
#[must_use]
pub fn to_iso_format(datetime: &DateTime<Utc>) -> String {
    datetime.format(CANONICAL_FORMAT).to_string()
}

/// Normalises a timestamp string to the canonical wire representation.
#[must_use]
pub fn normalize_datetime(value: &str) -> Option<String> {
    parse_datetime(value).map(|datetime| to_iso_format(&datetime))
}
