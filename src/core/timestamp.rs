//! Timestamp normalization.
//!
//! Series from different sources may spell the same instant differently
//! (`2024-01-01T10:00:00Z`, `2024-01-01 10:00`, ...). Everything is keyed on
//! the canonical minute-precision form `YYYY-MM-DD HH:mm`, which is
//! zero-padded and therefore sorts lexicographically in time order.

use crate::error::{ReconcileError, Result};
use chrono::{DateTime, NaiveDateTime};

/// `chrono` format string of the canonical key.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Accepted layouts after the date/time separator has been unified to a space.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Length of a canonical key; any longer input is read by its leading minute.
const CANONICAL_LEN: usize = 16;

/// Normalize a timestamp to `YYYY-MM-DD HH:mm`.
///
/// Accepts a `T` or space separator, optional seconds and fractional seconds,
/// and any zone suffix (`Z`, `±HH:MM`, `±HHMM`, ` UTC`, ...). The wall-clock
/// reading is kept as written: an offset suffix is dropped, not applied.
///
/// # Example
/// ```
/// use load_reconcile::core::normalize_timestamp;
///
/// assert_eq!(normalize_timestamp("2024-01-01T10:05:59Z").unwrap(), "2024-01-01 10:05");
/// assert_eq!(normalize_timestamp(" 2024-01-01 10:05 ").unwrap(), "2024-01-01 10:05");
/// assert!(normalize_timestamp("yesterday").is_err());
/// ```
pub fn normalize_timestamp(raw: &str) -> Result<String> {
    parse_timestamp(raw)
        .map(|dt| dt.format(CANONICAL_FORMAT).to_string())
        .ok_or_else(|| ReconcileError::TimestampError(format!("unrecognized timestamp '{raw}'")))
}

/// Parse a timestamp into its wall-clock `NaiveDateTime`, if recognized.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    let unified = trimmed.replacen('T', " ", 1);
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&unified, fmt).ok())
        .or_else(|| {
            // Seconds and zone spellings chrono has no layout for: the leading
            // minute is the whole key.
            unified
                .get(..CANONICAL_LEN)
                .and_then(|minute| NaiveDateTime::parse_from_str(minute, CANONICAL_FORMAT).ok())
        })
}

/// Merge key for a timestamp.
///
/// Falls back to the trimmed raw string when the timestamp cannot be
/// normalized, so a malformed point keeps a bucket of its own instead of
/// being dropped.
pub fn timestamp_key(raw: &str) -> String {
    match normalize_timestamp(raw) {
        Ok(key) => key,
        Err(_) => {
            tracing::warn!(timestamp = raw, "keeping unnormalizable timestamp as its own key");
            raw.trim().to_string()
        }
    }
}

/// Time-of-day part of a key (`HH:mm`), or the whole key when it has none.
pub fn display_time(key: &str) -> &str {
    key.split_once(' ')
        .map(|(_, time)| time)
        .filter(|time| !time.is_empty())
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_is_unchanged() {
        assert_eq!(
            normalize_timestamp("2024-03-05 07:30").unwrap(),
            "2024-03-05 07:30"
        );
    }

    #[test]
    fn iso_separator_and_seconds_are_normalized() {
        assert_eq!(
            normalize_timestamp("2024-03-05T07:30").unwrap(),
            "2024-03-05 07:30"
        );
        assert_eq!(
            normalize_timestamp("2024-03-05T07:30:45").unwrap(),
            "2024-03-05 07:30"
        );
        assert_eq!(
            normalize_timestamp("2024-03-05 07:30:45.123").unwrap(),
            "2024-03-05 07:30"
        );
    }

    #[test]
    fn zone_suffix_is_dropped_not_applied() {
        assert_eq!(
            normalize_timestamp("2024-03-05T07:30:00Z").unwrap(),
            "2024-03-05 07:30"
        );
        assert_eq!(
            normalize_timestamp("2024-03-05T07:30:00+02:00").unwrap(),
            "2024-03-05 07:30"
        );
    }

    #[test]
    fn other_zone_spellings_are_truncated_to_the_minute() {
        for raw in [
            "2024-03-05T07:30Z",
            "2024-03-05T07:30:00+0000",
            "2024-03-05 07:30:00 UTC",
            "2024-03-05T07:30:00.5-0500",
        ] {
            assert_eq!(normalize_timestamp(raw).unwrap(), "2024-03-05 07:30", "{raw}");
        }
    }

    #[test]
    fn malformed_timestamp_is_an_error() {
        assert!(matches!(
            normalize_timestamp("not a time"),
            Err(ReconcileError::TimestampError(_))
        ));
        assert!(normalize_timestamp("2024-13-40 99:99").is_err());
        assert!(normalize_timestamp("").is_err());
        assert!(normalize_timestamp("2024-03-05T07 UTC").is_err());
    }

    #[test]
    fn key_falls_back_to_trimmed_raw() {
        assert_eq!(timestamp_key("  hour 7 "), "hour 7");
        assert_eq!(timestamp_key("2024-03-05T07:30:00"), "2024-03-05 07:30");
    }

    #[test]
    fn display_time_takes_time_of_day() {
        assert_eq!(display_time("2024-03-05 07:30"), "07:30");
        assert_eq!(display_time("hour7"), "hour7");
    }
}
