//! Interval marker helpers
//!
//! Streak intervals are identified by opaque "YYYY-MM-DD" day markers.
//! The streak engines only compare markers for equality; these helpers
//! exist so the calling layer has a canonical way to produce them.

use chrono::{DateTime, Datelike, Utc};

/// Compute the day marker string from a Unix timestamp in milliseconds.
///
/// Returns a string in format "YYYY-MM-DD".
pub fn day_marker(timestamp_ms: i64) -> String {
    let dt = DateTime::from_timestamp_millis(timestamp_ms).unwrap_or_else(Utc::now);
    format!("{:04}-{:02}-{:02}", dt.year(), dt.month(), dt.day())
}

/// Get the current day marker (UTC).
pub fn current_day_marker() -> String {
    day_marker(Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_marker() {
        // 2023-12-28 12:34:56 UTC
        let ts = 1703766896000i64;
        assert_eq!(day_marker(ts), "2023-12-28");
    }

    #[test]
    fn test_day_marker_zero_pads() {
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        assert_eq!(day_marker(ts), "2024-03-05");
    }
}
