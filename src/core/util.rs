//! Common utilities

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::SystemTime;

/// Get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Format a millisecond timestamp as RFC 3339 (UTC).
///
/// Out-of-range values fall back to the raw number.
pub fn format_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_positive() {
        assert!(now_ms() > 0);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(format_timestamp(3000), "1970-01-01T00:00:03.000Z");
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }
}
