//! ISO-8601 timestamp helpers
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Human-readable form of the accepted timestamp shape
pub const ISO8601_FORMAT_HINT: &str = "YYYY-MM-DDTHH:MM:SS(.sss)?(Z|[+-]HH:MM)?";

static ISO8601_REGEX: OnceLock<Regex> = OnceLock::new();

fn iso8601_regex() -> &'static Regex {
    ISO8601_REGEX.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{3})?(Z|[+-]\d{2}:\d{2})?$")
            .expect("ISO-8601 pattern is a valid regex")
    })
}

/// Check the shape of a timestamp. Does not check calendar validity.
pub fn is_valid_iso8601(value: &str) -> bool {
    iso8601_regex().is_match(value)
}

/// Parse a timestamp; a missing offset is read as UTC
pub fn parse_iso8601(value: &str) -> Option<DateTime<FixedOffset>> {
    if !is_valid_iso8601(value) {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Current UTC time, second precision
pub fn now_iso8601() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_shapes() {
        for value in [
            "2024-03-01T12:30:00Z",
            "2024-03-01T12:30:00.123Z",
            "2024-03-01T12:30:00+02:00",
            "2024-03-01T12:30:00",
        ] {
            assert!(is_valid_iso8601(value), "{value}");
        }
    }

    #[test]
    fn test_rejected_shapes() {
        for value in [
            "",
            "2024-03-01",
            "2024-03-01 12:30:00Z",
            "2024-03-01T12:30:00.12Z",
            "yesterday",
        ] {
            assert!(!is_valid_iso8601(value), "{value}");
        }
    }

    #[test]
    fn test_parse_with_and_without_offset() {
        let utc = parse_iso8601("2024-03-01T12:30:00").unwrap();
        let zulu = parse_iso8601("2024-03-01T12:30:00Z").unwrap();
        assert_eq!(utc, zulu);

        let shifted = parse_iso8601("2024-03-01T14:30:00+02:00").unwrap();
        assert_eq!(shifted, zulu);
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(parse_iso8601("2024-13-45T12:30:00Z").is_none());
    }

    #[test]
    fn test_now_is_valid() {
        let now = now_iso8601();
        assert!(is_valid_iso8601(&now));
        assert!(now.ends_with('Z'));
    }
}
