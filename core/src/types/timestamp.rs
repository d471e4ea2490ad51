//! Timestamp strings stored on records and samples.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Renders `now` the way timestamps are stored, e.g. `2024-01-01T10:00:00.000Z`.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored timestamp.
///
/// Accepts RFC 3339, RFC 2822 (the HTTP date format the backend emits),
/// naive date-times (assumed UTC) and plain dates. Returns `None` for empty or
/// unrecognized text.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_format_uses_millis_and_z() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(now), "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_parses_supported_formats() {
        let cases = [
            "2024-01-02T03:04:05.000Z",
            "2024-01-02T03:04:05+00:00",
            "Tue, 02 Jan 2024 03:04:05 GMT",
            "2024-01-02 03:04:05",
            "2024-01-02T03:04:05.123456",
        ];
        for text in cases {
            let parsed = parse_timestamp(text).unwrap_or_else(|| panic!("failed on {text}"));
            assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 1, 2));
            assert_eq!(parsed.hour(), 3);
        }
    }

    #[test]
    fn test_plain_date_is_midnight() {
        let parsed = parse_timestamp("2023-12-25").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 12, 25, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
