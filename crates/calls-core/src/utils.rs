//! Formatting and parsing helpers for the calls history

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone};
use std::fmt::Display;

/// Format a duration in seconds as human readable text, e.g. `1 minute 5 seconds`
#[must_use]
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    let parts: Vec<String> = [(hours, "hour"), (minutes, "minute"), (secs, "second")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| plural(value, unit))
        .collect();

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(" ")
    }
}

fn plural(value: u64, unit: &str) -> String {
    if value == 1 {
        format!("{value} {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

/// Convert a call duration in milliseconds to whole seconds
#[must_use]
pub const fn millis_to_seconds(duration_ms: u64) -> u64 {
    duration_ms / 1000
}

/// Absolute date and time of a call, e.g. `Mar 15, 2024 14:25`
#[must_use]
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%b %-d, %Y %H:%M").to_string()
}

/// Calendar day label used to bucket calls, e.g. `March 15, 2024`
#[must_use]
pub fn format_in_calendar_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Current offset of the local time zone (the browser's, on wasm32)
#[must_use]
pub fn local_utc_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Resolve the `page` query parameter to a 1-based page number
///
/// Missing, non-numeric and zero values all fall back to the first page.
#[must_use]
pub fn parse_page_param(raw: Option<&str>) -> u32 {
    raw.map(str::trim)
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0 seconds")]
    #[case(1, "1 second")]
    #[case(59, "59 seconds")]
    #[case(60, "1 minute")]
    #[case(65, "1 minute 5 seconds")]
    #[case(3600, "1 hour")]
    #[case(3725, "1 hour 2 minutes 5 seconds")]
    #[case(7260, "2 hours 1 minute")]
    fn test_format_duration(#[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(format_duration(seconds), expected);
    }

    #[test]
    fn test_millis_to_seconds_truncates() {
        assert_eq!(millis_to_seconds(0), 0);
        assert_eq!(millis_to_seconds(999), 0);
        assert_eq!(millis_to_seconds(65_400), 65);
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap();
        assert_eq!(format_date(&date), "Mar 5, 2024 09:07");
    }

    #[test]
    fn test_dates_render_at_the_given_offset() {
        let date = Utc.with_ymd_and_hms(2024, 3, 16, 2, 30, 0).unwrap();
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        let local = date.with_timezone(&new_york);

        assert_eq!(format_date(&local), "Mar 15, 2024 21:30");
        assert_eq!(format_in_calendar_date(&local), "March 15, 2024");
    }

    #[test]
    fn test_local_offset_is_a_valid_offset() {
        let offset = local_utc_offset();
        assert!(offset.local_minus_utc().abs() < 24 * 3600);
    }

    #[test]
    fn test_format_in_calendar_date_ignores_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 1).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap();

        assert_eq!(format_in_calendar_date(&morning), "March 15, 2024");
        assert_eq!(
            format_in_calendar_date(&morning),
            format_in_calendar_date(&evening)
        );
    }

    #[rstest]
    #[case(None, 1)]
    #[case(Some(""), 1)]
    #[case(Some("abc"), 1)]
    #[case(Some("0"), 1)]
    #[case(Some("-3"), 1)]
    #[case(Some("2.5"), 1)]
    #[case(Some("1"), 1)]
    #[case(Some("7"), 7)]
    #[case(Some(" 12 "), 12)]
    fn test_parse_page_param(#[case] raw: Option<&str>, #[case] expected: u32) {
        assert_eq!(parse_page_param(raw), expected);
    }

    proptest! {
        #[test]
        fn test_parse_page_param_never_below_one(raw in ".*") {
            prop_assert!(parse_page_param(Some(&raw)) >= 1);
        }

        #[test]
        fn test_parse_page_param_accepts_positive_numbers(page in 1u32..u32::MAX) {
            prop_assert_eq!(parse_page_param(Some(&page.to_string())), page);
        }

        #[test]
        fn test_format_duration_is_never_empty(seconds in 0u64..1_000_000) {
            prop_assert!(!format_duration(seconds).is_empty());
        }
    }
}
