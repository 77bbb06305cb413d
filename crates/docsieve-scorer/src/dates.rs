//! Lenient date parsing over the formats documents actually use.

use chrono::NaiveDate;

const FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m-%d-%y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d-%m-%Y",
    "%Y/%m/%d",
];

/// Try each known format in order; first successful parse wins.
///
/// US-style month-first formats sit before day-first ones, so an ambiguous
/// value like `01-02-2024` reads as January 2nd.
pub(crate) fn parse_loose(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_formats() {
        assert_eq!(
            parse_loose("01/15/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            parse_loose("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            parse_loose("January 15, 2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            parse_loose("Jan 15, 2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            parse_loose("15 January 2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_ambiguous_dates_read_month_first() {
        assert_eq!(
            parse_loose("01-02-2024"),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
    }

    #[test]
    fn test_day_first_when_month_first_is_impossible() {
        // 15 cannot be a month, so the day-first format picks it up
        assert_eq!(
            parse_loose("15/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_unparseable_input() {
        assert_eq!(parse_loose("not a date"), None);
        assert_eq!(parse_loose(""), None);
        assert_eq!(parse_loose("13/45/9999"), None);
    }
}
