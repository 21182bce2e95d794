//! Date and time parsing for the encodings seen in schedule exports.

use chrono::{NaiveDate, NaiveTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Parse a calendar date such as `2024-01-10`, `2024/1/10` or `2024.01.10`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a time of day such as `14:00`, `9:05` or `23:59:59`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_date_encodings() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10);

        assert_eq!(parse_date("2024-01-10"), expected);
        assert_eq!(parse_date("2024/01/10"), expected);
        assert_eq!(parse_date("2024/1/10"), expected);
        assert_eq!(parse_date(" 2024.01.10 "), expected);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("next tuesday"), None);
    }

    #[test]
    fn accepts_times_with_and_without_seconds() {
        assert_eq!(parse_time("14:00"), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(parse_time("9:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_time("23:59:59"), NaiveTime::from_hms_opt(23, 59, 59));
        assert_eq!(parse_time("25:00"), None);
    }
}
