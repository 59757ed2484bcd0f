//! Date/time recognition for raw cells.
//!
//! Only explicit patterns are accepted: ISO-8601, slash/dash/dot separated
//! dates, month names, compact `YYYYMMDD` stamps and year-month values. Bare
//! numbers never parse as dates here.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

// US month-first is tried before day-first, so ambiguous values like
// 03/04/2024 read as March 4.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y-%b-%d",
    "%m/%d/%y",
];

const MONTH_YEAR_FORMATS: &[&str] = &["%b %Y", "%B %Y", "%b-%Y", "%B-%Y"];

/// Parse a cell into a timestamp, trying every supported pattern.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.len() < 6 || !value.bytes().any(|byte| byte.is_ascii_digit()) {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }
    if let Some(dt) = try_parse_datetime(value) {
        return Some(dt);
    }
    if let Some(date) = try_parse_date(value) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Some(date) = parse_compact_date(value) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    try_parse_year_month(value).map(|date| date.and_time(NaiveTime::MIN))
}

/// Parse a cell and require its year to fall inside `min_year..=max_year`.
pub fn parse_plausible_datetime(raw: &str, min_year: i32, max_year: i32) -> Option<NaiveDateTime> {
    parse_datetime(raw).filter(|dt| (min_year..=max_year).contains(&dt.year()))
}

/// Parse an 8-digit `YYYYMMDD` stamp.
pub fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.len() != 8 || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let year: i32 = trimmed[0..4].parse().ok()?;
    let month: u32 = trimmed[4..6].parse().ok()?;
    let day: u32 = trimmed[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn try_parse_year_month(value: &str) -> Option<NaiveDate> {
    // YYYY-MM and YYYY/MM
    if value.len() == 7 && matches!(value.as_bytes()[4], b'-' | b'/') {
        let year = value[0..4].parse::<i32>().ok()?;
        let month = value[5..7].parse::<u32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    MONTH_YEAR_FORMATS.iter().find_map(|fmt| {
        // chrono needs a day to build a date, so pin it to the first.
        NaiveDate::parse_from_str(&format!("1 {value}"), &format!("%d {fmt}")).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid date")
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn parses_common_date_shapes() {
        assert_eq!(parse_datetime("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime("01/15/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime("15.01.2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime("Jan 15, 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime("20240115"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime("2024-03"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_datetime("March 2024"), Some(ymd(2024, 3, 1)));
        assert!(parse_datetime("2024-01-15T10:30:00Z").is_some());
        assert!(parse_datetime("2024-01-15 10:30").is_some());
    }

    #[test]
    fn bare_numbers_are_not_dates() {
        assert_eq!(parse_datetime("42"), None);
        assert_eq!(parse_datetime("2024"), None);
        assert_eq!(parse_datetime("123456"), None);
        assert_eq!(parse_datetime("hello world"), None);
    }

    #[test]
    fn plausible_range_filters_years() {
        assert!(parse_plausible_datetime("1850-06-01", 1900, 2100).is_none());
        assert!(parse_plausible_datetime("1950-06-01", 1900, 2100).is_some());
        assert!(parse_compact_date("20241301").is_none());
    }
}
