//! Date normalization for user input and stored values

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Canonical storage format (ISO-8601 calendar date)
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Format accepted from users when creating a memo
pub const USER_FORMAT: &str = "MM/DD/YYYY";

fn user_date_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").unwrap())
}

/// A date string that could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse '{input}' as a date: {reason}")]
pub struct ParseError {
    input: String,
    reason: String,
}

impl ParseError {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseError {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// The rejected input, as supplied
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parse a user-supplied `MM/DD/YYYY` date into a naive calendar date.
///
/// Month and day must be two digits and the year four. Surrounding
/// whitespace is ignored. Impossible dates such as `02/30/2025` are rejected.
pub fn parse_user_date(input: &str) -> Result<NaiveDate, ParseError> {
    let caps = user_date_regex()
        .captures(input.trim())
        .ok_or_else(|| ParseError::new(input, format!("expected {}", USER_FORMAT)))?;

    // The regex only admits ASCII digits, so these parses cannot overflow.
    let month: u32 = caps[1].parse().unwrap_or(0);
    let day: u32 = caps[2].parse().unwrap_or(0);
    let year: i32 = caps[3].parse().unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ParseError::new(input, "no such calendar day"))
}

/// Format a date in canonical storage form (`YYYY-MM-DD`)
pub fn canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// Read a stored date value back into a calendar date.
///
/// Accepts the canonical `YYYY-MM-DD`, a naive ISO datetime such as
/// `2025-01-01T00:00:00`, or an RFC 3339 instant. For instants the date
/// is taken in the instant's own offset.
pub fn parse_canonical(stored: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = stored.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, CANONICAL_FORMAT) {
        return Ok(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.date_naive());
    }

    Err(ParseError::new(stored, "not an ISO-8601 date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_user_date() {
        assert_eq!(parse_user_date("01/01/2025").unwrap(), ymd(2025, 1, 1));
        assert_eq!(parse_user_date("12/31/1999").unwrap(), ymd(1999, 12, 31));
        assert_eq!(parse_user_date(" 02/29/2024 ").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_parse_user_date_rejects_other_formats() {
        assert!(parse_user_date("2025-01-01").is_err());
        assert!(parse_user_date("1/1/2025").is_err());
        assert!(parse_user_date("01-01-2025").is_err());
        assert!(parse_user_date("01/01/25").is_err());
        assert!(parse_user_date("").is_err());
        assert!(parse_user_date("tomorrow").is_err());
    }

    #[test]
    fn test_parse_user_date_rejects_impossible_days() {
        assert!(parse_user_date("02/30/2025").is_err());
        assert!(parse_user_date("02/29/2025").is_err());
        assert!(parse_user_date("13/01/2025").is_err());
        assert!(parse_user_date("00/10/2025").is_err());
    }

    #[test]
    fn test_parse_error_keeps_input() {
        let err = parse_user_date("soon").unwrap_err();
        assert_eq!(err.input(), "soon");
        assert!(err.to_string().contains("MM/DD/YYYY"));
    }

    #[test]
    fn test_user_date_round_trips_through_canonical() {
        for input in ["01/01/2025", "02/29/2024", "07/04/1776", "12/31/9999"] {
            let date = parse_user_date(input).unwrap();
            let stored = canonical(date);
            assert_eq!(parse_canonical(&stored).unwrap(), date);
            assert_eq!(date.format("%m/%d/%Y").to_string(), input);
        }
    }

    #[test]
    fn test_canonical_format() {
        assert_eq!(canonical(ymd(2025, 1, 1)), "2025-01-01");
        assert_eq!(canonical(ymd(987, 3, 9)), "0987-03-09");
    }

    #[test]
    fn test_parse_canonical_variants() {
        assert_eq!(parse_canonical("2025-01-01").unwrap(), ymd(2025, 1, 1));
        assert_eq!(
            parse_canonical("2025-01-01T00:00:00").unwrap(),
            ymd(2025, 1, 1)
        );
        assert_eq!(
            parse_canonical("2025-01-01T00:00:00.000000").unwrap(),
            ymd(2025, 1, 1)
        );
        assert_eq!(
            parse_canonical("2025-01-01T23:30:00-08:00").unwrap(),
            ymd(2025, 1, 1)
        );
        assert_eq!(
            parse_canonical("2025-01-01T00:00:00+00:00").unwrap(),
            ymd(2025, 1, 1)
        );
    }

    #[test]
    fn test_parse_canonical_rejects_garbage() {
        assert!(parse_canonical("01/01/2025").is_err());
        assert!(parse_canonical("next week").is_err());
        assert!(parse_canonical("2025-13-01").is_err());
    }
}
