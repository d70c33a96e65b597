//! Relative, human-friendly labels for memo dates

use super::date::{parse_canonical, ParseError};
use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone};

/// Distance between two calendar dates, in the largest whole unit that fits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Days(i64),
    Months(u32),
    Years(u32),
}

impl Span {
    fn between(earlier: NaiveDate, later: NaiveDate) -> Span {
        let months = whole_months_between(earlier, later);
        if months == 0 {
            Span::Days((later - earlier).num_days())
        } else if months < 12 {
            Span::Months(months)
        } else {
            Span::Years(months / 12)
        }
    }

    fn describe(self) -> String {
        match self {
            Span::Days(1) => "a day".to_string(),
            Span::Days(n) => format!("{} days", n),
            Span::Months(1) => "a month".to_string(),
            Span::Months(n) => format!("{} months", n),
            Span::Years(1) => "a year".to_string(),
            Span::Years(n) => format!("{} years", n),
        }
    }
}

/// Count whole calendar months from `earlier` to `later`.
///
/// Month addition clamps to the end of the month, so Jan 31 to Feb 28 is
/// one month.
fn whole_months_between(earlier: NaiveDate, later: NaiveDate) -> u32 {
    let mut months = (later.year() - earlier.year()) * 12 + later.month() as i32
        - earlier.month() as i32;

    while months > 0 {
        match earlier.checked_add_months(Months::new(months as u32)) {
            Some(date) if date <= later => break,
            _ => months -= 1,
        }
    }

    months.max(0) as u32
}

/// Generic relative phrase ("in 5 days", "3 months ago") between two dates
fn relative_phrase(date: NaiveDate, today: NaiveDate) -> String {
    if date > today {
        format!("in {}", Span::between(today, date).describe())
    } else {
        format!("{} ago", Span::between(date, today).describe())
    }
}

/// Label a calendar date relative to `today`
pub fn humanize_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }

    let phrase = relative_phrase(date, today);
    match phrase.as_str() {
        "in a day" => "Tomorrow".to_string(),
        "a day ago" => "Yesterday".to_string(),
        _ => phrase,
    }
}

/// Humanize a stored date relative to `reference_now`.
///
/// "Today" is the calendar date of `reference_now` in its own time zone;
/// callers pick the authoritative zone by choosing which `DateTime` to pass.
pub fn try_humanize<Tz: TimeZone>(
    stored: &str,
    reference_now: &DateTime<Tz>,
) -> Result<String, ParseError> {
    let date = parse_canonical(stored)?;
    Ok(humanize_date(date, reference_now.date_naive()))
}

/// Best-effort humanization for display: unreadable input is returned unchanged.
pub fn humanize<Tz: TimeZone>(stored: &str, reference_now: &DateTime<Tz>) -> String {
    try_humanize(stored, reference_now).unwrap_or_else(|_| stored.to_string())
}
