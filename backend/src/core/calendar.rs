//! Calendar arithmetic for the alert engine
//!
//! The engine operates on calendar days only. It never reads the clock:
//! "today" is always supplied by the caller, which keeps every pass
//! deterministic.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Errors from strict date parsing (caller-facing boundaries only)
#[derive(Debug, Error, PartialEq)]
pub enum CalendarError {
    #[error("Invalid calendar date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },
}

/// Parse a date as stored by the data layer
///
/// Accepts a plain `YYYY-MM-DD` date, an RFC 3339 timestamp, or a naive
/// `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` timestamp. Only the calendar
/// date is kept. Returns `None` for anything else, so callers can treat an
/// unparseable value exactly like a missing one.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use policy_alerts_core::core::calendar::parse_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 5, 22);
/// assert_eq!(parse_date("2024-05-22"), expected);
/// assert_eq!(parse_date("2024-05-22T10:30:00Z"), expected);
/// assert_eq!(parse_date("22/05/2024"), None);
/// ```
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|timestamp| timestamp.date())
}

/// Parse an optional stored date, collapsing absent and malformed values
pub fn parse_optional_date(input: Option<&str>) -> Option<NaiveDate> {
    input.and_then(parse_date)
}

/// Parse a date supplied by an operator (e.g. a `--today` argument)
///
/// Unlike [`parse_date`], only the plain `YYYY-MM-DD` form is accepted and
/// failures are reported.
pub fn parse_date_strict(input: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| CalendarError::InvalidDate {
        input: input.to_string(),
    })
}

/// Signed number of days from `from` to `to`
///
/// Positive when `to` lies in the future relative to `from`, negative when
/// it lies in the past.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Add a number of days to a date, `None` on calendar overflow
pub fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
}
