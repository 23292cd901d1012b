use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::DateParseError;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{1,2})\b",
    )
    .unwrap()
});

/// Finds the first `<month name> <day>` expression in `text` and resolves it
/// to a date in `today`'s year. Nonexistent dates such as `february 30` give
/// `None`.
pub fn try_parse_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = text.to_lowercase();
    let captures = MONTH_DAY.captures(&lower)?;
    match parse_month_day(&captures[1], &captures[2], today.year()) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!(expression = &captures[0], error = %err, "ignoring date expression");
            None
        }
    }
}

fn parse_month_day(month: &str, day: &str, year: i32) -> Result<NaiveDate, DateParseError> {
    let month = MONTHS
        .iter()
        .position(|m| *m == month)
        .map(|idx| idx as u32 + 1)
        .ok_or_else(|| DateParseError::UnknownMonth(month.to_string()))?;
    let day: u32 = day
        .parse()
        .map_err(|_| DateParseError::InvalidDay(day.to_string()))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateParseError::OutOfRange { year, month, day })
}
