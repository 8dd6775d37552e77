//! Day-number date model.
//!
//! Calendar dates are represented internally as a signed count of days since
//! 1970-01-01. All conversions use UTC calendar semantics, so interval math
//! (overlap, duration, pixel offset) is plain integer arithmetic.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::TimelineError;

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Anything that can be resolved to a day number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    /// A `YYYY-MM-DD` string.
    Ymd(&'a str),
    /// An existing day number, passed through unchanged.
    Day(i64),
    /// A calendar date.
    Date(NaiveDate),
    /// A UTC timestamp, truncated to its calendar day.
    DateTime(DateTime<Utc>),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(s: &'a str) -> Self {
        Self::Ymd(s)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(s: &'a String) -> Self {
        Self::Ymd(s.as_str())
    }
}

impl From<i64> for DateInput<'_> {
    fn from(day: i64) -> Self {
        Self::Day(day)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Utc>> for DateInput<'_> {
    fn from(at: DateTime<Utc>) -> Self {
        Self::DateTime(at)
    }
}

/// Convert a date representation into a day number.
///
/// # Errors
/// Returns [`TimelineError::InvalidDateFormat`] when a string is not three
/// dash-separated all-digit components naming a real calendar date.
pub fn to_day_number<'a>(input: impl Into<DateInput<'a>>) -> Result<i64, TimelineError> {
    match input.into() {
        DateInput::Day(day) => Ok(day),
        DateInput::Ymd(s) => parse_ymd(s).map(date_to_day),
        DateInput::Date(date) => Ok(date_to_day(date)),
        DateInput::DateTime(at) => Ok(date_to_day(at.date_naive())),
    }
}

/// Convert a day number back into a canonical `YYYY-MM-DD` string.
///
/// # Errors
/// Returns [`TimelineError::DayOutOfRange`] for days outside
/// [`representable_days`].
pub fn from_day_number(day: i64) -> Result<String, TimelineError> {
    let date = day_to_date(day)?;
    Ok(format_ymd(date))
}

/// Convert a day number into a `NaiveDate`.
pub fn day_to_date(day: i64) -> Result<NaiveDate, TimelineError> {
    day.checked_add(EPOCH_DAYS_FROM_CE)
        .and_then(|ce| i32::try_from(ce).ok())
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or(TimelineError::DayOutOfRange { day })
}

/// The day numbers chrono can represent as calendar dates.
pub fn representable_days() -> RangeInclusive<i64> {
    date_to_day(NaiveDate::MIN)..=date_to_day(NaiveDate::MAX)
}

/// Standard range clamp. `min` wins when `min > max`.
pub fn clamp<T: PartialOrd>(n: T, min: T, max: T) -> T {
    let upper = if n > max { max } else { n };
    if upper < min {
        min
    } else {
        upper
    }
}

fn date_to_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - EPOCH_DAYS_FROM_CE
}

fn parse_ymd(input: &str) -> Result<NaiveDate, TimelineError> {
    let invalid = || TimelineError::InvalidDateFormat {
        input: input.to_string(),
    };

    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let parts: Vec<&str> = body.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(invalid());
    };
    if [year, month, day]
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(invalid());
    }

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    let year = if negative { -year } else { year };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn format_ymd(date: NaiveDate) -> String {
    let year = date.year();
    let sign = if year < 0 { "-" } else { "" };
    format!(
        "{sign}{:04}-{:02}-{:02}",
        year.unsigned_abs(),
        date.month(),
        date.day()
    )
}
