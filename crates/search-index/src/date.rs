//! Partial-precision date/time parsing.
//!
//! FHIR date values may carry only a year, a year-month, a full date, or a
//! full date-time with optional offset. Each precision implies a covered time
//! span ("1980" covers the whole year), which is what the date index stores.
//! Parsing is strict: a malformed value is a data-quality problem the caller
//! needs to know about, so it surfaces as an error rather than degrading
//! silently — the one deliberate exception to the "emit nothing" rule.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A date/time string that matched none of the recognized layouts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date/time value '{value}': {message}")]
pub struct InvalidDateError {
    /// The offending input.
    pub value: String,
    /// What was wrong with it.
    pub message: String,
}

impl InvalidDateError {
    /// Creates a new error for the given input.
    pub fn new(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            message: message.into(),
        }
    }
}

/// The precision a date/time value was written at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    /// Year only (e.g., "2024")
    Year,
    /// Year and month (e.g., "2024-01")
    Month,
    /// Full date (e.g., "2024-01-15")
    Day,
    /// Date and time to hours (e.g., "2024-01-15T10")
    Hour,
    /// Date and time to minutes (e.g., "2024-01-15T10:30")
    Minute,
    /// Date and time to seconds (e.g., "2024-01-15T10:30:00")
    Second,
    /// Fractional seconds given; treated as an exact instant.
    Millisecond,
}

impl fmt::Display for DatePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatePrecision::Year => write!(f, "year"),
            DatePrecision::Month => write!(f, "month"),
            DatePrecision::Day => write!(f, "day"),
            DatePrecision::Hour => write!(f, "hour"),
            DatePrecision::Minute => write!(f, "minute"),
            DatePrecision::Second => write!(f, "second"),
            DatePrecision::Millisecond => write!(f, "millisecond"),
        }
    }
}

/// A parsed date/time value and the UTC span its precision implies.
///
/// `start` and `end` are both inclusive; a fractional-second value collapses
/// to a single instant (`start == end`). Offset-less values are interpreted
/// as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialDateTime {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    precision: DatePrecision,
}

impl PartialDateTime {
    /// Parses a FHIR date/dateTime/instant string.
    pub fn parse(raw: &str) -> Result<Self, InvalidDateError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(InvalidDateError::new(raw, "empty value"));
        }

        let (date_text, time_text) = match text.split_once('T') {
            Some((d, t)) => (d, Some(t)),
            None => (text, None),
        };

        let (date, date_precision) = parse_date(text, date_text)?;

        let (naive_start, naive_next, precision) = match time_text {
            None => {
                let start = date.and_time(NaiveTime::MIN);
                let next = next_date_boundary(text, date, date_precision)?.and_time(NaiveTime::MIN);
                (start, next, date_precision)
            }
            Some(time_text) => {
                if date_precision != DatePrecision::Day {
                    return Err(InvalidDateError::new(
                        text,
                        "a time requires a full calendar date",
                    ));
                }
                let (clock_text, offset_seconds) = split_offset(text, time_text)?;
                let (time, step, precision) = parse_time(text, clock_text)?;
                let start = date.and_time(time) - Duration::seconds(i64::from(offset_seconds));
                let next = start + step;
                (start, next, precision)
            }
        };

        // Inclusive end: the last representable instant inside the span.
        // Fractional-second values are exact points.
        let naive_end = if precision == DatePrecision::Millisecond {
            naive_start
        } else {
            naive_next - Duration::nanoseconds(1)
        };

        Ok(Self {
            start: Utc.from_utc_datetime(&naive_start),
            end: Utc.from_utc_datetime(&naive_end),
            precision,
        })
    }

    /// First instant of the covered span.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Last instant of the covered span.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// The precision the value was written at.
    pub fn precision(&self) -> DatePrecision {
        self.precision
    }
}

/// Parses the calendar-date portion: "YYYY", "YYYY-MM", or "YYYY-MM-DD".
fn parse_date(full: &str, date_text: &str) -> Result<(NaiveDate, DatePrecision), InvalidDateError> {
    let mut parts = date_text.splitn(3, '-');
    let year = parse_fixed(full, parts.next().unwrap_or(""), 4, "year")?;
    let month = parts.next();
    let day = parts.next();

    match (month, day) {
        (None, _) => {
            let date = NaiveDate::from_ymd_opt(year as i32, 1, 1)
                .ok_or_else(|| InvalidDateError::new(full, "year out of range"))?;
            Ok((date, DatePrecision::Year))
        }
        (Some(m), None) => {
            let month = parse_fixed(full, m, 2, "month")?;
            let date = NaiveDate::from_ymd_opt(year as i32, month, 1)
                .ok_or_else(|| InvalidDateError::new(full, "month out of range"))?;
            Ok((date, DatePrecision::Month))
        }
        (Some(m), Some(d)) => {
            let month = parse_fixed(full, m, 2, "month")?;
            let day = parse_fixed(full, d, 2, "day")?;
            let date = NaiveDate::from_ymd_opt(year as i32, month, day)
                .ok_or_else(|| InvalidDateError::new(full, "no such calendar date"))?;
            Ok((date, DatePrecision::Day))
        }
    }
}

/// First day after the span a date-only value covers.
fn next_date_boundary(
    full: &str,
    date: NaiveDate,
    precision: DatePrecision,
) -> Result<NaiveDate, InvalidDateError> {
    use chrono::Datelike;

    let next = match precision {
        DatePrecision::Year => NaiveDate::from_ymd_opt(date.year() + 1, 1, 1),
        DatePrecision::Month => {
            if date.month() == 12 {
                NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
            }
        }
        _ => date.succ_opt(),
    };
    next.ok_or_else(|| InvalidDateError::new(full, "date too large to span"))
}

/// Splits a trailing "Z" or "+HH:MM"/"-HH:MM" offset off the clock text,
/// returning the offset in seconds east of UTC.
fn split_offset<'a>(full: &str, time_text: &'a str) -> Result<(&'a str, i32), InvalidDateError> {
    if let Some(clock) = time_text.strip_suffix('Z') {
        return Ok((clock, 0));
    }
    if let Some(pos) = time_text.rfind(['+', '-']) {
        let (clock, offset) = time_text.split_at(pos);
        let sign: i32 = if offset.starts_with('-') { -1 } else { 1 };
        let body = &offset[1..];
        let (hh, mm) = body
            .split_once(':')
            .ok_or_else(|| InvalidDateError::new(full, "malformed timezone offset"))?;
        let hours = parse_fixed(full, hh, 2, "offset hours")?;
        let minutes = parse_fixed(full, mm, 2, "offset minutes")?;
        if hours > 14 || minutes > 59 {
            return Err(InvalidDateError::new(full, "timezone offset out of range"));
        }
        return Ok((clock, sign * (hours as i32 * 3600 + minutes as i32 * 60)));
    }
    Ok((time_text, 0))
}

/// Parses "HH", "HH:MM", "HH:MM:SS", or "HH:MM:SS.fff", returning the start
/// time, the width of the covered span, and the precision.
fn parse_time(
    full: &str,
    clock_text: &str,
) -> Result<(NaiveTime, Duration, DatePrecision), InvalidDateError> {
    let mut parts = clock_text.splitn(3, ':');
    let hour = parse_fixed(full, parts.next().unwrap_or(""), 2, "hours")?;
    let minute = parts.next();
    let second = parts.next();

    match (minute, second) {
        (None, _) => {
            let time = NaiveTime::from_hms_opt(hour, 0, 0)
                .ok_or_else(|| InvalidDateError::new(full, "hours out of range"))?;
            Ok((time, Duration::hours(1), DatePrecision::Hour))
        }
        (Some(m), None) => {
            let minute = parse_fixed(full, m, 2, "minutes")?;
            let time = NaiveTime::from_hms_opt(hour, minute, 0)
                .ok_or_else(|| InvalidDateError::new(full, "minutes out of range"))?;
            Ok((time, Duration::minutes(1), DatePrecision::Minute))
        }
        (Some(m), Some(s)) => {
            let minute = parse_fixed(full, m, 2, "minutes")?;
            let (whole, frac) = match s.split_once('.') {
                Some((whole, frac)) => (whole, Some(frac)),
                None => (s, None),
            };
            let second = parse_fixed(full, whole, 2, "seconds")?;
            match frac {
                None => {
                    let time = NaiveTime::from_hms_opt(hour, minute, second)
                        .ok_or_else(|| InvalidDateError::new(full, "time out of range"))?;
                    Ok((time, Duration::seconds(1), DatePrecision::Second))
                }
                Some(frac) => {
                    if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit())
                    {
                        return Err(InvalidDateError::new(full, "malformed fractional seconds"));
                    }
                    let mut nanos: u32 = frac.parse().unwrap_or(0);
                    for _ in frac.len()..9 {
                        nanos *= 10;
                    }
                    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
                        .ok_or_else(|| InvalidDateError::new(full, "time out of range"))?;
                    Ok((time, Duration::zero(), DatePrecision::Millisecond))
                }
            }
        }
    }
}

/// Parses a fixed-width, all-digit field.
fn parse_fixed(full: &str, text: &str, width: usize, what: &str) -> Result<u32, InvalidDateError> {
    if text.len() != width || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidDateError::new(
            full,
            format!("expected {} digits for {}", width, what),
        ));
    }
    text.parse()
        .map_err(|_| InvalidDateError::new(full, format!("unparseable {}", what)))
}
