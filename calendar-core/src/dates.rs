//! Calendar arithmetic: leap years, ordinal days, elapsed weeks.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CalendarError, Result};

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// 1-based ordinal day: January 1st is day 1.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Whole weeks from `start` to `end`, rounded toward negative infinity.
///
/// Negative when `end` precedes `start`.
pub fn weeks_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let seconds = (end - start).num_seconds();
    seconds.div_euclid(Duration::weeks(1).num_seconds())
}

/// Parse a birthday as typed into a form or query string.
///
/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM[:SS]` timestamp, or an
/// RFC 3339 timestamp. Only the calendar date is kept.
pub fn parse_birthday(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    Err(CalendarError::InvalidBirthday(input.to_string()))
}

/// Seconds left in the day containing `now`.
///
/// Images depend only on the date, so this is how long a rendered
/// wallpaper stays valid.
pub fn seconds_until_midnight(now: NaiveDateTime) -> i64 {
    let next_midnight = (now.date() + Duration::days(1)).and_time(NaiveTime::MIN);
    (next_midnight - now).num_seconds()
}
