//! Calendar date value types
//!
//! `CalendarDate` is a plain (year, month, day) triple with no time of day and
//! `YearMonth` names a single calendar month. Month arithmetic, leap years and
//! weekday computation are done directly on these values using proleptic
//! Gregorian rules; chrono is only used at the edges for parsing, formatting
//! and reading today's date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Check whether `year` is a leap year in the proleptic Gregorian calendar
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given month (1-12)
///
/// Returns 0 for a month outside 1-12.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since 1970-01-01 for a civil date
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i64::from(month);
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// A calendar date without time-of-day significance
///
/// Always holds a real date: construction goes through [`CalendarDate::new`]
/// or [`CalendarDate::parse`], both of which reject impossible dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Create a date, validating month and day against the calendar
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateParseError> {
        if !(1..=12).contains(&month) {
            return Err(DateParseError::InvalidMonth(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(DateParseError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Parse an ISO date string (`YYYY-MM-DD`)
    pub fn parse(s: &str) -> Result<Self, DateParseError> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::from)
            .map_err(|_| DateParseError::InvalidFormat(s.to_string()))
    }

    /// Today's date in the local timezone
    pub fn today() -> Self {
        chrono::Local::now().date_naive().into()
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    /// The calendar month this date falls in
    pub const fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    /// Same calendar month (month and year both equal); day is ignored
    pub const fn same_month(&self, other: &CalendarDate) -> bool {
        self.month == other.month && self.same_year(other)
    }

    pub const fn same_year(&self, other: &CalendarDate) -> bool {
        self.year == other.year
    }

    /// Number of days in this date's month
    pub const fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// The first day of this date's month
    pub const fn first_of_month(&self) -> CalendarDate {
        CalendarDate {
            year: self.year,
            month: self.month,
            day: 1,
        }
    }

    /// Shift by whole months, clamping the day to the target month's length
    /// (Jan 31 + 1 month = Feb 28/29)
    pub fn add_months(&self, months: i32) -> CalendarDate {
        let target = self.year_month().add_months(months);
        CalendarDate {
            year: target.year,
            month: target.month,
            day: self.day.min(target.days_in_month()),
        }
    }

    /// Weekday index with 0 = Sunday through 6 = Saturday
    pub fn weekday_from_sunday(&self) -> u32 {
        // 1970-01-01 was a Thursday
        (days_from_civil(self.year, self.month, self.day) + 4).rem_euclid(7) as u32
    }

    /// Format with a strftime pattern
    ///
    /// An invalid pattern falls back to the ISO form (`YYYY-MM-DD`).
    pub fn format(&self, pattern: &str) -> String {
        let mut out = String::new();
        match write!(out, "{}", NaiveDate::from(*self).format(pattern)) {
            Ok(()) => out,
            Err(_) => self.to_string(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        // Only out-of-chrono-range years can miss here
        NaiveDate::from_ymd_opt(date.year, date.month, date.day).unwrap_or_default()
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

/// A single calendar month (e.g. October 2024)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DateParseError> {
        if !(1..=12).contains(&month) {
            return Err(DateParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The current month in the local timezone
    pub fn current() -> Self {
        CalendarDate::today().year_month()
    }

    /// Parse a month string (`YYYY-MM`)
    pub fn parse(s: &str) -> Result<Self, DateParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| DateParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| DateParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| DateParseError::InvalidFormat(s.to_string()))?;
        Self::new(year, month)
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    pub const fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub const fn first_day(&self) -> CalendarDate {
        CalendarDate {
            year: self.year,
            month: self.month,
            day: 1,
        }
    }

    /// The given day of this month, if it exists
    pub fn day(&self, day: u32) -> Option<CalendarDate> {
        CalendarDate::new(self.year, self.month, day).ok()
    }

    pub const fn contains(&self, date: &CalendarDate) -> bool {
        date.year == self.year && date.month == self.month
    }

    /// Shift by whole months, wrapping years in either direction
    pub fn add_months(&self, months: i32) -> YearMonth {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1) + i64::from(months);
        YearMonth {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn next(&self) -> YearMonth {
        self.add_months(1)
    }

    pub fn prev(&self) -> YearMonth {
        self.add_months(-1)
    }

    /// Short label, e.g. "Oct 2024"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_ABBR[(self.month - 1) as usize], self.year)
    }

    /// Long label, e.g. "October 2024"
    pub fn long_label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<CalendarDate> for YearMonth {
    fn from(date: CalendarDate) -> Self {
        date.year_month()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}

/// Error type for date construction and parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidDay { year: i32, month: u32, day: u32 },
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateParseError::InvalidFormat(s) => write!(f, "Invalid date format: {}", s),
            DateParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            DateParseError::InvalidDay { year, month, day } => {
                write!(f, "Invalid day {} for {:04}-{:02}", day, year, month)
            }
        }
    }
}

impl std::error::Error for DateParseError {}
