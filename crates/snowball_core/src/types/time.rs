//! Calendar date type for observation scheduling.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Month-end-safe calendar-month addition and subtraction
//! - Single calendar-day steps used by trading-day searches
//!
//! # Examples
//!
//! ```
//! use snowball_core::types::time::Date;
//!
//! let start = Date::from_ymd(2019, 11, 29).unwrap();
//!
//! // Three calendar months later lands on a leap day
//! let target = start.add_months(3).unwrap();
//! assert_eq!(target, Date::from_ymd(2020, 2, 29).unwrap());
//!
//! // Walk one calendar day back
//! assert_eq!(target.sub_days(1).unwrap(), Date::from_ymd(2020, 2, 28).unwrap());
//! ```

use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and the date arithmetic needed by
/// monthly observation schedules.
///
/// # Examples
///
/// ```
/// use snowball_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Calculate days between dates
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use snowball_core::types::time::Date;
    ///
    /// let leap = Date::from_ymd(2024, 2, 29).unwrap();
    /// assert_eq!(leap.day(), 29);
    ///
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use snowball_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", s, e)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day-of-month component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Advances the date by `months` calendar months.
    ///
    /// The day-of-month is preserved where the target month has it and
    /// clamped to the target month's last day otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use snowball_core::types::time::Date;
    ///
    /// let jan_31 = Date::from_ymd(2023, 1, 31).unwrap();
    /// assert_eq!(jan_31.add_months(1).unwrap(), Date::from_ymd(2023, 2, 28).unwrap());
    /// assert_eq!(jan_31.add_months(2).unwrap(), Date::from_ymd(2023, 3, 31).unwrap());
    /// ```
    pub fn add_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::Overflow {
                reason: format!("Adding {} months to {} overflowed", months, self),
            })
    }

    /// Moves the date back by `months` calendar months, clamping to the
    /// target month's last day like [`Date::add_months`].
    ///
    /// # Examples
    ///
    /// ```
    /// use snowball_core::types::time::Date;
    ///
    /// let mar_31 = Date::from_ymd(2024, 3, 31).unwrap();
    /// assert_eq!(mar_31.sub_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    /// ```
    pub fn sub_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_sub_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::Overflow {
                reason: format!("Subtracting {} months from {} overflowed", months, self),
            })
    }

    /// Advances the date by `days` calendar days.
    pub fn add_days(self, days: u64) -> Result<Self, DateError> {
        self.0
            .checked_add_days(Days::new(days))
            .map(Date)
            .ok_or_else(|| DateError::Overflow {
                reason: format!("Adding {} days to {} overflowed", days, self),
            })
    }

    /// Moves the date back by `days` calendar days.
    pub fn sub_days(self, days: u64) -> Result<Self, DateError> {
        self.0
            .checked_sub_days(Days::new(days))
            .map(Date)
            .ok_or_else(|| DateError::Overflow {
                reason: format!("Subtracting {} days from {} overflowed", days, self),
            })
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
