//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction, parsing and arithmetic
//! - `SeriesError`: Errors from price series validation

use thiserror::Error;

use super::time::Date;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
/// - `Overflow`: Month or day arithmetic left chrono's representable range
///
/// # Examples
/// ```
/// use snowball_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow: {reason}")]
    Overflow {
        /// Reason for the overflow.
        reason: String,
    },
}

/// Price series validation errors.
///
/// Raised when an ordered `(ordinal, date, price)` sequence violates the
/// invariants of [`PriceSeries`](crate::market_data::PriceSeries).
///
/// # Examples
/// ```
/// use snowball_core::types::{Date, SeriesError};
///
/// let err = SeriesError::InvalidPrice {
///     date: Date::from_ymd(2024, 1, 2).unwrap(),
///     price: -1.0,
/// };
/// assert!(format!("{}", err).contains("2024-01-02"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// The series contains no observations.
    #[error("Price series is empty")]
    Empty,

    /// Ordinals are not dense and increasing from 1.
    #[error("Ordinal mismatch: expected {expected}, found {found}")]
    InvalidOrdinal {
        /// Ordinal expected at this position
        expected: usize,
        /// Ordinal found at this position
        found: usize,
    },

    /// Dates are not strictly increasing.
    #[error("Date {date} at ordinal {ordinal} does not follow {previous}")]
    NonIncreasingDate {
        /// Ordinal of the offending point
        ordinal: usize,
        /// Date of the preceding point
        previous: Date,
        /// Date of the offending point
        date: Date,
    },

    /// Price is not a finite positive number.
    #[error("Invalid price {price} on {date}")]
    InvalidPrice {
        /// Date of the offending point
        date: Date,
        /// The invalid price
        price: f64,
    },
}
