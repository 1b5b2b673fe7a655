//! Trading calendar error types.

use snowball_core::types::{Date, DateError};
use thiserror::Error;

use super::SearchDirection;

/// Errors raised by trading calendar queries.
///
/// # Examples
/// ```
/// use snowball_core::types::Date;
/// use snowball_models::calendar::CalendarError;
///
/// let err = CalendarError::NotATradingDay {
///     date: Date::from_ymd(2024, 6, 15).unwrap(),
/// };
/// assert_eq!(err.to_string(), "2024-06-15 is not a trading day");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The date is not present in the price series.
    #[error("{date} is not a trading day")]
    NotATradingDay {
        /// The queried date.
        date: Date,
    },

    /// A trading-day search walked outside the calendar's date range.
    #[error("No trading day found searching {direction} from {from} within [{first}, {last}]")]
    CalendarExhausted {
        /// Date the search started from.
        from: Date,
        /// Search direction.
        direction: SearchDirection,
        /// First date of the calendar.
        first: Date,
        /// Last date of the calendar.
        last: Date,
    },

    /// The ordinal does not exist in the calendar.
    #[error("Ordinal {ordinal} outside calendar range 1..={len}")]
    OrdinalOutOfRange {
        /// The queried ordinal.
        ordinal: usize,
        /// Number of trading days in the calendar.
        len: usize,
    },

    /// An ordinal window whose start lies after its end.
    #[error("Invalid ordinal window [{first}, {last}]")]
    InvalidWindow {
        /// First ordinal of the window.
        first: usize,
        /// Last ordinal of the window.
        last: usize,
    },

    /// Date arithmetic failed while stepping through the calendar.
    #[error(transparent)]
    Date(#[from] DateError),
}

impl CalendarError {
    /// Returns `true` for [`CalendarError::CalendarExhausted`].
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CalendarError::CalendarExhausted { .. })
    }
}
