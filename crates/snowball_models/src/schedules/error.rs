//! Observation schedule error types.

use crate::calendar::CalendarError;
use snowball_core::types::DateError;
use thiserror::Error;

/// Errors that can occur while resolving observation dates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Observation indices start at 1.
    #[error("Invalid observation index {index} (must be >= 1)")]
    InvalidObservationIndex {
        /// The rejected index.
        index: u32,
    },

    /// Lock-in period must be at least one month.
    #[error("Invalid lock-in period {lock_in_period} (must be >= 1)")]
    InvalidLockIn {
        /// The rejected lock-in period.
        lock_in_period: u32,
    },

    /// Calendar lookup or trading-day search failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Month arithmetic overflowed.
    #[error(transparent)]
    Date(#[from] DateError),
}

impl ScheduleError {
    /// Returns `true` when a trading-day search ran off the calendar.
    pub fn is_calendar_exhausted(&self) -> bool {
        matches!(self, ScheduleError::Calendar(e) if e.is_exhausted())
    }
}
