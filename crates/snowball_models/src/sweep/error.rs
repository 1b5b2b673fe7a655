//! Contract sweep error types.

use crate::calendar::CalendarError;
use snowball_core::types::{Date, DateError};
use thiserror::Error;

/// Errors that abort a sweep.
///
/// Date lookups that miss the calendar only degrade the affected row to
/// `Indeterminate`; they never surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SweepError {
    /// An eligible row's observation search ran off the calendar.
    #[error("Row {ordinal} ({date}) is eligible but its observation schedule left the calendar: {source}")]
    CalendarExhausted {
        /// Ordinal of the offending row.
        ordinal: usize,
        /// Start date of the offending row.
        date: Date,
        /// The underlying search failure.
        #[source]
        source: CalendarError,
    },

    /// The eligibility cutoff could not be computed.
    #[error("Eligibility cutoff: {0}")]
    Cutoff(#[from] DateError),
}
