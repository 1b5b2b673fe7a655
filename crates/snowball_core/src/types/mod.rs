//! Core time and error types.
//!
//! This module provides:
//! - `time`: `Date` wrapper with calendar-month and calendar-day arithmetic
//! - `error`: Structured error types for date and price series operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`] from `time`
//! - [`DateError`], [`SeriesError`] from `error`

pub mod error;
pub mod time;

pub use error::{DateError, SeriesError};
pub use time::Date;
