//! Monthly observation schedules for snowball contracts.
//!
//! This module provides:
//! - [`ObservationScheduler`]: maps `(start_date, lock_in_period, i)` to the
//!   i-th monthly observation trading day after lock-in
//! - [`ObservationDate`]: a resolved observation with its theoretical date
//! - [`ScheduleError`]: scheduling failures
//!
//! # Resolution rule
//!
//! The theoretical date is `start_date + (lock_in_period - 1 + i)` calendar
//! months, clamped to month end. It is resolved to a trading day by walking
//! forward when the start date falls on days 1-15 of its month and backward
//! otherwise.
//!
//! # Examples
//!
//! ```
//! use snowball_core::market_data::PriceSeries;
//! use snowball_core::types::Date;
//! use snowball_models::calendar::TradingCalendar;
//! use snowball_models::schedules::ObservationScheduler;
//!
//! let start = Date::from_ymd(2019, 11, 29).unwrap();
//! let fri = Date::from_ymd(2020, 2, 28).unwrap();
//! let mon = Date::from_ymd(2020, 3, 2).unwrap();
//! let calendar = TradingCalendar::new(
//!     PriceSeries::from_date_prices(vec![(start, 100.0), (fri, 98.0), (mon, 97.0)]).unwrap(),
//! );
//!
//! let scheduler = ObservationScheduler::new(&calendar);
//! let first = scheduler.observation(start, 3, 1).unwrap();
//! assert_eq!(first.theoretical, Date::from_ymd(2020, 2, 29).unwrap());
//! // Day 29 starts search backward: Saturday -> Friday
//! assert_eq!(first.actual, fri);
//! assert_eq!(first.ordinal, 2);
//! ```

mod error;
mod scheduler;

pub use error::ScheduleError;
pub use scheduler::{ObservationDate, ObservationScheduler, FORWARD_SEARCH_LAST_DAY};
