//! # Snowball Models (L2: Business Logic)
//!
//! Trading calendars, monthly observation schedules and barrier-event
//! classification for snowball autocallables evaluated against history.
//!
//! This crate provides:
//! - [`calendar::TradingCalendar`]: membership and ordinal queries over a price series
//! - [`schedules::ObservationScheduler`]: monthly observation dates resolved to trading days
//! - [`instruments::ContractSpec`]: validated contract terms for one start date
//! - [`barrier::BarrierClassifier`]: knock-out and knock-in/knock-out classification
//! - [`sweep::ContractSweep`]: one classification record per candidate start date
//!
//! ## Data Flow
//!
//! ```text
//! PriceSeries -> TradingCalendar -> ObservationScheduler -> BarrierClassifier -> ContractSweep
//! ```
//!
//! Every stage borrows the calendar explicitly; there is no shared mutable
//! state, so rows of the sweep are evaluated independently.
//!
//! ## Example
//!
//! ```
//! use snowball_core::market_data::PriceSeries;
//! use snowball_core::types::Date;
//! use snowball_models::calendar::TradingCalendar;
//! use snowball_models::instruments::ContractTerms;
//! use snowball_models::sweep::ContractSweep;
//!
//! // Every calendar day for two years, flat price
//! let start = Date::from_ymd(2020, 1, 1).unwrap();
//! let series = PriceSeries::from_date_prices(
//!     (0..731).map(|i| (start.add_days(i).unwrap(), 100.0)),
//! )
//! .unwrap();
//! let calendar = TradingCalendar::new(series);
//!
//! let terms = ContractTerms::new(12, 3, 1.05, 0.8).unwrap();
//! let records = ContractSweep::new(&calendar, terms).run().unwrap();
//!
//! assert_eq!(records.len(), calendar.len());
//! // The first start date has a full year of history behind it
//! assert_eq!(records[0].knock_out_flag(), Some(0));
//! assert_eq!(records[0].neither_flag(), Some(1));
//! // The last one does not
//! assert_eq!(records.last().unwrap().knock_out_flag(), None);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod barrier;
pub mod calendar;
pub mod instruments;
pub mod schedules;
pub mod sweep;

#[cfg(test)]
mod test_support;
