//! # snowball_core: Foundation Types for Snowball Backtesting
//!
//! ## Layer 1 (Foundation) Role
//!
//! snowball_core serves as the bottom layer of the workspace, providing:
//! - Time types: `Date` with month-end-safe month arithmetic (`types::time`)
//! - Error types: `DateError`, `SeriesError` (`types::error`)
//! - Historical prices: `PricePoint`, `PriceSeries` (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other snowball_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Structured errors
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use snowball_core::market_data::PriceSeries;
//! use snowball_core::types::Date;
//!
//! let start = Date::from_ymd(2024, 1, 31).unwrap();
//! // February is shorter: the result clamps to its last day
//! assert_eq!(start.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
//!
//! let series = PriceSeries::from_date_prices(vec![
//!     (Date::from_ymd(2024, 1, 2).unwrap(), 100.0),
//!     (Date::from_ymd(2024, 1, 3).unwrap(), 101.5),
//! ])
//! .unwrap();
//! assert_eq!(series.len(), 2);
//! assert_eq!(series.points()[1].ordinal, 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date and PricePoint

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
