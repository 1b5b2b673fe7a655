//! Historical market data.
//!
//! This module provides:
//! - [`PricePoint`]: A single `(ordinal, date, price)` observation
//! - [`PriceSeries`]: A validated, chronologically ordered sequence of points

mod price_series;

pub use price_series::{PricePoint, PriceSeries};
