//! Shared fixtures for unit tests.

use crate::calendar::TradingCalendar;
use chrono::{Datelike, Weekday};
use snowball_core::market_data::PriceSeries;
use snowball_core::types::Date;

pub(crate) fn ymd(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// Monday-to-Friday calendar over `[from, to]`; `price` receives the
/// zero-based position and date of each trading day.
pub(crate) fn weekday_calendar<F>(from: Date, to: Date, price: F) -> TradingCalendar
where
    F: Fn(usize, Date) -> f64,
{
    let mut dates = Vec::new();
    let mut d = from;
    while d <= to {
        if !matches!(d.into_inner().weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(d);
        }
        d = d.add_days(1).unwrap();
    }
    let series = PriceSeries::from_date_prices(
        dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| (date, price(i, date))),
    )
    .unwrap();
    TradingCalendar::new(series)
}

/// Weekday calendar with a constant price.
pub(crate) fn flat_calendar(from: Date, to: Date, level: f64) -> TradingCalendar {
    weekday_calendar(from, to, |_, _| level)
}
