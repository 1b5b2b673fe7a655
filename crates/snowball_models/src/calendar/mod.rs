//! Trading calendar built from an observed price series.
//!
//! A date is a trading day iff it appears in the series; no holiday rules
//! are modelled beyond that.
//!
//! # Examples
//!
//! ```
//! use snowball_core::market_data::PriceSeries;
//! use snowball_core::types::Date;
//! use snowball_models::calendar::{SearchDirection, TradingCalendar};
//!
//! let fri = Date::from_ymd(2024, 3, 15).unwrap();
//! let mon = Date::from_ymd(2024, 3, 18).unwrap();
//! let calendar = TradingCalendar::new(
//!     PriceSeries::from_date_prices(vec![(fri, 100.0), (mon, 102.0)]).unwrap(),
//! );
//!
//! let sat = Date::from_ymd(2024, 3, 16).unwrap();
//! assert!(!calendar.is_trading_day(sat));
//! assert_eq!(calendar.nearest_trading_day(sat, SearchDirection::Forward).unwrap(), mon);
//! assert_eq!(calendar.nearest_trading_day(sat, SearchDirection::Backward).unwrap(), fri);
//! assert_eq!(calendar.ordinal_of(mon).unwrap(), 2);
//! ```

mod error;

pub use error::CalendarError;

use snowball_core::market_data::{PricePoint, PriceSeries};
use snowball_core::types::Date;
use std::collections::HashMap;
use std::fmt;

/// Direction of a calendar-day search for the nearest trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SearchDirection {
    /// Step one calendar day later at a time.
    Forward,
    /// Step one calendar day earlier at a time.
    Backward,
}

impl fmt::Display for SearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDirection::Forward => write!(f, "forward"),
            SearchDirection::Backward => write!(f, "backward"),
        }
    }
}

/// Ordered trading-date series with O(1) date lookups.
///
/// Read-only after construction; all queries are pure.
#[derive(Debug, Clone)]
pub struct TradingCalendar {
    series: PriceSeries,
    /// Date -> zero-based position in `series`.
    index: HashMap<Date, usize>,
}

impl TradingCalendar {
    /// Builds the calendar and its date index.
    pub fn new(series: PriceSeries) -> Self {
        let index = series
            .points()
            .iter()
            .enumerate()
            .map(|(pos, p)| (p.date, pos))
            .collect();
        Self { series, index }
    }

    /// Returns `true` iff `date` is present in the series.
    #[inline]
    pub fn is_trading_day(&self, date: Date) -> bool {
        self.index.contains_key(&date)
    }

    /// Returns the point observed on `date`.
    pub fn point_at(&self, date: Date) -> Result<&PricePoint, CalendarError> {
        self.index
            .get(&date)
            .map(|&pos| &self.series.points()[pos])
            .ok_or(CalendarError::NotATradingDay { date })
    }

    /// Returns the price observed on `date`.
    pub fn price_at(&self, date: Date) -> Result<f64, CalendarError> {
        self.point_at(date).map(|p| p.price)
    }

    /// Returns the 1-based ordinal of `date`.
    pub fn ordinal_of(&self, date: Date) -> Result<usize, CalendarError> {
        self.point_at(date).map(|p| p.ordinal)
    }

    /// Returns the point with the given 1-based ordinal.
    pub fn point_at_ordinal(&self, ordinal: usize) -> Result<&PricePoint, CalendarError> {
        ordinal
            .checked_sub(1)
            .and_then(|pos| self.series.points().get(pos))
            .ok_or(CalendarError::OrdinalOutOfRange {
                ordinal,
                len: self.len(),
            })
    }

    /// Returns every point whose ordinal lies in `[first, last]`, inclusive.
    pub fn window(&self, first: usize, last: usize) -> Result<&[PricePoint], CalendarError> {
        if first > last {
            return Err(CalendarError::InvalidWindow { first, last });
        }
        self.point_at_ordinal(first)?;
        self.point_at_ordinal(last)?;
        Ok(&self.series.points()[first - 1..last])
    }

    /// Finds the nearest trading day at or beyond `from` in `direction`,
    /// stepping one calendar day at a time.
    ///
    /// The scan is bounded by the calendar's first and last dates: a
    /// candidate outside that range ends the search with
    /// [`CalendarError::CalendarExhausted`].
    pub fn nearest_trading_day(
        &self,
        from: Date,
        direction: SearchDirection,
    ) -> Result<Date, CalendarError> {
        let first = self.first_date();
        let last = self.last_date();
        let mut candidate = from;

        loop {
            if candidate < first || candidate > last {
                return Err(CalendarError::CalendarExhausted {
                    from,
                    direction,
                    first,
                    last,
                });
            }
            if self.is_trading_day(candidate) {
                return Ok(candidate);
            }
            candidate = match direction {
                SearchDirection::Forward => candidate.add_days(1)?,
                SearchDirection::Backward => candidate.sub_days(1)?,
            };
        }
    }

    /// Returns the oldest trading date.
    #[inline]
    pub fn first_date(&self) -> Date {
        self.series.first().date
    }

    /// Returns the newest trading date.
    #[inline]
    pub fn last_date(&self) -> Date {
        self.series.last().date
    }

    /// Returns all points, oldest first.
    #[inline]
    pub fn points(&self) -> &[PricePoint] {
        self.series.points()
    }

    /// Returns the number of trading days.
    #[inline]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Always `false`: a calendar is built from a non-empty series.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    /// Mon 2024-03-11 .. Fri 2024-03-22, weekdays only.
    fn two_weeks() -> TradingCalendar {
        let dates = [11, 12, 13, 14, 15, 18, 19, 20, 21, 22];
        let series = PriceSeries::from_date_prices(
            dates
                .iter()
                .enumerate()
                .map(|(i, &d)| (ymd(2024, 3, d), 100.0 + i as f64)),
        )
        .unwrap();
        TradingCalendar::new(series)
    }

    #[test]
    fn test_membership() {
        let cal = two_weeks();
        assert!(cal.is_trading_day(ymd(2024, 3, 11)));
        assert!(cal.is_trading_day(ymd(2024, 3, 22)));
        assert!(!cal.is_trading_day(ymd(2024, 3, 16)));
        assert!(!cal.is_trading_day(ymd(2024, 3, 10)));
        assert!(!cal.is_trading_day(ymd(2024, 3, 23)));
    }

    #[test]
    fn test_price_and_ordinal_lookup() {
        let cal = two_weeks();
        assert_eq!(cal.price_at(ymd(2024, 3, 18)).unwrap(), 105.0);
        assert_eq!(cal.ordinal_of(ymd(2024, 3, 18)).unwrap(), 6);
        assert_eq!(cal.point_at_ordinal(6).unwrap().date, ymd(2024, 3, 18));
    }

    #[test]
    fn test_missing_date_is_not_a_trading_day() {
        let cal = two_weeks();
        let sat = ymd(2024, 3, 16);
        assert_eq!(
            cal.price_at(sat),
            Err(CalendarError::NotATradingDay { date: sat })
        );
        assert_eq!(
            cal.ordinal_of(sat),
            Err(CalendarError::NotATradingDay { date: sat })
        );
    }

    #[test]
    fn test_ordinal_out_of_range() {
        let cal = two_weeks();
        assert!(matches!(
            cal.point_at_ordinal(0),
            Err(CalendarError::OrdinalOutOfRange { ordinal: 0, len: 10 })
        ));
        assert!(cal.point_at_ordinal(11).is_err());
    }

    #[test]
    fn test_window_is_inclusive() {
        let cal = two_weeks();
        let window = cal.window(3, 6).unwrap();
        assert_eq!(window.len(), 4);
        assert_eq!(window[0].ordinal, 3);
        assert_eq!(window[3].ordinal, 6);

        assert_eq!(cal.window(4, 4).unwrap().len(), 1);
        assert!(matches!(
            cal.window(5, 4),
            Err(CalendarError::InvalidWindow { first: 5, last: 4 })
        ));
        assert!(cal.window(9, 11).is_err());
    }

    #[test]
    fn test_nearest_on_trading_day_is_identity() {
        let cal = two_weeks();
        let d = ymd(2024, 3, 13);
        assert_eq!(cal.nearest_trading_day(d, SearchDirection::Forward).unwrap(), d);
        assert_eq!(cal.nearest_trading_day(d, SearchDirection::Backward).unwrap(), d);
    }

    #[test]
    fn test_nearest_skips_weekend() {
        let cal = two_weeks();
        let sun = ymd(2024, 3, 17);
        assert_eq!(
            cal.nearest_trading_day(sun, SearchDirection::Forward).unwrap(),
            ymd(2024, 3, 18)
        );
        assert_eq!(
            cal.nearest_trading_day(sun, SearchDirection::Backward).unwrap(),
            ymd(2024, 3, 15)
        );
    }

    #[test]
    fn test_nearest_exhausts_outside_range() {
        let cal = two_weeks();

        // Beyond the last date, searching forward
        let err = cal
            .nearest_trading_day(ymd(2024, 3, 23), SearchDirection::Forward)
            .unwrap_err();
        assert!(err.is_exhausted());

        // Before the first date, searching backward
        let err = cal
            .nearest_trading_day(ymd(2024, 3, 10), SearchDirection::Backward)
            .unwrap_err();
        assert_eq!(
            err,
            CalendarError::CalendarExhausted {
                from: ymd(2024, 3, 10),
                direction: SearchDirection::Backward,
                first: ymd(2024, 3, 11),
                last: ymd(2024, 3, 22),
            }
        );

        // A start outside the range is exhausted even when the walk would re-enter it
        assert!(cal
            .nearest_trading_day(ymd(2024, 3, 30), SearchDirection::Backward)
            .unwrap_err()
            .is_exhausted());
    }

    #[test]
    fn test_bounds() {
        let cal = two_weeks();
        assert_eq!(cal.first_date(), ymd(2024, 3, 11));
        assert_eq!(cal.last_date(), ymd(2024, 3, 22));
        assert_eq!(cal.len(), 10);
        assert!(!cal.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Random subset of 120 consecutive days that always keeps the endpoints.
        fn calendar_strategy() -> impl Strategy<Value = TradingCalendar> {
            proptest::collection::vec(any::<bool>(), 118).prop_map(|keep| {
                let base = ymd(2023, 1, 1);
                let mut offsets = vec![0u64];
                offsets.extend(
                    keep.iter()
                        .enumerate()
                        .filter(|(_, k)| **k)
                        .map(|(i, _)| i as u64 + 1),
                );
                offsets.push(119);
                let series = PriceSeries::from_date_prices(
                    offsets.into_iter().map(|o| (base.add_days(o).unwrap(), 50.0)),
                )
                .unwrap();
                TradingCalendar::new(series)
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_membership_matches_series(cal in calendar_strategy(), offset in 0u64..150u64) {
                let date = ymd(2023, 1, 1).add_days(offset).unwrap();
                let in_series = cal.points().iter().any(|p| p.date == date);
                prop_assert_eq!(cal.is_trading_day(date), in_series);
            }

            #[test]
            fn test_nearest_returns_trading_day_in_direction(
                cal in calendar_strategy(),
                offset in 0u64..120u64,
                forward in any::<bool>(),
            ) {
                let from = ymd(2023, 1, 1).add_days(offset).unwrap();
                let direction = if forward { SearchDirection::Forward } else { SearchDirection::Backward };
                let found = cal.nearest_trading_day(from, direction).unwrap();
                prop_assert!(cal.is_trading_day(found));
                if forward {
                    prop_assert!(found >= from);
                } else {
                    prop_assert!(found <= from);
                }
            }

            #[test]
            fn test_ordinal_date_bijection(cal in calendar_strategy()) {
                for point in cal.points() {
                    prop_assert_eq!(cal.ordinal_of(point.date).unwrap(), point.ordinal);
                    prop_assert_eq!(cal.point_at_ordinal(point.ordinal).unwrap().date, point.date);
                }
            }
        }
    }
}
