//! Barrier-event classification for snowball contracts.
//!
//! Two independent checks share the start-date price as their base:
//!
//! - **Knock-out** ([`BarrierClassifier::classify_knock_out`]): the upper
//!   barrier is monitored on the monthly observation dates only.
//! - **Neither** ([`BarrierClassifier::classify_neither`]): every trading day
//!   from the first to the last observation date is checked against both the
//!   lower barrier and the upper barrier.
//!
//! The upper barrier is therefore monitored monthly by one check and daily by
//! the other. A price spike between two observation dates yields
//! `NoKnockOut` together with `KnockInOrEarlyKnockOut`.

use crate::calendar::TradingCalendar;
use crate::instruments::ContractSpec;
use crate::schedules::{ObservationDate, ObservationScheduler, ScheduleError};
use std::fmt;

/// Outcome of one barrier check for one contract start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Classification {
    /// A monthly observation price reached the upper barrier.
    KnockOut,
    /// No monthly observation price reached the upper barrier.
    NoKnockOut,
    /// No daily price in the observation window breached either barrier.
    NeitherKnockInNorKnockOut,
    /// Some daily price fell below the lower barrier or reached the upper one.
    KnockInOrEarlyKnockOut,
    /// Not enough trailing history to evaluate the contract.
    Indeterminate,
}

impl Classification {
    /// Tabular flag: `Some(1)` for true, `Some(0)` for false, `None` for NA.
    ///
    /// # Examples
    ///
    /// ```
    /// use snowball_models::barrier::Classification;
    ///
    /// assert_eq!(Classification::KnockOut.flag(), Some(1));
    /// assert_eq!(Classification::KnockInOrEarlyKnockOut.flag(), Some(0));
    /// assert_eq!(Classification::Indeterminate.flag(), None);
    /// ```
    pub fn flag(&self) -> Option<u8> {
        match self {
            Classification::KnockOut | Classification::NeitherKnockInNorKnockOut => Some(1),
            Classification::NoKnockOut | Classification::KnockInOrEarlyKnockOut => Some(0),
            Classification::Indeterminate => None,
        }
    }

    /// Returns `true` for [`Classification::Indeterminate`].
    #[inline]
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Classification::Indeterminate)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::KnockOut => "knock-out",
            Classification::NoKnockOut => "no knock-out",
            Classification::NeitherKnockInNorKnockOut => "neither knock-in nor knock-out",
            Classification::KnockInOrEarlyKnockOut => "knock-in or early knock-out",
            Classification::Indeterminate => "indeterminate",
        };
        write!(f, "{}", name)
    }
}

/// Classifies barrier events for contracts over a trading calendar.
///
/// # Examples
///
/// ```
/// use snowball_core::market_data::PriceSeries;
/// use snowball_core::types::Date;
/// use snowball_models::barrier::{BarrierClassifier, Classification};
/// use snowball_models::calendar::TradingCalendar;
/// use snowball_models::instruments::ContractSpec;
///
/// // Daily calendar, price rising one unit a day
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let series = PriceSeries::from_date_prices(
///     (0..200).map(|i| (start.add_days(i).unwrap(), 100.0 + i as f64)),
/// )
/// .unwrap();
/// let calendar = TradingCalendar::new(series);
/// let classifier = BarrierClassifier::new(&calendar);
///
/// let spec = ContractSpec::new(start, 6, 3, 1.5, 0.8).unwrap();
/// // 2024-04-01 is day 91: 191 >= 150
/// assert_eq!(classifier.classify_knock_out(&spec).unwrap(), Classification::KnockOut);
/// assert_eq!(
///     classifier.classify_neither(&spec).unwrap(),
///     Classification::KnockInOrEarlyKnockOut
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BarrierClassifier<'a> {
    calendar: &'a TradingCalendar,
    scheduler: ObservationScheduler<'a>,
}

impl<'a> BarrierClassifier<'a> {
    /// Creates a classifier over `calendar`.
    pub fn new(calendar: &'a TradingCalendar) -> Self {
        Self {
            calendar,
            scheduler: ObservationScheduler::new(calendar),
        }
    }

    /// Returns the scheduler used to resolve observation dates.
    #[inline]
    pub fn scheduler(&self) -> &ObservationScheduler<'a> {
        &self.scheduler
    }

    /// Price on the contract start date.
    pub fn base_price(&self, spec: &ContractSpec) -> Result<f64, ScheduleError> {
        Ok(self.calendar.price_at(spec.start_date())?)
    }

    /// First monthly observation whose price reaches the upper barrier.
    ///
    /// Observations are resolved lazily; scanning stops at the first breach.
    pub fn knock_out_observation(
        &self,
        spec: &ContractSpec,
    ) -> Result<Option<ObservationDate>, ScheduleError> {
        let barrier = self.base_price(spec)? * spec.upper_ratio();

        for index in 1..=spec.observation_count() {
            let obs = self
                .scheduler
                .observation(spec.start_date(), spec.lock_in_period(), index)?;
            if self.calendar.price_at(obs.actual)? >= barrier {
                return Ok(Some(obs));
            }
        }

        Ok(None)
    }

    /// `KnockOut` if any monthly observation price is at or above
    /// `base_price * upper_ratio`, `NoKnockOut` otherwise.
    pub fn classify_knock_out(&self, spec: &ContractSpec) -> Result<Classification, ScheduleError> {
        Ok(match self.knock_out_observation(spec)? {
            Some(_) => Classification::KnockOut,
            None => Classification::NoKnockOut,
        })
    }

    /// Scans every trading day between the first and last observation dates
    /// (inclusive). Any price below `base_price * lower_ratio` or at/above
    /// `base_price * upper_ratio` yields `KnockInOrEarlyKnockOut`; otherwise
    /// `NeitherKnockInNorKnockOut`.
    pub fn classify_neither(&self, spec: &ContractSpec) -> Result<Classification, ScheduleError> {
        let base = self.base_price(spec)?;
        let lower = base * spec.lower_ratio();
        let upper = base * spec.upper_ratio();

        let first = self
            .scheduler
            .observation(spec.start_date(), spec.lock_in_period(), 1)?;
        let last = self.scheduler.observation(
            spec.start_date(),
            spec.lock_in_period(),
            spec.observation_count(),
        )?;

        let window = self.calendar.window(first.ordinal, last.ordinal)?;
        let breached = window.iter().any(|p| p.price < lower || p.price >= upper);

        Ok(if breached {
            Classification::KnockInOrEarlyKnockOut
        } else {
            Classification::NeitherKnockInNorKnockOut
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarError;
    use crate::test_support::{flat_calendar, weekday_calendar, ymd};
    use snowball_core::types::Date;

    /// Contract starting Thu 2020-01-02 (forward search), 12-month tenure,
    /// 3-month lock-in: observations run 2020-04-02 ..= 2021-01-04.
    fn spec(upper: f64, lower: f64) -> ContractSpec {
        ContractSpec::new(ymd(2020, 1, 2), 12, 3, upper, lower).unwrap()
    }

    /// Start price 100, 95 elsewhere, with explicit overrides.
    fn calendar_with(overrides: &[(Date, f64)]) -> TradingCalendar {
        let overrides = overrides.to_vec();
        weekday_calendar(ymd(2020, 1, 1), ymd(2021, 12, 31), move |_, d| {
            if d == ymd(2020, 1, 2) {
                return 100.0;
            }
            overrides
                .iter()
                .find(|(od, _)| *od == d)
                .map(|(_, p)| *p)
                .unwrap_or(95.0)
        })
    }

    #[test]
    fn test_no_knock_out_below_start_price() {
        let cal = calendar_with(&[]);
        let classifier = BarrierClassifier::new(&cal);
        let spec = spec(1.0, 0.8);

        assert_eq!(classifier.base_price(&spec).unwrap(), 100.0);
        assert_eq!(
            classifier.classify_knock_out(&spec).unwrap(),
            Classification::NoKnockOut
        );
        assert_eq!(classifier.knock_out_observation(&spec).unwrap(), None);
        assert_eq!(
            classifier.classify_neither(&spec).unwrap(),
            Classification::NeitherKnockInNorKnockOut
        );
    }

    #[test]
    fn test_flat_price_knocks_out_at_first_observation() {
        let cal = flat_calendar(ymd(2020, 1, 1), ymd(2021, 12, 31), 100.0);
        let classifier = BarrierClassifier::new(&cal);
        let spec = spec(1.0, 0.8);

        let obs = classifier.knock_out_observation(&spec).unwrap().unwrap();
        assert_eq!(obs.index, 1);
        assert_eq!(obs.actual, ymd(2020, 4, 2));
        assert_eq!(
            classifier.classify_knock_out(&spec).unwrap(),
            Classification::KnockOut
        );
    }

    #[test]
    fn test_knock_out_on_later_observation() {
        // Third observation: 2020-01-02 + 5 months = 2020-06-02
        let cal = calendar_with(&[(ymd(2020, 6, 2), 101.0)]);
        let classifier = BarrierClassifier::new(&cal);
        let spec = spec(1.0, 0.8);

        let obs = classifier.knock_out_observation(&spec).unwrap().unwrap();
        assert_eq!(obs.index, 3);
        assert_eq!(obs.actual, ymd(2020, 6, 2));
        assert_eq!(
            classifier.classify_knock_out(&spec).unwrap(),
            Classification::KnockOut
        );
    }

    #[test]
    fn test_spike_between_observations_only_flips_daily_check() {
        let cal = calendar_with(&[(ymd(2020, 6, 10), 120.0)]);
        let classifier = BarrierClassifier::new(&cal);
        let spec = spec(1.0, 0.8);

        assert_eq!(
            classifier.classify_knock_out(&spec).unwrap(),
            Classification::NoKnockOut
        );
        assert_eq!(
            classifier.classify_neither(&spec).unwrap(),
            Classification::KnockInOrEarlyKnockOut
        );
    }

    #[test]
    fn test_knock_in_inside_window() {
        let cal = calendar_with(&[(ymd(2020, 9, 15), 79.0)]);
        let classifier = BarrierClassifier::new(&cal);
        let spec = spec(1.0, 0.8);

        assert_eq!(
            classifier.classify_knock_out(&spec).unwrap(),
            Classification::NoKnockOut
        );
        assert_eq!(
            classifier.classify_neither(&spec).unwrap(),
            Classification::KnockInOrEarlyKnockOut
        );
    }

    #[test]
    fn test_breaches_outside_window_are_ignored() {
        // During lock-in, and the day after the last observation
        let cal = calendar_with(&[(ymd(2020, 2, 10), 50.0), (ymd(2021, 1, 5), 50.0)]);
        let classifier = BarrierClassifier::new(&cal);

        assert_eq!(
            classifier.classify_neither(&spec(1.0, 0.8)).unwrap(),
            Classification::NeitherKnockInNorKnockOut
        );
    }

    #[test]
    fn test_window_endpoints_are_checked() {
        for day in [ymd(2020, 4, 2), ymd(2021, 1, 4)] {
            let cal = calendar_with(&[(day, 70.0)]);
            let classifier = BarrierClassifier::new(&cal);
            assert_eq!(
                classifier.classify_neither(&spec(1.0, 0.8)).unwrap(),
                Classification::KnockInOrEarlyKnockOut,
                "breach on {} should be detected",
                day
            );
        }
    }

    #[test]
    fn test_barrier_boundaries() {
        // Exactly on the lower barrier is not a knock-in
        let cal = calendar_with(&[(ymd(2020, 9, 15), 80.0)]);
        let classifier = BarrierClassifier::new(&cal);
        assert_eq!(
            classifier.classify_neither(&spec(1.0, 0.8)).unwrap(),
            Classification::NeitherKnockInNorKnockOut
        );

        // Exactly on the upper barrier is a breach
        let cal = calendar_with(&[(ymd(2020, 9, 15), 125.0)]);
        let classifier = BarrierClassifier::new(&cal);
        assert_eq!(
            classifier.classify_neither(&spec(1.25, 0.8)).unwrap(),
            Classification::KnockInOrEarlyKnockOut
        );
    }

    #[test]
    fn test_non_trading_start_date() {
        let cal = calendar_with(&[]);
        let classifier = BarrierClassifier::new(&cal);
        let saturday = ymd(2020, 1, 4);
        let spec = ContractSpec::new(saturday, 12, 3, 1.0, 0.8).unwrap();

        let expected = ScheduleError::Calendar(CalendarError::NotATradingDay { date: saturday });
        assert_eq!(classifier.classify_knock_out(&spec), Err(expected.clone()));
        assert_eq!(classifier.classify_neither(&spec), Err(expected));
    }

    #[test]
    fn test_horizon_beyond_calendar_is_exhausted() {
        let cal = calendar_with(&[]);
        let classifier = BarrierClassifier::new(&cal);
        // 2021-06-01 + 12 months is past 2021-12-31
        let spec = ContractSpec::new(ymd(2021, 6, 1), 12, 3, 1.0, 0.8).unwrap();

        assert!(classifier
            .classify_neither(&spec)
            .unwrap_err()
            .is_calendar_exhausted());
    }

    #[test]
    fn test_classification_display_and_flags() {
        assert_eq!(Classification::NoKnockOut.flag(), Some(0));
        assert_eq!(Classification::NeitherKnockInNorKnockOut.flag(), Some(1));
        assert!(Classification::Indeterminate.is_indeterminate());
        assert!(!Classification::KnockOut.is_indeterminate());
        assert_eq!(Classification::KnockOut.to_string(), "knock-out");
    }
}
