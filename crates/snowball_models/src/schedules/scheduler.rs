//! ObservationScheduler and ObservationDate implementation.

use super::error::ScheduleError;
use crate::calendar::{CalendarError, SearchDirection, TradingCalendar};
use crate::instruments::ContractSpec;
use snowball_core::types::{Date, DateError};
use tracing::debug;

/// Last day-of-month whose contracts resolve observations forward.
pub const FORWARD_SEARCH_LAST_DAY: u32 = 15;

/// A monthly observation resolved to a trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ObservationDate {
    /// 1-based observation index after lock-in.
    pub index: u32,
    /// Pure calendar-month offset from the start date; may be a non-trading day.
    pub theoretical: Date,
    /// Trading day the theoretical date resolved to.
    pub actual: Date,
    /// Calendar ordinal of `actual`.
    pub ordinal: usize,
}

/// Resolves monthly observation dates against a trading calendar.
///
/// Holds only a borrowed calendar; every query is pure.
#[derive(Debug, Clone, Copy)]
pub struct ObservationScheduler<'a> {
    calendar: &'a TradingCalendar,
}

impl<'a> ObservationScheduler<'a> {
    /// Creates a scheduler over `calendar`.
    pub fn new(calendar: &'a TradingCalendar) -> Self {
        Self { calendar }
    }

    /// Returns the underlying calendar.
    #[inline]
    pub fn calendar(&self) -> &'a TradingCalendar {
        self.calendar
    }

    /// Search direction for contracts starting on `start_date`.
    ///
    /// Days 1-15 search forward, later days search backward. The theoretical
    /// observation date's own day-of-month plays no part.
    ///
    /// # Examples
    ///
    /// ```
    /// use snowball_core::types::Date;
    /// use snowball_models::calendar::SearchDirection;
    /// use snowball_models::schedules::ObservationScheduler;
    ///
    /// let d15 = Date::from_ymd(2024, 3, 15).unwrap();
    /// let d16 = Date::from_ymd(2024, 3, 16).unwrap();
    /// assert_eq!(ObservationScheduler::search_direction(d15), SearchDirection::Forward);
    /// assert_eq!(ObservationScheduler::search_direction(d16), SearchDirection::Backward);
    /// ```
    pub fn search_direction(start_date: Date) -> SearchDirection {
        if (1..=FORWARD_SEARCH_LAST_DAY).contains(&start_date.day()) {
            SearchDirection::Forward
        } else {
            SearchDirection::Backward
        }
    }

    /// Computes the theoretical date of observation `index`:
    /// `start_date + (lock_in_period - 1 + index)` calendar months.
    ///
    /// # Errors
    ///
    /// - `index` or `lock_in_period` is zero
    /// - `start_date` is not a trading day
    pub fn theoretical_date(
        &self,
        start_date: Date,
        lock_in_period: u32,
        index: u32,
    ) -> Result<Date, ScheduleError> {
        if index < 1 {
            return Err(ScheduleError::InvalidObservationIndex { index });
        }
        if lock_in_period < 1 {
            return Err(ScheduleError::InvalidLockIn { lock_in_period });
        }
        if !self.calendar.is_trading_day(start_date) {
            return Err(CalendarError::NotATradingDay { date: start_date }.into());
        }

        let months = (lock_in_period - 1)
            .checked_add(index)
            .ok_or_else(|| DateError::Overflow {
                reason: format!(
                    "Observation {} after a {}-month lock-in overflowed",
                    index, lock_in_period
                ),
            })?;

        Ok(start_date.add_months(months)?)
    }

    /// Resolves observation `index` to an actual trading day.
    pub fn actual_date(
        &self,
        start_date: Date,
        lock_in_period: u32,
        index: u32,
    ) -> Result<Date, ScheduleError> {
        self.observation(start_date, lock_in_period, index)
            .map(|obs| obs.actual)
    }

    /// Resolves observation `index` with its theoretical date and ordinal.
    ///
    /// # Errors
    ///
    /// Everything [`theoretical_date`](Self::theoretical_date) rejects, plus
    /// [`CalendarError::CalendarExhausted`] when the trading-day search leaves
    /// the calendar's date range.
    ///
    /// Candidates outside `[first_date, last_date]` end the search, so a
    /// backward search whose theoretical date falls after the last trading day is
    /// exhausted even though earlier trading days exist; contracts whose
    /// tenure fits inside the calendar never hit this.
    pub fn observation(
        &self,
        start_date: Date,
        lock_in_period: u32,
        index: u32,
    ) -> Result<ObservationDate, ScheduleError> {
        let theoretical = self.theoretical_date(start_date, lock_in_period, index)?;
        let direction = Self::search_direction(start_date);
        let actual = self.calendar.nearest_trading_day(theoretical, direction)?;
        let ordinal = self.calendar.ordinal_of(actual)?;

        debug!(
            start = %start_date,
            index,
            %theoretical,
            %actual,
            %direction,
            "resolved observation date"
        );

        Ok(ObservationDate {
            index,
            theoretical,
            actual,
            ordinal,
        })
    }

    /// Resolves observations `1..=count`.
    pub fn observations(
        &self,
        start_date: Date,
        lock_in_period: u32,
        count: u32,
    ) -> Result<Vec<ObservationDate>, ScheduleError> {
        (1..=count)
            .map(|i| self.observation(start_date, lock_in_period, i))
            .collect()
    }

    /// Resolves the full observation schedule of `spec`.
    pub fn schedule_for(&self, spec: &ContractSpec) -> Result<Vec<ObservationDate>, ScheduleError> {
        self.observations(
            spec.start_date(),
            spec.lock_in_period(),
            spec.observation_count(),
        )
    }
}
