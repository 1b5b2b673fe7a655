//! Historical sweep over every candidate contract start date.
//!
//! Each row of the calendar is treated as a contract start date. Rows whose
//! date is later than `last_date - tenure` months lack the trailing history
//! to complete the contract and are marked `Indeterminate` without being
//! classified. Eligible rows run both barrier checks independently.
//!
//! Rows are independent of each other, so large calendars are evaluated on
//! rayon; output order always follows the calendar.
//!
//! # Examples
//!
//! ```
//! use snowball_core::market_data::PriceSeries;
//! use snowball_core::types::Date;
//! use snowball_models::calendar::TradingCalendar;
//! use snowball_models::instruments::ContractTerms;
//! use snowball_models::sweep::{ContractSweep, SweepSummary};
//!
//! let start = Date::from_ymd(2021, 1, 1).unwrap();
//! // Steadily falling price: nothing ever knocks out
//! let series = PriceSeries::from_date_prices(
//!     (0..800).map(|i| (start.add_days(i).unwrap(), 100.0 - 0.01 * i as f64)),
//! )
//! .unwrap();
//! let calendar = TradingCalendar::new(series);
//!
//! let sweep = ContractSweep::new(&calendar, ContractTerms::default());
//! let records = sweep.run().unwrap();
//! let summary = SweepSummary::from_records(&records);
//!
//! assert_eq!(summary.rows, 800);
//! assert_eq!(summary.knock_outs, 0);
//! assert_eq!(summary.knock_out_rate(), Some(0.0));
//! ```

mod error;
mod parallel;
mod summary;

pub use error::SweepError;
pub use parallel::{ParallelConfig, DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD};
pub use summary::SweepSummary;

use crate::barrier::{BarrierClassifier, Classification};
use crate::calendar::{CalendarError, TradingCalendar};
use crate::instruments::ContractTerms;
use crate::schedules::ScheduleError;
use rayon::prelude::*;
use snowball_core::market_data::PricePoint;
use snowball_core::types::Date;
use tracing::{error, info, warn};

/// Result row for one candidate start date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepRecord {
    /// Calendar ordinal of the start date.
    pub ordinal: usize,
    /// Contract start date.
    pub date: Date,
    /// Price on the start date.
    pub price: f64,
    /// Monthly knock-out check.
    pub knock_out: Classification,
    /// Daily knock-in / knock-out check.
    pub neither: Classification,
    /// Actual date of the first knock-out observation, if any.
    pub knock_out_date: Option<Date>,
}

impl SweepRecord {
    fn indeterminate(point: &PricePoint) -> Self {
        Self {
            ordinal: point.ordinal,
            date: point.date,
            price: point.price,
            knock_out: Classification::Indeterminate,
            neither: Classification::Indeterminate,
            knock_out_date: None,
        }
    }

    /// `Some(1)` knocked out, `Some(0)` did not, `None` indeterminate.
    #[inline]
    pub fn knock_out_flag(&self) -> Option<u8> {
        self.knock_out.flag()
    }

    /// `Some(1)` neither barrier breached, `Some(0)` breached, `None` indeterminate.
    #[inline]
    pub fn neither_flag(&self) -> Option<u8> {
        self.neither.flag()
    }
}

/// Applies the barrier checks to every row of a calendar.
#[derive(Debug, Clone)]
pub struct ContractSweep<'a> {
    calendar: &'a TradingCalendar,
    terms: ContractTerms,
    parallel: ParallelConfig,
}

impl<'a> ContractSweep<'a> {
    /// Creates a sweep with the default parallel configuration.
    pub fn new(calendar: &'a TradingCalendar, terms: ContractTerms) -> Self {
        Self {
            calendar,
            terms,
            parallel: ParallelConfig::default(),
        }
    }

    /// Overrides the parallel configuration.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Contract terms applied to every row.
    #[inline]
    pub fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    /// Latest start date with a full tenure of history behind it:
    /// `last_date - tenure` calendar months.
    pub fn eligibility_cutoff(&self) -> Result<Date, SweepError> {
        Ok(self.calendar.last_date().sub_months(self.terms.tenure())?)
    }

    /// Classifies every row, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::CalendarExhausted`] when an eligible row's
    /// observation search leaves the calendar. Other date errors degrade
    /// the row to `Indeterminate`.
    pub fn run(&self) -> Result<Vec<SweepRecord>, SweepError> {
        let cutoff = self.eligibility_cutoff()?;
        let classifier = BarrierClassifier::new(self.calendar);
        let points = self.calendar.points();

        info!(
            rows = points.len(),
            tenure = self.terms.tenure(),
            lock_in_period = self.terms.lock_in_period(),
            upper_ratio = self.terms.upper_ratio(),
            lower_ratio = self.terms.lower_ratio(),
            %cutoff,
            "starting contract sweep"
        );

        let records: Vec<SweepRecord> = if self.parallel.should_parallelize(points.len()) {
            points
                .par_iter()
                .with_min_len(self.parallel.batch_size)
                .map(|p| self.evaluate(&classifier, p, cutoff))
                .collect::<Result<_, _>>()?
        } else {
            points
                .iter()
                .map(|p| self.evaluate(&classifier, p, cutoff))
                .collect::<Result<_, _>>()?
        };

        let summary = SweepSummary::from_records(&records);
        info!(
            rows = summary.rows,
            evaluated = summary.knock_out_evaluated,
            knock_outs = summary.knock_outs,
            neithers = summary.neithers,
            "contract sweep complete"
        );

        Ok(records)
    }

    /// Classifies a single row against a precomputed cutoff.
    fn evaluate(
        &self,
        classifier: &BarrierClassifier<'_>,
        point: &PricePoint,
        cutoff: Date,
    ) -> Result<SweepRecord, SweepError> {
        if point.date > cutoff {
            return Ok(SweepRecord::indeterminate(point));
        }

        let spec = self.terms.for_start(point.date);

        let (knock_out, knock_out_date) = match classifier.knock_out_observation(&spec) {
            Ok(Some(obs)) => (Classification::KnockOut, Some(obs.actual)),
            Ok(None) => (Classification::NoKnockOut, None),
            Err(e) => (degrade(point, e)?, None),
        };

        let neither = match classifier.classify_neither(&spec) {
            Ok(c) => c,
            Err(e) => degrade(point, e)?,
        };

        Ok(SweepRecord {
            ordinal: point.ordinal,
            date: point.date,
            price: point.price,
            knock_out,
            neither,
            knock_out_date,
        })
    }
}

/// Maps a row-level failure to `Indeterminate`, except calendar exhaustion
/// on an eligible row which aborts the sweep.
fn degrade(point: &PricePoint, err: ScheduleError) -> Result<Classification, SweepError> {
    match err {
        ScheduleError::Calendar(source @ CalendarError::CalendarExhausted { .. }) => {
            error!(
                ordinal = point.ordinal,
                date = %point.date,
                error = %source,
                "eligible row ran off the calendar"
            );
            Err(SweepError::CalendarExhausted {
                ordinal: point.ordinal,
                date: point.date,
                source,
            })
        }
        other => {
            warn!(
                ordinal = point.ordinal,
                date = %point.date,
                error = %other,
                "row degraded to indeterminate"
            );
            Ok(Classification::Indeterminate)
        }
    }
}
