//! ContractTerms, ContractSpec and ContractSpecBuilder implementation.

use super::error::ContractError;
use snowball_core::types::Date;

/// Default contract life in months.
pub(crate) const DEFAULT_TENURE: u32 = 24;
/// Default lock-in period in months.
pub(crate) const DEFAULT_LOCK_IN: u32 = 3;
/// Default knock-out barrier as a fraction of the start price.
pub(crate) const DEFAULT_UPPER_RATIO: f64 = 1.0;
/// Default knock-in barrier as a fraction of the start price.
pub(crate) const DEFAULT_LOWER_RATIO: f64 = 0.8;

/// Snowball terms independent of the start date.
///
/// # Examples
///
/// ```
/// use snowball_models::instruments::ContractTerms;
///
/// let terms = ContractTerms::default();
/// assert_eq!(terms.tenure(), 24);
/// assert_eq!(terms.lock_in_period(), 3);
/// assert_eq!(terms.observation_count(), 22);
///
/// assert!(ContractTerms::new(2, 3, 1.0, 0.8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContractTerms {
    tenure: u32,
    lock_in_period: u32,
    upper_ratio: f64,
    lower_ratio: f64,
}

impl Default for ContractTerms {
    fn default() -> Self {
        Self {
            tenure: DEFAULT_TENURE,
            lock_in_period: DEFAULT_LOCK_IN,
            upper_ratio: DEFAULT_UPPER_RATIO,
            lower_ratio: DEFAULT_LOWER_RATIO,
        }
    }
}

impl ContractTerms {
    /// Creates validated terms.
    ///
    /// # Errors
    ///
    /// - `lock_in_period` is zero
    /// - `tenure < lock_in_period`
    /// - `upper_ratio` is not finite and positive
    /// - `lower_ratio` is not in `(0, upper_ratio]`
    pub fn new(
        tenure: u32,
        lock_in_period: u32,
        upper_ratio: f64,
        lower_ratio: f64,
    ) -> Result<Self, ContractError> {
        if lock_in_period < 1 {
            return Err(ContractError::InvalidLockIn { lock_in_period });
        }

        if tenure < lock_in_period {
            return Err(ContractError::TenureShorterThanLockIn {
                tenure,
                lock_in_period,
            });
        }

        if !upper_ratio.is_finite() || upper_ratio <= 0.0 {
            return Err(ContractError::InvalidUpperRatio { upper_ratio });
        }

        if !lower_ratio.is_finite() || lower_ratio <= 0.0 || lower_ratio > upper_ratio {
            return Err(ContractError::InvalidLowerRatio {
                lower_ratio,
                upper_ratio,
            });
        }

        Ok(Self {
            tenure,
            lock_in_period,
            upper_ratio,
            lower_ratio,
        })
    }

    /// Total contract life in months.
    #[inline]
    pub fn tenure(&self) -> u32 {
        self.tenure
    }

    /// Months before the first observation.
    #[inline]
    pub fn lock_in_period(&self) -> u32 {
        self.lock_in_period
    }

    /// Knock-out barrier as a fraction of the start price.
    #[inline]
    pub fn upper_ratio(&self) -> f64 {
        self.upper_ratio
    }

    /// Knock-in barrier as a fraction of the start price.
    #[inline]
    pub fn lower_ratio(&self) -> f64 {
        self.lower_ratio
    }

    /// Number of monthly observations: `tenure - lock_in_period + 1`.
    #[inline]
    pub fn observation_count(&self) -> u32 {
        self.tenure - self.lock_in_period + 1
    }

    /// Binds these terms to a start date.
    pub fn for_start(&self, start_date: Date) -> ContractSpec {
        ContractSpec {
            start_date,
            terms: *self,
        }
    }
}

/// A snowball contract evaluated from one start date.
///
/// # Examples
///
/// ```
/// use snowball_core::types::Date;
/// use snowball_models::instruments::ContractTerms;
///
/// let start = Date::from_ymd(2019, 11, 29).unwrap();
/// let spec = ContractTerms::default().for_start(start);
/// assert_eq!(spec.start_date(), start);
/// assert_eq!(spec.upper_ratio(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContractSpec {
    start_date: Date,
    terms: ContractTerms,
}

impl ContractSpec {
    /// Creates a validated contract specification.
    pub fn new(
        start_date: Date,
        tenure: u32,
        lock_in_period: u32,
        upper_ratio: f64,
        lower_ratio: f64,
    ) -> Result<Self, ContractError> {
        ContractTerms::new(tenure, lock_in_period, upper_ratio, lower_ratio)
            .map(|terms| terms.for_start(start_date))
    }

    /// Contract start date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// The date-independent terms.
    #[inline]
    pub fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    /// Total contract life in months.
    #[inline]
    pub fn tenure(&self) -> u32 {
        self.terms.tenure
    }

    /// Months before the first observation.
    #[inline]
    pub fn lock_in_period(&self) -> u32 {
        self.terms.lock_in_period
    }

    /// Knock-out barrier as a fraction of the start price.
    #[inline]
    pub fn upper_ratio(&self) -> f64 {
        self.terms.upper_ratio
    }

    /// Knock-in barrier as a fraction of the start price.
    #[inline]
    pub fn lower_ratio(&self) -> f64 {
        self.terms.lower_ratio
    }

    /// Number of monthly observations.
    #[inline]
    pub fn observation_count(&self) -> u32 {
        self.terms.observation_count()
    }
}

/// Builder for constructing contract specifications.
///
/// Unset terms fall back to tenure 24, lock-in 3, upper ratio 1.0 and
/// lower ratio 0.8. The start date is required.
///
/// # Examples
///
/// ```
/// use snowball_core::types::Date;
/// use snowball_models::instruments::ContractSpecBuilder;
///
/// let spec = ContractSpecBuilder::new()
///     .start(Date::from_ymd(2024, 1, 15).unwrap())
///     .tenure(12)
///     .upper_ratio(1.03)
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.tenure(), 12);
/// assert_eq!(spec.lock_in_period(), 3);
/// assert_eq!(spec.lower_ratio(), 0.8);
/// ```
#[derive(Debug, Clone)]
pub struct ContractSpecBuilder {
    start_date: Option<Date>,
    tenure: u32,
    lock_in_period: u32,
    upper_ratio: f64,
    lower_ratio: f64,
}

impl Default for ContractSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractSpecBuilder {
    /// Creates a new builder with default terms.
    pub fn new() -> Self {
        Self {
            start_date: None,
            tenure: DEFAULT_TENURE,
            lock_in_period: DEFAULT_LOCK_IN,
            upper_ratio: DEFAULT_UPPER_RATIO,
            lower_ratio: DEFAULT_LOWER_RATIO,
        }
    }

    /// Sets the contract start date.
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the tenure in months.
    pub fn tenure(mut self, months: u32) -> Self {
        self.tenure = months;
        self
    }

    /// Sets the lock-in period in months.
    pub fn lock_in_period(mut self, months: u32) -> Self {
        self.lock_in_period = months;
        self
    }

    /// Sets the knock-out barrier ratio.
    pub fn upper_ratio(mut self, ratio: f64) -> Self {
        self.upper_ratio = ratio;
        self
    }

    /// Sets the knock-in barrier ratio.
    pub fn lower_ratio(mut self, ratio: f64) -> Self {
        self.lower_ratio = ratio;
        self
    }

    /// Builds the specification.
    ///
    /// # Errors
    ///
    /// Returns an error if the start date is missing or the terms are invalid.
    pub fn build(self) -> Result<ContractSpec, ContractError> {
        let start = self
            .start_date
            .ok_or(ContractError::MissingField { field: "start" })?;
        ContractSpec::new(
            start,
            self.tenure,
            self.lock_in_period,
            self.upper_ratio,
            self.lower_ratio,
        )
    }
}
