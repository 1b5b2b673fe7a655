//! Contract validation error types.

use thiserror::Error;

/// Errors raised when contract terms violate their invariants.
///
/// # Examples
/// ```
/// use snowball_models::instruments::ContractError;
///
/// let err = ContractError::TenureShorterThanLockIn { tenure: 2, lock_in_period: 3 };
/// assert!(err.to_string().contains("tenure 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    /// Lock-in period must be at least one month.
    #[error("Invalid lock-in period: {lock_in_period} months (must be >= 1)")]
    InvalidLockIn {
        /// The rejected lock-in period.
        lock_in_period: u32,
    },

    /// Tenure must cover the lock-in period.
    #[error("Invalid tenure {tenure} months: shorter than lock-in period {lock_in_period}")]
    TenureShorterThanLockIn {
        /// The rejected tenure.
        tenure: u32,
        /// The lock-in period it was compared against.
        lock_in_period: u32,
    },

    /// Upper barrier ratio must be finite and positive.
    #[error("Invalid upper ratio: {upper_ratio}")]
    InvalidUpperRatio {
        /// The rejected ratio.
        upper_ratio: f64,
    },

    /// Lower barrier ratio must satisfy `0 < lower <= upper`.
    #[error("Invalid lower ratio {lower_ratio} for upper ratio {upper_ratio}")]
    InvalidLowerRatio {
        /// The rejected ratio.
        lower_ratio: f64,
        /// The upper ratio it was compared against.
        upper_ratio: f64,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
}
