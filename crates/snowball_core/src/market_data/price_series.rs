//! Price series with dense chronological ordinals.

use crate::types::{Date, SeriesError};

/// A single historical observation of the underlying.
///
/// The ordinal is 1-based and assigned in chronological order
/// (oldest = 1, newest = N).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePoint {
    /// Dense chronological index, starting at 1.
    pub ordinal: usize,
    /// Trading date of the observation.
    pub date: Date,
    /// Closing price (strictly positive).
    pub price: f64,
}

impl PricePoint {
    /// Creates a new price point.
    pub fn new(ordinal: usize, date: Date, price: f64) -> Self {
        Self {
            ordinal,
            date,
            price,
        }
    }
}

/// Validated price history.
///
/// Invariants enforced at construction:
/// - at least one point
/// - ordinals are exactly `1..=N` in order
/// - dates are strictly increasing (no duplicates)
/// - prices are finite and strictly positive
///
/// # Examples
///
/// ```
/// use snowball_core::market_data::{PricePoint, PriceSeries};
/// use snowball_core::types::Date;
///
/// let d1 = Date::from_ymd(2024, 1, 2).unwrap();
/// let d2 = Date::from_ymd(2024, 1, 3).unwrap();
///
/// let series = PriceSeries::new(vec![
///     PricePoint::new(1, d1, 100.0),
///     PricePoint::new(2, d2, 99.0),
/// ]).unwrap();
/// assert_eq!(series.first().date, d1);
/// assert_eq!(series.last().date, d2);
///
/// // Out-of-order dates are rejected
/// let bad = PriceSeries::new(vec![
///     PricePoint::new(1, d2, 100.0),
///     PricePoint::new(2, d1, 99.0),
/// ]);
/// assert!(bad.is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series from points that already carry their ordinals.
    ///
    /// # Errors
    ///
    /// Returns a [`SeriesError`] describing the first violated invariant.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        if points.is_empty() {
            return Err(SeriesError::Empty);
        }

        let mut previous: Option<Date> = None;
        for (i, point) in points.iter().enumerate() {
            let expected = i + 1;
            if point.ordinal != expected {
                return Err(SeriesError::InvalidOrdinal {
                    expected,
                    found: point.ordinal,
                });
            }

            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(SeriesError::InvalidPrice {
                    date: point.date,
                    price: point.price,
                });
            }

            if let Some(prev) = previous {
                if point.date <= prev {
                    return Err(SeriesError::NonIncreasingDate {
                        ordinal: point.ordinal,
                        previous: prev,
                        date: point.date,
                    });
                }
            }
            previous = Some(point.date);
        }

        Ok(Self { points })
    }

    /// Creates a series from chronologically ordered `(date, price)` pairs,
    /// assigning ordinals `1..=N`.
    pub fn from_date_prices<I>(pairs: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (Date, f64)>,
    {
        let points = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (date, price))| PricePoint::new(i + 1, date, price))
            .collect();
        Self::new(points)
    }

    /// Returns all points, oldest first.
    #[inline]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: an empty series cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the oldest point.
    #[inline]
    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    /// Returns the newest point.
    #[inline]
    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }
}
