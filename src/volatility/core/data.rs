//! Validated return-series container for conditional-variance models.
//!
//! Purpose
//! -------
//! Provide the canonical input type, [`ReturnSeries`], for every fitting and
//! forecasting routine in the crate: a date axis paired with floating-point
//! returns, validated once at construction so downstream code can assume
//! clean data.
//!
//! Key behaviors
//! -------------
//! - Enforce on construction: equal index/value lengths, non-emptiness,
//!   strictly increasing timestamps, and finite values.
//! - Expose cheap accessors (`len`, `last_return`) and an owned window
//!   extractor (`slice`) used by the rolling forecast engine.
//!
//! Invariants & assumptions
//! ------------------------
//! - Missing-value handling happens upstream (an external cleaning step);
//!   this type re-checks only the cheap structural guarantees it needs.
//! - Once constructed, a `ReturnSeries` is never mutated. Re-fitting works
//!   on fresh slices, not in-place edits.
//!
//! Conventions
//! -----------
//! - Timestamps are `chrono::NaiveDate` values; no timezone or intraday
//!   resolution is modeled.
//! - Returns are plain (not log-scaled by this crate) and may be any finite
//!   real number including zero and negatives.
use crate::volatility::errors::{VolError, VolResult};
use chrono::NaiveDate;
use ndarray::Array1;

/// ReturnSeries — immutable (date, return) series with validated structure.
///
/// Purpose
/// -------
/// Carry a cleaned return series into fits and forecasts, with the
/// structural invariants (ordering, finiteness) checked exactly once.
///
/// Fields
/// ------
/// - `index`: `Vec<NaiveDate>`
///   Strictly increasing date axis, one entry per return.
/// - `values`: `Array1<f64>`
///   Finite returns aligned with `index`.
///
/// Invariants
/// ----------
/// - `index.len() == values.len() > 0`.
/// - `index[t] < index[t + 1]` for every consecutive pair.
/// - Every value is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    /// Strictly increasing date axis.
    pub index: Vec<NaiveDate>,
    /// Finite returns aligned with `index`.
    pub values: Array1<f64>,
}

impl ReturnSeries {
    /// Construct a validated return series.
    ///
    /// # Arguments
    /// - `index`: date axis, strictly increasing.
    /// - `values`: returns aligned with `index`, all finite.
    ///
    /// # Errors
    /// - [`VolError::EmptySeries`] for zero-length input.
    /// - [`VolError::IndexLengthMismatch`] if lengths differ.
    /// - [`VolError::NonMonotonicIndex`] at the first out-of-order timestamp.
    /// - [`VolError::NonFiniteReturn`] at the first NaN/±inf value.
    pub fn new(index: Vec<NaiveDate>, values: Array1<f64>) -> VolResult<Self> {
        if index.len() != values.len() {
            return Err(VolError::IndexLengthMismatch {
                index_len: index.len(),
                values_len: values.len(),
            });
        }
        if values.is_empty() {
            return Err(VolError::EmptySeries);
        }
        for (i, pair) in index.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(VolError::NonMonotonicIndex { index: i + 1 });
            }
        }
        for (i, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(VolError::NonFiniteReturn { index: i, value });
            }
        }
        Ok(Self { index, values })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty. Always `false` for a constructed series;
    /// present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The most recent observed return.
    pub fn last_return(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Extract the half-open window `[start, end)` as an owned series.
    ///
    /// Validation is skipped for the copied data: a sub-range of a valid
    /// series is valid by construction.
    ///
    /// # Errors
    /// Returns [`VolError::InvalidSliceRange`] if `start >= end` or
    /// `end > len`.
    pub fn slice(&self, start: usize, end: usize) -> VolResult<ReturnSeries> {
        if start >= end || end > self.len() {
            return Err(VolError::InvalidSliceRange { start, end, len: self.len() });
        }
        Ok(ReturnSeries {
            index: self.index[start..end].to_vec(),
            values: self.values.slice(ndarray::s![start..end]).to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Constructor validation: lengths, emptiness, ordering, finiteness.
    // - Window extraction via `slice`, including range errors.
    //
    // They intentionally DO NOT cover:
    // - Anything involving fitted models (covered in the model tests).
    // -------------------------------------------------------------------------

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        (0..n).map(|i| start + chrono::Duration::days(i as i64)).collect()
    }

    #[test]
    // Purpose
    // -------
    // A well-formed (dates, returns) pair constructs successfully and
    // reports its length and last return.
    //
    // Given
    // -----
    // - Four consecutive dates and four finite returns.
    //
    // Expect
    // ------
    // - Construction succeeds; `len` is 4 and `last_return` matches the
    //   final value.
    fn constructs_valid_series() {
        let series = ReturnSeries::new(dates(4), array![0.01, -0.02, 0.0, 0.03]).unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series.last_return(), 0.03);
    }

    #[test]
    // Purpose
    // -------
    // Structural defects are rejected with the matching error variant.
    //
    // Given
    // -----
    // - Mismatched lengths, an empty pair, a repeated date, and a NaN value.
    //
    // Expect
    // ------
    // - Each construction fails with its specific `VolError` variant.
    fn rejects_structural_defects() {
        assert!(matches!(
            ReturnSeries::new(dates(3), array![0.01, 0.02]),
            Err(VolError::IndexLengthMismatch { index_len: 3, values_len: 2 })
        ));
        assert!(matches!(
            ReturnSeries::new(Vec::new(), Array1::zeros(0)),
            Err(VolError::EmptySeries)
        ));

        let mut repeated = dates(3);
        repeated[2] = repeated[1];
        assert!(matches!(
            ReturnSeries::new(repeated, array![0.01, 0.02, 0.03]),
            Err(VolError::NonMonotonicIndex { index: 2 })
        ));

        assert!(matches!(
            ReturnSeries::new(dates(3), array![0.01, f64::NAN, 0.03]),
            Err(VolError::NonFiniteReturn { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `slice` extracts the requested half-open window and rejects invalid
    // ranges.
    //
    // Given
    // -----
    // - A 5-element series, the window [1, 4), and the range [3, 3).
    //
    // Expect
    // ------
    // - The window has length 3 with matching values and dates; the empty
    //   range fails with `InvalidSliceRange`.
    fn slice_extracts_window() {
        // Arrange
        let series = ReturnSeries::new(dates(5), array![0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();

        // Act
        let window = series.slice(1, 4).unwrap();

        // Assert
        assert_eq!(window.len(), 3);
        assert_eq!(window.values, array![0.2, 0.3, 0.4]);
        assert_eq!(window.index[0], series.index[1]);
        assert!(matches!(series.slice(3, 3), Err(VolError::InvalidSliceRange { .. })));
    }
}
