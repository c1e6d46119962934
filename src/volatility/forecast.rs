//! Walk-forward variance forecasting.
//!
//! Purpose
//! -------
//! Re-fit a model on a sliding in-sample window and emit strictly
//! out-of-sample one-step-ahead variance forecasts aligned to the full
//! original index.
//!
//! Key behaviors
//! -------------
//! - For every position `end` from `window` to `n - 1`, fit a fresh model on
//!   `[end - window, end)` and store `forecast(1)` at absolute index `end`.
//! - Leave every position before `window` undefined (`NaN` sentinel).
//! - Construct each window's model independently; no parameter
//!   warm-starting crosses iteration boundaries, so iterations have no data
//!   dependency on each other.
//!
//! Conventions
//! -----------
//! - The forecast stored at position `end` predicts the variance realized at
//!   that same position, having been trained only on data strictly before
//!   it. No look-ahead.
//! - Iterations are independent and could be fanned out across threads as
//!   long as results land at their absolute index; the implementation here
//!   is the sequential loop.
use crate::volatility::{
    core::{data::ReturnSeries, options::VolOptions, spec::VarianceSpec},
    errors::{VolError, VolResult},
    models::garch::GarchModel,
};
use chrono::NaiveDate;
use ndarray::Array1;

/// ForecastSeries — variance forecasts aligned to a full return-series
/// index.
///
/// Positions before the first full training window hold `f64::NAN`; every
/// later position holds a finite one-step-ahead variance forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    /// Date axis copied from the input series.
    pub index: Vec<NaiveDate>,
    /// Forecast values; `NaN` marks undefined positions.
    pub values: Array1<f64>,
}

impl ForecastSeries {
    /// Number of positions (defined or not).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no positions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of defined (non-NaN) forecasts.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

/// Fit-and-forecast over a sliding window.
///
/// ## Arguments
/// - `returns`: full cleaned return series.
/// - `spec`: variance recursion to fit in every window.
/// - `options`: optimizer settings and guards shared by all windows.
/// - `window`: in-sample window length `W`.
///
/// ## Behavior
/// For each `end` in `window..n`: fit a fresh [`GarchModel`] on the slice
/// `[end - window, end)`, forecast one step, and write the value at index
/// `end`. The output has length `n`, with the first `window` positions NaN
/// and the remaining `n - window` positions finite.
///
/// ## Errors
/// - [`VolError::WindowTooSmall`] if `window < 2`.
/// - [`VolError::WindowExceedsSeries`] if `returns.len() < window + 1`.
/// - Propagates fit/forecast errors from individual windows (these indicate
///   misconfiguration; ordinary non-convergence degrades inside the fit and
///   does not abort the run).
pub fn rolling_forecast(
    returns: &ReturnSeries, spec: VarianceSpec, options: &VolOptions, window: usize,
) -> VolResult<ForecastSeries> {
    if window < 2 {
        return Err(VolError::WindowTooSmall { window });
    }
    let n = returns.len();
    if n < window + 1 {
        return Err(VolError::WindowExceedsSeries { window, len: n });
    }

    let mut values = Array1::from_elem(n, f64::NAN);
    for end in window..n {
        let insample = returns.slice(end - window, end)?;
        let mut model = GarchModel::new(spec, options.clone());
        model.fit(&insample)?;
        values[end] = model.forecast(1)?;
    }
    Ok(ForecastSeries { index: returns.index.clone(), values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ndarray::Array1;
    use rand::{rngs::StdRng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Output length and NaN-prefix alignment of `rolling_forecast`.
    // - Window validation errors.
    //
    // They intentionally DO NOT cover:
    // - Forecast accuracy (evaluation tests) or fit internals (model tests).
    // -------------------------------------------------------------------------

    fn normal_series(n: usize, scale: f64, seed: u64) -> ReturnSeries {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, scale).unwrap();
        let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
        let index = (0..n).map(|i| start + chrono::Duration::days(i as i64)).collect();
        let values = Array1::from_iter((0..n).map(|_| normal.sample(&mut rng)));
        ReturnSeries::new(index, values).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // On a 600-point series with window 400, the output is 600 long with
    // positions 0–399 undefined and exactly 200 finite forecasts.
    //
    // Given
    // -----
    // - 600 normal draws at scale 0.01 and window = 400.
    //
    // Expect
    // ------
    // - `len == 600`; first 400 values NaN; remaining 200 finite and
    //   positive; `defined_count == 200`.
    fn rolling_forecast_aligns_to_full_index() {
        // Arrange
        let series = normal_series(600, 0.01, 2);

        // Act
        let forecasts =
            rolling_forecast(&series, VarianceSpec::Garch, &VolOptions::default(), 400)
                .expect("rolling forecast should succeed");

        // Assert
        assert_eq!(forecasts.len(), 600);
        assert_eq!(forecasts.index.len(), 600);
        assert!(forecasts.values.iter().take(400).all(|v| v.is_nan()));
        assert!(forecasts.values.iter().skip(400).all(|v| v.is_finite() && *v > 0.0));
        assert_eq!(forecasts.defined_count(), 200);
    }

    #[test]
    // Purpose
    // -------
    // Window validation fails fast before any fit is attempted.
    //
    // Given
    // -----
    // - A 50-point series with window 1 (too small) and window 50 (needs at
    //   least window + 1 observations).
    //
    // Expect
    // ------
    // - `WindowTooSmall` and `WindowExceedsSeries` respectively.
    fn rolling_forecast_validates_window() {
        let series = normal_series(50, 0.01, 4);
        let options = VolOptions::default();
        assert!(matches!(
            rolling_forecast(&series, VarianceSpec::Garch, &options, 1),
            Err(VolError::WindowTooSmall { window: 1 })
        ));
        assert!(matches!(
            rolling_forecast(&series, VarianceSpec::Garch, &options, 50),
            Err(VolError::WindowExceedsSeries { window: 50, len: 50 })
        ));
    }
}
