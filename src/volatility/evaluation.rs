//! Forecast evaluation and model comparison.
//!
//! Purpose
//! -------
//! Score variance forecasts against a realized-variance proxy (squared
//! returns) and compare models through likelihood-based information
//! criteria, producing one row per (asset, model) pair.
//!
//! Key behaviors
//! -------------
//! - [`rmse`] / [`mae`] evaluate point-forecast error only over positions
//!   where both the forecast and the realized proxy are defined.
//! - [`aic`] / [`bic`] penalize model complexity on top of a reference
//!   fit's log-likelihood; lower is better for both.
//! - [`evaluate_models`] assembles the per-model [`EvaluationRow`] table for
//!   one asset.
//!
//! Conventions
//! -----------
//! - Forecast and realized series are aligned by position; they must share
//!   one index, which the rolling engine guarantees by construction.
//! - The realized proxy may itself contain NaN (an undefined position);
//!   such positions simply drop out of the error metrics.
use crate::volatility::{
    core::data::ReturnSeries,
    errors::{VolError, VolResult},
    forecast::ForecastSeries,
};
use ndarray::Array1;

/// Realized-variance proxy: squared returns, aligned with the input series.
pub fn realized_variance(returns: &ReturnSeries) -> Array1<f64> {
    returns.values.mapv(|r| r * r)
}

/// Reference-fit statistics used by the information criteria.
///
/// Typically taken from the final full-window fit of each model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitStats {
    /// Achieved log-likelihood of the reference fit.
    pub loglik: f64,
    /// Number of free parameters.
    pub k: usize,
    /// Number of observations in the reference fit.
    pub n: usize,
}

/// One model's inputs to the comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelScore<'a> {
    /// Model name used as the row key.
    pub name: &'a str,
    /// Rolling out-of-sample forecasts for the asset.
    pub forecast: &'a ForecastSeries,
    /// Reference-fit statistics for the information criteria.
    pub stats: FitStats,
}

/// One row of the comparison table, keyed by (asset, model).
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRow {
    pub asset: String,
    pub model: String,
    pub rmse: f64,
    pub mae: f64,
    pub aic: f64,
    pub bic: f64,
}

/// Root-mean-squared forecast error over the defined overlap.
///
/// ## Errors
/// - [`VolError::LengthMismatch`] if the series are not position-aligned.
/// - [`VolError::EmptyOverlap`] if no position has both values defined.
pub fn rmse(forecast: &ForecastSeries, realized: &Array1<f64>) -> VolResult<f64> {
    let (sum_sq, count) = overlap_fold(forecast, realized, |err| err * err)?;
    Ok((sum_sq / count as f64).sqrt())
}

/// Mean absolute forecast error over the defined overlap.
///
/// ## Errors
/// Same contract as [`rmse`].
pub fn mae(forecast: &ForecastSeries, realized: &Array1<f64>) -> VolResult<f64> {
    let (sum_abs, count) = overlap_fold(forecast, realized, f64::abs)?;
    Ok(sum_abs / count as f64)
}

/// Akaike information criterion: `2k − 2·loglik`. Lower is better.
pub fn aic(loglik: f64, k: usize) -> f64 {
    2.0 * k as f64 - 2.0 * loglik
}

/// Bayesian information criterion: `ln(n)·k − 2·loglik`. Lower is better.
pub fn bic(loglik: f64, k: usize, n: usize) -> f64 {
    (n as f64).ln() * k as f64 - 2.0 * loglik
}

/// Assemble the comparison table for one asset: one [`EvaluationRow`] per
/// supplied model, keyed by model name.
///
/// ## Errors
/// Propagates the [`rmse`]/[`mae`] contract per model.
pub fn evaluate_models(
    asset: &str, scores: &[ModelScore<'_>], realized: &Array1<f64>,
) -> VolResult<Vec<EvaluationRow>> {
    scores
        .iter()
        .map(|score| {
            Ok(EvaluationRow {
                asset: asset.to_string(),
                model: score.name.to_string(),
                rmse: rmse(score.forecast, realized)?,
                mae: mae(score.forecast, realized)?,
                aic: aic(score.stats.loglik, score.stats.k),
                bic: bic(score.stats.loglik, score.stats.k, score.stats.n),
            })
        })
        .collect()
}

/// Fold an error transform over the positions where both series are
/// defined, returning the accumulated value and the overlap count.
fn overlap_fold(
    forecast: &ForecastSeries, realized: &Array1<f64>, transform: fn(f64) -> f64,
) -> VolResult<(f64, usize)> {
    if forecast.len() != realized.len() {
        return Err(VolError::LengthMismatch {
            expected: forecast.len(),
            actual: realized.len(),
        });
    }
    let mut acc = 0.0;
    let mut count = 0usize;
    for (&f, &r) in forecast.values.iter().zip(realized.iter()) {
        if f.is_nan() || r.is_nan() {
            continue;
        }
        acc += transform(f - r);
        count += 1;
    }
    if count == 0 {
        return Err(VolError::EmptyOverlap);
    }
    Ok((acc, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Overlap handling (NaN skipping) and the arithmetic of RMSE/MAE.
    // - Penalty monotonicity of AIC/BIC in the parameter count.
    // - Table assembly keyed by (asset, model).
    //
    // They intentionally DO NOT cover:
    // - Producing forecasts (forecast-engine tests).
    // -------------------------------------------------------------------------

    fn forecast_of(values: Array1<f64>) -> ForecastSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let index = (0..values.len()).map(|i| start + chrono::Duration::days(i as i64)).collect();
        ForecastSeries { index, values }
    }

    #[test]
    // Purpose
    // -------
    // RMSE and MAE are computed only over positions where both series are
    // defined, with NaN on either side dropping the position.
    //
    // Given
    // -----
    // - Forecast [NaN, 2, 4, 6] against realized [1, 1, 1, NaN].
    //
    // Expect
    // ------
    // - Overlap is positions 1 and 2 with errors {1, 3}; MAE = 2 and
    //   RMSE = √5.
    fn error_metrics_use_defined_overlap_only() {
        // Arrange
        let forecast = forecast_of(array![f64::NAN, 2.0, 4.0, 6.0]);
        let realized = array![1.0, 1.0, 1.0, f64::NAN];

        // Act + Assert
        assert_relative_eq!(mae(&forecast, &realized).unwrap(), 2.0);
        assert_relative_eq!(rmse(&forecast, &realized).unwrap(), 5.0f64.sqrt());
    }

    #[test]
    // Purpose
    // -------
    // Metric preconditions are enforced: mismatched lengths and an empty
    // overlap are typed errors.
    //
    // Given
    // -----
    // - A 2-long forecast against a 3-long realized series, and an all-NaN
    //   forecast against a defined realized series.
    //
    // Expect
    // ------
    // - `LengthMismatch` and `EmptyOverlap` respectively.
    fn error_metrics_validate_inputs() {
        let forecast = forecast_of(array![1.0, 2.0]);
        assert!(matches!(
            rmse(&forecast, &array![1.0, 2.0, 3.0]),
            Err(VolError::LengthMismatch { expected: 2, actual: 3 })
        ));

        let undefined = forecast_of(array![f64::NAN, f64::NAN]);
        assert!(matches!(mae(&undefined, &array![1.0, 2.0]), Err(VolError::EmptyOverlap)));
    }

    #[test]
    // Purpose
    // -------
    // At fixed log-likelihood and sample size, both criteria are
    // non-decreasing in the parameter count: extra complexity can never
    // improve a penalized criterion without improving fit.
    //
    // Given
    // -----
    // - loglik = 1234.5, n = 500, k from 1 to 6.
    //
    // Expect
    // ------
    // - `aic(k+1) > aic(k)` and `bic(k+1) > bic(k)` for every step.
    fn criteria_worsen_with_parameter_count() {
        let loglik = 1234.5;
        let n = 500;
        for k in 1..6 {
            assert!(aic(loglik, k + 1) > aic(loglik, k));
            assert!(bic(loglik, k + 1, n) > bic(loglik, k, n));
        }
    }

    #[test]
    // Purpose
    // -------
    // `evaluate_models` produces one keyed row per model with the metrics
    // wired through.
    //
    // Given
    // -----
    // - Two models with distinct forecasts and fit statistics on one asset.
    //
    // Expect
    // ------
    // - Two rows keyed "asset_1"/model name; AIC/BIC match the direct
    //   formula calls.
    fn evaluate_models_builds_keyed_rows() {
        // Arrange
        let realized = array![1.0, 1.0, 1.0];
        let fc_a = forecast_of(array![f64::NAN, 1.5, 1.0]);
        let fc_b = forecast_of(array![f64::NAN, 2.0, 2.0]);
        let scores = [
            ModelScore {
                name: "GARCH",
                forecast: &fc_a,
                stats: FitStats { loglik: 100.0, k: 3, n: 3 },
            },
            ModelScore {
                name: "GJR-GARCH",
                forecast: &fc_b,
                stats: FitStats { loglik: 101.0, k: 4, n: 3 },
            },
        ];

        // Act
        let rows = evaluate_models("asset_1", &scores, &realized).unwrap();

        // Assert
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].asset, "asset_1");
        assert_eq!(rows[0].model, "GARCH");
        assert_relative_eq!(rows[0].aic, aic(100.0, 3));
        assert_eq!(rows[1].model, "GJR-GARCH");
        assert_relative_eq!(rows[1].bic, bic(101.0, 4, 3));
    }
}
