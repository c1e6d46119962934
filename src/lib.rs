//! volcast — conditional-variance models with rolling out-of-sample
//! forecasts and model comparison.
//!
//! Purpose
//! -------
//! Fit a family of conditional-variance models (GARCH(1,1), GJR-GARCH(1,1),
//! EGARCH(1,1)) to a return series by maximum likelihood, produce strictly
//! out-of-sample one-step variance forecasts through walk-forward
//! re-estimation, and compare models by forecast-error metrics and
//! information criteria.
//!
//! Key behaviors
//! -------------
//! - Variance recursions are a closed set of tagged variants
//!   ([`volatility::core::spec::VarianceSpec`]) selected at construction
//!   time; each declares its parameter vector, bounds, initial guess, and
//!   one-step forecast formula.
//! - Fitting maximizes a Gaussian log-likelihood through an Argmin-backed
//!   L-BFGS layer ([`optimization::mle`]); box constraints are enforced by a
//!   logistic reparametrization, and every conditional variance is clamped
//!   to a strictly positive guard interval before entering the likelihood.
//! - Optimizer non-convergence is reported, never swallowed: the
//!   [`volatility::models::garch::FitResult`] carries a convergence flag and
//!   the solver's status string alongside the best iterate.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input series are clean (no missing values, strictly increasing
//!   timestamps, finite returns); [`volatility::core::data::ReturnSeries`]
//!   re-checks the cheap structural guarantees once at construction.
//! - Conditional-variance paths are strictly positive after guarding.
//! - Rolling forecasts at position `end` are trained only on data strictly
//!   before `end`; no look-ahead.
//!
//! Downstream usage
//! ----------------
//! - Construct a [`volatility::core::data::ReturnSeries`] (or generate one
//!   via [`volatility::synthetic`]), pick a
//!   [`volatility::core::spec::VarianceSpec`], and either fit a single
//!   [`volatility::models::garch::GarchModel`] or run
//!   [`volatility::forecast::rolling_forecast`] over a sliding window.
//! - Feed the resulting forecasts and reference-fit statistics into
//!   [`volatility::evaluation::evaluate_models`] to obtain the
//!   (asset, model) comparison table.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; the end-to-end pipeline
//!   (synthetic data → three models → rolling forecasts → evaluation) is
//!   exercised in `tests/integration_vol_pipeline.rs`.

pub mod optimization;
pub mod volatility;
