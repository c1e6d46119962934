//! Variance-model specifications for conditional-variance fitting.
//!
//! This module defines [`VarianceSpec`], a closed set of supported
//! conditional-variance recursions selected at model construction time. Each
//! variant declares its fixed-length parameter vector (count, names, initial
//! guess, and one `[low, high]` interval per parameter) and knows how to roll
//! its recursion one step past the sample for forecasting.
//!
//! ## Supported models
//! - [`VarianceSpec::Garch`]: GARCH(1,1),
//!   `σ²ₜ = ω + α·r²ₜ₋₁ + β·σ²ₜ₋₁`.
//! - [`VarianceSpec::Gjr`]: GJR-GARCH(1,1), adds a leverage term active only
//!   on negative prior returns,
//!   `σ²ₜ = ω + α·r²ₜ₋₁ + γ·r²ₜ₋₁·1[rₜ₋₁<0] + β·σ²ₜ₋₁`.
//! - [`VarianceSpec::Egarch`]: EGARCH(1,1) in log-variance,
//!   `ln σ²ₜ = ω + β·ln σ²ₜ₋₁ + α·(|zₜ₋₁| − E|z|) + γ·zₜ₋₁` with
//!   `zₜ₋₁ = rₜ₋₁/σₜ₋₁` and `E|z| = √(2/π)` under Gaussian innovations.
//!
//! ## Bounds
//! The β intervals stop below 1 so the persistent term stays sub-unit, and
//! the GARCH/GJR structural forms (non-negative coefficients, positive ω)
//! guarantee a non-negative variance before guarding even kicks in. The
//! EGARCH intercept lives in log-variance space and may be negative.
use ndarray::{Array1, ArrayView1};

/// `E|z|` for a standard normal innovation, `√(2/π)`.
pub const ABS_Z_MEAN: f64 = 0.7978845608028654;

const GARCH_BOUNDS: [(f64, f64); 3] = [(1e-12, 1.0), (0.0, 2.0), (0.0, 0.9999)];
const GJR_BOUNDS: [(f64, f64); 4] = [(1e-12, 1.0), (0.0, 2.0), (0.0, 2.0), (0.0, 0.9999)];
const EGARCH_BOUNDS: [(f64, f64); 4] = [(-10.0, 10.0), (0.0, 2.0), (-2.0, 2.0), (0.0, 0.9999)];

/// Closed set of conditional-variance recursions.
///
/// A spec is plain data: it carries no fitted state and is `Copy`, so the
/// rolling forecast engine can stamp out a fresh model per window from a
/// single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceSpec {
    /// Symmetric GARCH(1,1) with parameters `(ω, α, β)`.
    Garch,
    /// GJR-GARCH(1,1) with parameters `(ω, α, γ, β)`; γ is the leverage
    /// coefficient triggered by negative prior returns.
    Gjr,
    /// EGARCH(1,1) with parameters `(ω, α, γ, β)` acting on `ln σ²`.
    Egarch,
}

impl VarianceSpec {
    /// Human-readable model name used as the key in comparison tables.
    pub fn name(&self) -> &'static str {
        match self {
            VarianceSpec::Garch => "GARCH",
            VarianceSpec::Gjr => "GJR-GARCH",
            VarianceSpec::Egarch => "EGARCH",
        }
    }

    /// Number of free parameters (`k` in the information criteria).
    pub fn param_count(&self) -> usize {
        self.bounds().len()
    }

    /// Parameter names in vector order.
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            VarianceSpec::Garch => &["omega", "alpha", "beta"],
            VarianceSpec::Gjr => &["omega", "alpha", "gamma", "beta"],
            VarianceSpec::Egarch => &["omega", "alpha", "gamma", "beta"],
        }
    }

    /// One `[low, high]` interval per parameter, in vector order.
    pub fn bounds(&self) -> &'static [(f64, f64)] {
        match self {
            VarianceSpec::Garch => &GARCH_BOUNDS,
            VarianceSpec::Gjr => &GJR_BOUNDS,
            VarianceSpec::Egarch => &EGARCH_BOUNDS,
        }
    }

    /// Model-space starting point for the optimizer.
    ///
    /// The GARCH/GJR guesses start near-zero ω with high persistence, the
    /// usual neighborhood for daily-return data; the EGARCH intercept starts
    /// mildly negative in log-variance space with no initial asymmetry.
    pub fn initial_params(&self) -> Array1<f64> {
        match self {
            VarianceSpec::Garch => Array1::from(vec![1e-6, 0.05, 0.9]),
            VarianceSpec::Gjr => Array1::from(vec![1e-6, 0.05, 0.05, 0.9]),
            VarianceSpec::Egarch => Array1::from(vec![-0.5, 0.1, 0.0, 0.9]),
        }
    }

    /// Roll the recursion one step past the sample.
    ///
    /// Applies the variant's formula with the supplied parameters, using the
    /// last fitted variance and last observed return as the lag-1 inputs.
    /// For the leverage models, the sign indicator/standardized shock is
    /// evaluated on that same last observed return.
    ///
    /// `params` must have length [`Self::param_count`]; a mismatch is a
    /// logic error and panics via indexing.
    pub fn forecast_one_step(
        &self, params: ArrayView1<f64>, last_sigma2: f64, last_return: f64,
    ) -> f64 {
        match self {
            VarianceSpec::Garch => {
                let (omega, alpha, beta) = (params[0], params[1], params[2]);
                omega + alpha * last_return * last_return + beta * last_sigma2
            }
            VarianceSpec::Gjr => {
                let (omega, alpha, gamma, beta) = (params[0], params[1], params[2], params[3]);
                let ind = if last_return < 0.0 { 1.0 } else { 0.0 };
                omega
                    + alpha * last_return * last_return
                    + gamma * last_return * last_return * ind
                    + beta * last_sigma2
            }
            VarianceSpec::Egarch => {
                let (omega, alpha, gamma, beta) = (params[0], params[1], params[2], params[3]);
                let z = last_return / last_sigma2.sqrt();
                (omega + beta * last_sigma2.ln() + alpha * (z.abs() - ABS_Z_MEAN) + gamma * z)
                    .exp()
            }
        }
    }
}
