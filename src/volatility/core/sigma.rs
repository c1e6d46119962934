//! σ²-recursions for conditional-variance models.
//!
//! Implements the in-sample variance recursion for every [`VarianceSpec`]
//! variant, writing a path the same length as the input window.
//!
//! ## Seeding
//! `σ²₀` is the sample variance of the input window (population form,
//! divisor `n`), not a free parameter. This anchors the recursion without
//! spending an estimated parameter on it and avoids explosive early-window
//! behavior when the optimizer probes extreme coefficients.
//!
//! ## Guarding
//! Every σ²ₜ — the seed included — passes through
//! [`guard_sigma`](crate::volatility::core::guards::guard_sigma) before it
//! is stored, so downstream likelihood code can take logs and divide without
//! re-checking. Degenerate intermediate values are an expected consequence
//! of optimizer exploration, never an error.
//!
//! ## Invariants (enforced upstream)
//! - `returns` is non-empty and finite ([`ReturnSeries`] construction).
//! - `params.len()` matches the spec's parameter count (checked by the
//!   fitter's θ validation); a violation here is a logic error and panics
//!   via indexing.
//!
//! [`ReturnSeries`]: crate::volatility::core::data::ReturnSeries
use crate::volatility::core::{
    guards::{guard_sigma, SigmaGuards},
    spec::{VarianceSpec, ABS_Z_MEAN},
};
use ndarray::{Array1, ArrayView1};

/// Population sample variance (divisor `n`) of a window.
///
/// Used to seed `σ²₀`. A single-observation window has zero sample variance;
/// the guard floor takes over in that case.
pub fn sample_variance(values: ArrayView1<f64>) -> f64 {
    let n = values.len() as f64;
    let mean = values.sum() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

/// Compute the guarded conditional-variance path for a window of returns.
///
/// # Definition
/// With `σ²₀` seeded from the sample variance, for `t ≥ 1`:
/// - `Garch`:  `σ²ₜ = ω + α·r²ₜ₋₁ + β·σ²ₜ₋₁`
/// - `Gjr`:    `σ²ₜ = ω + α·r²ₜ₋₁ + γ·r²ₜ₋₁·1[rₜ₋₁<0] + β·σ²ₜ₋₁`
/// - `Egarch`: `ln σ²ₜ = ω + β·ln σ²ₜ₋₁ + α·(|zₜ₋₁| − √(2/π)) + γ·zₜ₋₁`,
///   `zₜ₋₁ = rₜ₋₁/σₜ₋₁`
///
/// Each σ²ₜ is clamped into the guard interval as it is produced, and the
/// clamped value (not the raw one) feeds the next recursion step.
///
/// # Returns
/// A strictly positive path with `returns.len()` entries.
pub fn compute_path(
    spec: VarianceSpec, params: ArrayView1<f64>, returns: ArrayView1<f64>, guards: &SigmaGuards,
) -> Array1<f64> {
    let n = returns.len();
    let mut sigma2 = Array1::zeros(n);
    sigma2[0] = guard_sigma(sample_variance(returns), guards);
    match spec {
        VarianceSpec::Garch => {
            let (omega, alpha, beta) = (params[0], params[1], params[2]);
            for t in 1..n {
                let r = returns[t - 1];
                sigma2[t] = guard_sigma(omega + alpha * r * r + beta * sigma2[t - 1], guards);
            }
        }
        VarianceSpec::Gjr => {
            let (omega, alpha, gamma, beta) = (params[0], params[1], params[2], params[3]);
            for t in 1..n {
                let r = returns[t - 1];
                let ind = if r < 0.0 { 1.0 } else { 0.0 };
                sigma2[t] = guard_sigma(
                    omega + alpha * r * r + gamma * r * r * ind + beta * sigma2[t - 1],
                    guards,
                );
            }
        }
        VarianceSpec::Egarch => {
            let (omega, alpha, gamma, beta) = (params[0], params[1], params[2], params[3]);
            for t in 1..n {
                let z = returns[t - 1] / sigma2[t - 1].sqrt();
                let ln_next =
                    omega + beta * sigma2[t - 1].ln() + alpha * (z.abs() - ABS_Z_MEAN) + gamma * z;
                sigma2[t] = guard_sigma(ln_next.exp(), guards);
            }
        }
    }
    sigma2
}
