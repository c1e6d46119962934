//! Seeded synthetic return generation.
//!
//! Purpose
//! -------
//! Produce clean, reproducible return series driven by a GARCH(1,1)-style
//! true volatility process with occasional variance spikes, for tests and
//! downstream experiments. The generator never touches global random state:
//! the caller passes an explicitly seeded RNG, which makes runs reproducible
//! and parallel-safe.
//!
//! Key behaviors
//! -------------
//! - Roll a true-variance recursion `σ²ₜ = ω + α·σ²ₜ₋₁·ε²ₜ₋₁ + β·σ²ₜ₋₁`
//!   with standard-normal shocks, multiplying occasional steps by a spike
//!   factor.
//! - Emit a business-day date axis starting from a configurable date.
//! - Return both the observable returns and the true variance path, so
//!   tests can score forecasts against the actual data-generating process.
//!
//! Conventions
//! -----------
//! - Output is already clean: no missing values are injected (filling
//!   belongs to the external cleaning step, and this crate's consumers
//!   require clean input).
use crate::volatility::{
    core::data::ReturnSeries,
    errors::{VolError, VolResult},
};
use chrono::{Datelike, NaiveDate, Weekday};
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Multiplier applied to the true variance on spike steps.
const SPIKE_FACTOR: f64 = 5.0;

/// Configuration of the synthetic data-generating process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticConfig {
    /// Number of observations to generate.
    pub n_steps: usize,
    /// Constant mean return.
    pub mu: f64,
    /// Initial volatility (σ, not σ²).
    pub sigma0: f64,
    /// True-variance intercept ω.
    pub omega: f64,
    /// True ARCH coefficient α.
    pub alpha: f64,
    /// True persistence coefficient β.
    pub beta: f64,
    /// Per-step probability of a variance spike.
    pub spike_prob: f64,
    /// First date of the business-day axis.
    pub start_date: NaiveDate,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            n_steps: 800,
            mu: 0.0,
            sigma0: 0.02,
            omega: 1e-6,
            alpha: 0.05,
            beta: 0.94,
            spike_prob: 0.01,
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid literal date"),
        }
    }
}

impl SyntheticConfig {
    /// Validate the configuration.
    ///
    /// ## Errors
    /// Returns [`VolError::InvalidSyntheticConfig`] for a zero-length run,
    /// non-positive or non-finite `sigma0`, negative coefficients, or a
    /// spike probability outside `[0, 1]`.
    pub fn validate(&self) -> VolResult<()> {
        if self.n_steps == 0 {
            return Err(VolError::InvalidSyntheticConfig { reason: "n_steps must be positive" });
        }
        if !self.sigma0.is_finite() || self.sigma0 <= 0.0 {
            return Err(VolError::InvalidSyntheticConfig {
                reason: "sigma0 must be finite and strictly positive",
            });
        }
        if !self.omega.is_finite() || self.omega < 0.0 {
            return Err(VolError::InvalidSyntheticConfig {
                reason: "omega must be finite and non-negative",
            });
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 || !self.beta.is_finite() || self.beta < 0.0
        {
            return Err(VolError::InvalidSyntheticConfig {
                reason: "alpha and beta must be finite and non-negative",
            });
        }
        if !(0.0..=1.0).contains(&self.spike_prob) {
            return Err(VolError::InvalidSyntheticConfig {
                reason: "spike_prob must lie in [0, 1]",
            });
        }
        Ok(())
    }
}

/// One generated asset: observable returns plus the true variance path.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticAsset {
    /// Clean return series on a business-day axis.
    pub returns: ReturnSeries,
    /// True conditional variance of the data-generating process.
    pub true_sigma2: Array1<f64>,
}

/// Generate one synthetic asset from an explicitly seeded RNG.
///
/// The same `(config, seed)` pair always produces the same asset; distinct
/// RNGs can generate assets concurrently without coordination.
///
/// ## Errors
/// Propagates [`SyntheticConfig::validate`].
pub fn generate_asset<R: Rng>(config: &SyntheticConfig, rng: &mut R) -> VolResult<SyntheticAsset> {
    config.validate()?;
    let n = config.n_steps;

    let eps: Vec<f64> = (0..n).map(|_| StandardNormal.sample(rng)).collect();
    let mut sigma2 = Array1::zeros(n);
    sigma2[0] = config.sigma0 * config.sigma0;
    for t in 1..n {
        let prev = sigma2[t - 1];
        let mut s = config.omega + config.alpha * prev * eps[t - 1] * eps[t - 1]
            + config.beta * prev;
        if rng.gen::<f64>() < config.spike_prob {
            s *= SPIKE_FACTOR;
        }
        sigma2[t] = s;
    }

    let values = Array1::from_iter(
        sigma2.iter().zip(eps.iter()).map(|(&s2, &e)| s2.sqrt() * e + config.mu),
    );
    let index = business_days(config.start_date, n);
    let returns = ReturnSeries::new(index, values)?;
    Ok(SyntheticAsset { returns, true_sigma2: sigma2 })
}

/// Build `n` consecutive business days (Monday–Friday) starting at or after
/// `start`.
fn business_days(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(n);
    let mut current = start;
    while days.len() < n {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(current);
        }
        current = current.succ_opt().expect("date axis stays far from chrono limits");
    }
    days
}
