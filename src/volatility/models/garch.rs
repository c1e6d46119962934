//! GARCH-family model: Gaussian log-likelihood, fitting, and one-step
//! forecasts.
//!
//! This module wires a [`VarianceSpec`] to the `LogLikelihood` trait. The
//! optimizer works in an unconstrained θ-space; each evaluation maps θ into
//! the spec's box bounds with the scaled-logistic transform, runs the
//! variance recursion, and accumulates the Gaussian log-likelihood
//! `ℓ = Σₜ -½[ln 2π + ln σ²ₜ + r²ₜ/σ²ₜ]` over the guarded path.
//!
//! Key ideas:
//! - Box constraints are enforced by construction (logistic map), so every
//!   trial parameter vector the solver produces is feasible and the cost is
//!   finite everywhere.
//! - No analytic gradient is supplied; the optimizer layer's
//!   finite-difference fallback covers all three variants with one code
//!   path.
//! - Non-convergence is reported, not raised: the best iterate is kept and
//!   the [`FitResult`] carries a convergence flag plus the solver status.
use crate::{
    optimization::{
        errors::{OptError, OptResult},
        mle::{maximize, Cost, LogLikelihood, OptimOutcome, Theta},
        numerical_stability::transformations::{from_bounded, to_bounded},
    },
    volatility::{
        core::{
            data::ReturnSeries,
            options::VolOptions,
            sigma::compute_path,
            spec::VarianceSpec,
        },
        errors::{VolError, VolResult},
        evaluation::FitStats,
    },
};
use ndarray::{Array1, ArrayView1};
use std::collections::HashMap;

/// `ln(2π)`, precomputed for the Gaussian likelihood.
const LN_2PI: f64 = 1.8378770664093453;

/// Fitted state of a GARCH-family model.
///
/// Owns everything needed to forecast and diagnose one fit: the model-space
/// parameters, the realized variance path under those parameters, the
/// achieved likelihood, and the optimizer's convergence report. A re-fit
/// replaces the whole value; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Fitted parameters in model space, ordered per the spec.
    pub params: Array1<f64>,
    /// Achieved log-likelihood `ℓ(θ̂)`.
    pub loglik: f64,
    /// Negative log-likelihood, the minimized objective.
    pub neg_loglik: f64,
    /// In-sample conditional-variance path at the fitted parameters.
    pub sigma2: Array1<f64>,
    /// Number of observations in the fitting window.
    pub nobs: usize,
    /// Last observed return of the window (lag-1 input for forecasting).
    pub last_return: f64,
    /// Last fitted variance of the window (lag-1 input for forecasting).
    pub last_sigma2: f64,
    /// Whether the optimizer met a convergence criterion.
    pub converged: bool,
    /// Human-readable termination status from the solver.
    pub status: String,
    /// Iterations the solver performed.
    pub iterations: usize,
}

impl FitResult {
    /// Reference-fit statistics consumed by the evaluation layer.
    pub fn stats(&self, k: usize) -> FitStats {
        FitStats { loglik: self.loglik, k, n: self.nobs }
    }
}

/// GARCH-family conditional-variance model.
///
/// Stateless until [`fit`](GarchModel::fit) is called, then holds exactly
/// one [`FitResult`] which subsequent fits replace. Forecasting before the
/// first fit is a typed error, never a silent default.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchModel {
    /// Variance recursion selected at construction.
    pub spec: VarianceSpec,
    /// Optimizer settings and variance guards.
    pub options: VolOptions,
    /// Fit state (populated after `fit`).
    pub fit_result: Option<FitResult>,
}

impl GarchModel {
    /// Construct an unfitted model for the given spec and options.
    pub fn new(spec: VarianceSpec, options: VolOptions) -> GarchModel {
        GarchModel { spec, options, fit_result: None }
    }

    /// Fit by maximum likelihood from the spec's declared starting point.
    ///
    /// See [`fit_from`](GarchModel::fit_from) for the full contract.
    pub fn fit(&mut self, returns: &ReturnSeries) -> VolResult<()> {
        self.fit_from(self.spec.initial_params(), returns)
    }

    /// Fit by maximum likelihood from a caller-supplied starting point.
    ///
    /// ## Steps
    /// 1. Validate the window (≥ 2 observations) and the starting vector
    ///    (length, finiteness).
    /// 2. Map the model-space start into unconstrained θ-space and run
    ///    L-BFGS through the optimizer layer.
    /// 3. Map the best iterate back to model space and recompute the
    ///    variance path at those parameters, so the stored path corresponds
    ///    exactly to the stored coefficients.
    /// 4. Store a fresh [`FitResult`] carrying the convergence flag and
    ///    solver status.
    ///
    /// ## Failure semantics
    /// Running out of iterations is not an error: the best iterate is kept
    /// with `converged == false`. A solver abort (e.g. a line-search failure
    /// deep in a flat region) degrades further to the starting point, again
    /// flagged through `converged`/`status`, so a long rolling run is never
    /// killed by one stubborn window. Configuration mistakes (bad
    /// tolerances, wrong parameter dimension) do surface as errors.
    pub fn fit_from(&mut self, init: Array1<f64>, returns: &ReturnSeries) -> VolResult<()> {
        if returns.len() < 2 {
            return Err(VolError::SeriesTooShort { required: 2, actual: returns.len() });
        }
        let expected = self.spec.param_count();
        if init.len() != expected {
            return Err(VolError::ParamLengthMismatch { expected, actual: init.len() });
        }
        for (index, &value) in init.iter().enumerate() {
            if !value.is_finite() {
                return Err(VolError::NonFiniteParam { index, value });
            }
        }

        let theta0 = from_bounded(init.view(), self.spec.bounds());
        let outcome = match maximize(&*self, theta0.clone(), returns, &self.options.mle) {
            Ok(outcome) => outcome,
            Err(err) if is_config_error(&err) => return Err(err.into()),
            Err(err) => self.degraded_outcome(theta0, returns, err)?,
        };

        let params = to_bounded(outcome.theta_hat.view(), self.spec.bounds());
        let sigma2 =
            compute_path(self.spec, params.view(), returns.values.view(), &self.options.guards);
        let n = returns.len();
        self.fit_result = Some(FitResult {
            params,
            loglik: outcome.value,
            neg_loglik: -outcome.value,
            last_sigma2: sigma2[n - 1],
            sigma2,
            nobs: n,
            last_return: returns.last_return(),
            converged: outcome.converged,
            status: outcome.status,
            iterations: outcome.iterations,
        });
        Ok(())
    }

    /// Access the stored fit.
    ///
    /// ## Errors
    /// Returns [`VolError::ModelNotFitted`] before the first successful fit.
    pub fn result(&self) -> VolResult<&FitResult> {
        self.fit_result.as_ref().ok_or(VolError::ModelNotFitted)
    }

    /// One-step-ahead variance forecast from the stored fit.
    ///
    /// Applies the spec's recursion formula one step forward using the last
    /// fitted variance and last observed return as the lag-1 inputs; for the
    /// leverage models, the indicator/standardized shock is evaluated on the
    /// sign of that same last return.
    ///
    /// ## Errors
    /// - [`VolError::ModelNotFitted`] before any fit.
    /// - [`VolError::UnsupportedHorizon`] for any horizon other than 1;
    ///   multi-step paths are out of scope.
    pub fn forecast(&self, horizon: usize) -> VolResult<f64> {
        if horizon != 1 {
            return Err(VolError::UnsupportedHorizon { horizon });
        }
        let fit = self.result()?;
        Ok(self.spec.forecast_one_step(fit.params.view(), fit.last_sigma2, fit.last_return))
    }

    /// Reference-fit statistics `{loglik, k, n}` for model comparison.
    pub fn fit_stats(&self) -> VolResult<FitStats> {
        Ok(self.result()?.stats(self.spec.param_count()))
    }

    /// Build a best-effort outcome at the starting point after a solver
    /// abort. The likelihood is still evaluated honestly at θ0; only the
    /// optimization is missing, which the status string records.
    fn degraded_outcome(
        &self, theta0: Theta, returns: &ReturnSeries, err: OptError,
    ) -> VolResult<OptimOutcome> {
        let value = self.value(&theta0, returns)?;
        Ok(OptimOutcome {
            theta_hat: theta0,
            value,
            converged: false,
            status: format!("Solver aborted; kept starting point: {err}"),
            iterations: 0,
            fn_evals: HashMap::new(),
            grad_norm: None,
        })
    }

    /// Gaussian log-likelihood of a guarded variance path.
    fn gaussian_loglik(&self, sigma2: ArrayView1<f64>, returns: ArrayView1<f64>) -> f64 {
        sigma2
            .iter()
            .zip(returns.iter())
            .map(|(&s2, &r)| -0.5 * (LN_2PI + s2.ln() + r * r / s2))
            .sum()
    }
}

/// Errors that indicate caller misconfiguration rather than a solver
/// giving up; these propagate instead of degrading to a best-effort fit.
fn is_config_error(err: &OptError) -> bool {
    matches!(
        err,
        OptError::InvalidTolGrad { .. }
            | OptError::InvalidTolCost { .. }
            | OptError::InvalidMaxIter { .. }
            | OptError::NoTolerancesProvided
            | OptError::InvalidLineSearch { .. }
            | OptError::InvalidLbfgsMem { .. }
            | OptError::ThetaDimMismatch { .. }
            | OptError::InvalidThetaInput { .. }
    )
}

impl LogLikelihood for GarchModel {
    type Data = ReturnSeries;

    /// Log-likelihood evaluation at unconstrained θ.
    ///
    /// # Steps
    /// 1. Map θ into the spec's bounds (scaled logistic, no clipping
    ///    needed).
    /// 2. Run the variance recursion over the window; guarding keeps every
    ///    σ²ₜ strictly positive, so the log terms below are always defined.
    /// 3. Accumulate the Gaussian per-observation terms.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        self.check(theta, data)?;
        let params = to_bounded(theta.view(), self.spec.bounds());
        let sigma2 =
            compute_path(self.spec, params.view(), data.values.view(), &self.options.guards);
        Ok(self.gaussian_loglik(sigma2.view(), data.values.view()))
    }

    /// Validate an unconstrained parameter vector against the spec's
    /// dimension and finiteness requirements.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        crate::optimization::mle::validation::validate_theta(
            theta.view(),
            self.spec.param_count(),
        )
    }
}
