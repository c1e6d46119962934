//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! We convert a *maximization* of a log-likelihood `ℓ(θ)` into a
//! *minimization* problem by defining the cost as `c(θ) = -ℓ(θ)`. Analytic
//! gradients (if provided by the user) are negated accordingly. If a gradient
//! is not provided, we finite-difference the **cost** closure, so no sign
//! flip is needed in that branch.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    mle::{
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `-ℓ(θ)` (negative log-likelihood).
/// - `Gradient::gradient` returns:
///   - `-∇ℓ(θ)` if the user provides an analytic gradient, or
///   - a finite-difference gradient of the cost (no sign flip needed).
#[derive(Debug, Clone)]
pub struct ArgminAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgminAdapter<'a, F> {
    /// Construct a new adapter over a user `LogLikelihood` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<'a, F: LogLikelihood> CostFunction for ArgminAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)`.
    ///
    /// Calls the user's `value(θ, data)` and checks the result is finite;
    /// a non-finite log-likelihood is surfaced as `OptError::NonFiniteCost`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let loglik = self.f.value(theta, self.data)?;
        if !loglik.is_finite() {
            return Err((OptError::NonFiniteCost { value: loglik }).into());
        }
        Ok(-loglik)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgminAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - If the user implements `grad(θ, data)`, we validate it and return
    ///   `-grad` (the cost is `-ℓ`).
    /// - Otherwise, finite differences of the **cost** are used: central
    ///   differences first, retried once with forward differences if a cost
    ///   evaluation failed or the result fails validation.
    ///
    /// Implementation note: the FD closure must return `f64`, so errors from
    /// cost evaluations are captured into a side slot and replaced by `NaN`;
    /// after the FD pass, a captured error either triggers the forward-diff
    /// retry or becomes the returned error.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                let slot: RefCell<Option<Error>> = RefCell::new(None);
                let cost_fn = |t: &Theta| -> f64 {
                    match self.cost(t) {
                        Ok(c) => c,
                        Err(e) => {
                            let mut captured = slot.borrow_mut();
                            if captured.is_none() {
                                *captured = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };

                let central = theta.central_diff(&cost_fn);
                if slot.borrow().is_none() && validate_grad(&central, dim).is_ok() {
                    return Ok(central);
                }

                // Central differencing stepped somewhere the cost could not be
                // evaluated cleanly; retry once with one-sided steps.
                slot.replace(None);
                let forward = theta.forward_diff(&cost_fn);
                if let Some(err) = slot.take() {
                    return Err(err);
                }
                validate_grad(&forward, dim)?;
                Ok(forward)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The sign convention between log-likelihood and cost.
    // - Negation of analytic gradients.
    // - The finite-difference fallback when `grad` is not implemented.
    //
    // They intentionally DO NOT cover:
    // - Full L-BFGS runs (covered by the model and integration tests).
    // -------------------------------------------------------------------------

    /// Concave toy log-likelihood `ℓ(θ) = -θ·θ` with an analytic gradient.
    struct Quadratic;

    impl LogLikelihood for Quadratic {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<Cost> {
            Ok(-theta.dot(theta))
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _data: &()) -> OptResult<Grad> {
            Ok(theta.mapv(|t| -2.0 * t))
        }
    }

    /// Same toy objective without an analytic gradient, forcing FD.
    struct QuadraticNoGrad;

    impl LogLikelihood for QuadraticNoGrad {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<Cost> {
            Ok(-theta.dot(theta))
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // The adapter exposes `c(θ) = -ℓ(θ)` to argmin.
    //
    // Given
    // -----
    // - The quadratic toy model and θ = (1, 2).
    //
    // Expect
    // ------
    // - `cost` returns `+5` where the log-likelihood is `-5`.
    fn cost_is_negated_loglik() {
        let model = Quadratic;
        let adapter = ArgminAdapter::new(&model, &());
        let cost = adapter.cost(&array![1.0, 2.0]).unwrap();
        assert_relative_eq!(cost, 5.0);
    }

    #[test]
    // Purpose
    // -------
    // Analytic gradients are negated to match the cost orientation.
    //
    // Given
    // -----
    // - The quadratic toy model (∇ℓ = -2θ) and θ = (1, -3).
    //
    // Expect
    // ------
    // - The adapter returns `∇c = 2θ = (2, -6)`.
    fn analytic_gradient_is_negated() {
        let model = Quadratic;
        let adapter = ArgminAdapter::new(&model, &());
        let grad = adapter.gradient(&array![1.0, -3.0]).unwrap();
        assert_relative_eq!(grad[0], 2.0);
        assert_relative_eq!(grad[1], -6.0);
    }

    #[test]
    // Purpose
    // -------
    // Without an analytic gradient the adapter falls back to finite
    // differences of the cost.
    //
    // Given
    // -----
    // - The gradient-free quadratic toy model and θ = (0.5, -1.5).
    //
    // Expect
    // ------
    // - The FD gradient approximates `∇c = 2θ` to loose FD tolerance.
    fn finite_difference_fallback_matches_analytic() {
        let model = QuadraticNoGrad;
        let adapter = ArgminAdapter::new(&model, &());
        let grad = adapter.gradient(&array![0.5, -1.5]).unwrap();
        assert_relative_eq!(grad[0], 1.0, max_relative = 1e-4);
        assert_relative_eq!(grad[1], -3.0, max_relative = 1e-4);
    }
}
