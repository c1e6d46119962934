//! Validation helpers for log-likelihood optimization.
//!
//! Centralizes the consistency checks used across the optimizer interface:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Parameter vectors**: [`validate_theta`] rejects wrong-length or
//!   non-finite candidate vectors before a run starts; [`validate_theta_hat`]
//!   unwraps and checks the solver's best estimate afterwards.
//! - **Objective values**: [`validate_value`] checks log-likelihood outputs
//!   for finiteness.
//!
//! All helpers report through domain-specific [`OptError`] variants so that
//! higher-level code stays uniform.
use crate::optimization::{
    errors::{OptError, OptResult},
    mle::types::{Grad, Theta},
};
use ndarray::ArrayView1;

/// Validate the optional gradient-norm tolerance.
///
/// - Accepts `None` (no stopping rule on gradient).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost-change tolerance.
///
/// - Accepts `None` (no stopping rule on cost change).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a candidate θ vector against an expected dimension.
///
/// Checks:
/// - `theta.len() == dim`
/// - every element is finite (`NaN` and `±∞` are rejected)
///
/// # Errors
/// - [`OptError::ThetaDimMismatch`] if the length does not match `dim`.
/// - [`OptError::InvalidThetaInput`] with the index/value of the first
///   offending element.
pub fn validate_theta(theta: ArrayView1<f64>, dim: usize) -> OptResult<()> {
    if theta.len() != dim {
        return Err(OptError::ThetaDimMismatch { expected: dim, found: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Returns
/// The owned `Theta` if valid.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar log-likelihood value is finite.
///
/// Negative values are fine as long as they are finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance/rejection rules of the tolerance validators.
    // - Dimension and finiteness checks on θ and gradient vectors.
    // - Unwrapping behavior of `validate_theta_hat`.
    //
    // They intentionally DO NOT cover:
    // - End-to-end solver behavior (covered by model and integration tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Tolerance validators accept `None` and valid positive values, and
    // reject non-positive or non-finite inputs.
    //
    // Given
    // -----
    // - A mix of `None`, positive, zero, and NaN tolerance inputs.
    //
    // Expect
    // ------
    // - `None` and positive values pass; zero and NaN fail with the matching
    //   error variant.
    fn tolerance_validators_enforce_positive_finite() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_cost(Some(f64::NAN)), Err(OptError::InvalidTolCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // `validate_theta` rejects wrong-length and non-finite candidate vectors.
    //
    // Given
    // -----
    // - A valid 3-vector, a 2-vector checked against dim 3, and a 3-vector
    //   containing NaN.
    //
    // Expect
    // ------
    // - Valid input passes; the others fail with `ThetaDimMismatch` and
    //   `InvalidThetaInput` respectively.
    fn validate_theta_checks_dim_and_finiteness() {
        let good = array![0.1, -0.2, 0.3];
        let short = array![0.1, -0.2];
        let nan = array![0.1, f64::NAN, 0.3];

        assert!(validate_theta(good.view(), 3).is_ok());
        assert!(matches!(
            validate_theta(short.view(), 3),
            Err(OptError::ThetaDimMismatch { expected: 3, found: 2 })
        ));
        assert!(matches!(
            validate_theta(nan.view(), 3),
            Err(OptError::InvalidThetaInput { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `validate_theta_hat` unwraps a finite estimate and errors on a missing
    // or non-finite one.
    //
    // Given
    // -----
    // - `Some` finite vector, `None`, and `Some` vector containing infinity.
    //
    // Expect
    // ------
    // - Finite vector is returned; `None` → `MissingThetaHat`; infinite →
    //   `InvalidThetaHat`.
    fn validate_theta_hat_unwraps_or_errors() {
        let ok = validate_theta_hat(Some(array![1.0, 2.0])).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(matches!(validate_theta_hat(None), Err(OptError::MissingThetaHat)));
        assert!(matches!(
            validate_theta_hat(Some(array![f64::INFINITY])),
            Err(OptError::InvalidThetaHat { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `validate_grad` enforces the same dimension/finiteness contract as the
    // θ validators.
    //
    // Given
    // -----
    // - A finite gradient of the right length and one containing NaN.
    //
    // Expect
    // ------
    // - The finite gradient passes; the NaN gradient fails with
    //   `InvalidGradient`.
    fn validate_grad_checks_entries() {
        assert!(validate_grad(&array![0.0, 1.0], 2).is_ok());
        assert!(matches!(
            validate_grad(&array![f64::NAN, 1.0], 2),
            Err(OptError::InvalidGradient { index: 0, .. })
        ));
    }
}
