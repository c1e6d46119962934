//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear transforms used to map
//! box-constrained model parameters into the unconstrained optimizer space
//! and back. The naïve forms of these functions overflow or lose precision
//! near the interval edges; the versions here follow guarded strategies with
//! explicit cutoffs that keep `f64` arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`safe_logistic`]: stable `1 / (1 + exp(-x))`, mapping ℝ → (0, 1).
//! - [`safe_logit`]: inverse of the logistic, with clamping away from
//!   the endpoints so that values sitting exactly on a bound stay finite.
//! - [`to_bounded`] / [`from_bounded`]: per-coordinate maps between an
//!   unconstrained θ vector and a model-space vector living inside a set of
//!   `[low, high]` intervals.
//!
//! # Rationale
//! The optimizer always runs over all of ℝⁿ; each variance model declares a
//! bounds set and the scaled-logistic map guarantees that every trial
//! parameter vector the optimizer produces lands strictly inside those
//! bounds. This removes the need for penalty terms or projected gradients.
use ndarray::{Array1, ArrayView1};

/// Clamp applied to the unit-interval position before taking a logit.
///
/// Keeps [`from_bounded`] finite when a caller-supplied parameter sits
/// exactly on a bound (e.g. a leverage coefficient of 0.0 with bounds
/// `[0, 2]`).
const LOGIT_CLAMP: f64 = 1e-9;

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// Evaluates the branch that only ever exponentiates a non-positive
/// argument, so the result never overflows for any finite `x`.
///
/// # Parameters
/// - `x`: real input
///
/// # Returns
/// - `σ(x)` in `(0, 1)` as `f64`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Stable inverse of the logistic on `(0, 1)`: solves `σ(t) = u` for `t`.
///
/// Inputs are clamped into `[LOGIT_CLAMP, 1 - LOGIT_CLAMP]` before the log,
/// so values at (or numerically past) the endpoints map to large but finite
/// magnitudes instead of `±∞`.
///
/// # Parameters
/// - `u`: position in the unit interval.
///
/// # Returns
/// - `t` such that `safe_logistic(t) ≈ u` for interior `u`.
pub fn safe_logit(u: f64) -> f64 {
    let u = u.clamp(LOGIT_CLAMP, 1.0 - LOGIT_CLAMP);
    (u / (1.0 - u)).ln()
}

/// Map an unconstrained θ vector into model space.
///
/// Coordinate `i` is sent to `low_i + (high_i - low_i) · σ(θ_i)`, which lies
/// strictly inside `(low_i, high_i)` for every finite `θ_i`.
///
/// Lengths of `theta` and `bounds` must agree; a mismatch is a logic error
/// upstream and panics via the zip running short, never by producing a
/// partially mapped vector of the wrong meaning.
pub fn to_bounded(theta: ArrayView1<f64>, bounds: &[(f64, f64)]) -> Array1<f64> {
    debug_assert_eq!(theta.len(), bounds.len());
    Array1::from_iter(
        theta
            .iter()
            .zip(bounds.iter())
            .map(|(&t, &(low, high))| low + (high - low) * safe_logistic(t)),
    )
}

/// Map a model-space parameter vector into unconstrained θ-space.
///
/// Inverse of [`to_bounded`] up to the endpoint clamp: each coordinate is
/// rescaled onto the unit interval and sent through [`safe_logit`]. Values
/// outside `[low, high]` are pulled to the nearest bound first, so a
/// caller-supplied starting point can never place the optimizer outside the
/// feasible region.
pub fn from_bounded(params: ArrayView1<f64>, bounds: &[(f64, f64)]) -> Array1<f64> {
    debug_assert_eq!(params.len(), bounds.len());
    Array1::from_iter(
        params
            .iter()
            .zip(bounds.iter())
            .map(|(&v, &(low, high))| safe_logit((v - low) / (high - low))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Stability of `safe_logistic` for large-magnitude inputs.
    // - Round-tripping of interior points through `from_bounded`/`to_bounded`.
    // - Finite output of `from_bounded` for values on (or beyond) a bound.
    //
    // They intentionally DO NOT cover:
    // - Optimizer behavior over transformed parameters (covered by the model
    //   and integration tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `safe_logistic` stays in (0, 1) and does not overflow for inputs far
    // outside the naive exponentiation range.
    //
    // Given
    // -----
    // - Inputs {-1000, -20, 0, 20, 1000}.
    //
    // Expect
    // ------
    // - All outputs finite and inside [0, 1].
    // - `safe_logistic(0) == 0.5`.
    fn safe_logistic_is_bounded_and_stable() {
        for &x in &[-1000.0, -20.0, 0.0, 20.0, 1000.0] {
            let s = safe_logistic(x);
            assert!(s.is_finite() && (0.0..=1.0).contains(&s));
        }
        assert_relative_eq!(safe_logistic(0.0), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // `to_bounded(from_bounded(p))` reproduces interior model-space points.
    //
    // Given
    // -----
    // - A parameter vector strictly inside its bounds set.
    //
    // Expect
    // ------
    // - The round trip matches to high relative precision.
    fn bounded_round_trip_recovers_interior_points() {
        // Arrange
        let bounds = [(1e-12, 1.0), (0.0, 2.0), (0.0, 0.9999)];
        let params = array![1e-6, 0.05, 0.9];

        // Act
        let theta = from_bounded(params.view(), &bounds);
        let back = to_bounded(theta.view(), &bounds);

        // Assert
        for (orig, rt) in params.iter().zip(back.iter()) {
            assert_relative_eq!(orig, rt, max_relative = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Values sitting exactly on a bound map to finite θ and come back inside
    // the declared interval.
    //
    // Given
    // -----
    // - One parameter at its lower bound and one at its upper bound.
    //
    // Expect
    // ------
    // - `from_bounded` yields finite θ coordinates.
    // - `to_bounded` of that θ lies within the declared intervals.
    fn boundary_values_stay_finite() {
        // Arrange
        let bounds = [(0.0, 2.0), (0.0, 0.9999)];
        let params = array![0.0, 0.9999];

        // Act
        let theta = from_bounded(params.view(), &bounds);
        let back = to_bounded(theta.view(), &bounds);

        // Assert
        assert!(theta.iter().all(|t| t.is_finite()));
        for (&v, &(low, high)) in back.iter().zip(bounds.iter()) {
            assert!(v >= low && v <= high);
        }
    }
}
