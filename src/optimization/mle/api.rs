//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! Selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the model in an [`ArgminAdapter`] (which *minimizes*
//! `-ℓ(θ)`), and delegates the run to `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    mle::{
        adapter::ArgminAdapter,
        run::{build_lbfgs_hager_zhang, build_lbfgs_more_thuente, run_lbfgs},
        traits::{LineSearcher, LogLikelihood, MleOptions, OptimOutcome},
        types::Theta,
    },
};

/// Maximize a log-likelihood `ℓ(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an [`ArgminAdapter`] that exposes a *minimization*
///   problem `c(θ) = -ℓ(θ)` to `argmin`.
/// - Builds an L-BFGS solver per `opts.line_searcher` and runs it with the
///   configured tolerances and iteration cap.
///
/// # Parameters
/// - `f`: model implementing [`LogLikelihood`].
/// - `theta0`: initial parameter vector (consumed).
/// - `data`: model data passed through to `value`/`grad`.
/// - `opts`: optimizer options.
///
/// # Returns
/// An [`OptimOutcome`] containing `theta_hat`, the best value `ℓ(θ̂)`, the
/// convergence classification, and solver diagnostics. Note that running out
/// of iterations still yields `Ok` with `converged == false`; callers decide
/// whether a non-converged best iterate is acceptable.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates solver construction and runtime errors.
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MleOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgminAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_lbfgs_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_lbfgs_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
