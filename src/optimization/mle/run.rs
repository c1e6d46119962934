//! Solver construction and execution for log-likelihood problems.
//!
//! Purpose
//! -------
//! Build configured L-BFGS solvers (line search, history size, tolerances)
//! and drive them through an `argmin` executor, converting the raw solver
//! state into a crate-friendly [`OptimOutcome`].
//!
//! Key behaviors
//! -------------
//! - [`build_lbfgs_hager_zhang`] / [`build_lbfgs_more_thuente`] construct
//!   L-BFGS instances over the crate's canonical numeric types, applying any
//!   tolerances from [`MleOptions`].
//! - [`run_lbfgs`] wires the adapted problem, initial parameters, iteration
//!   cap, and (behind the `obs_slog` feature) an optional terminal observer,
//!   then executes the solver and normalizes the result.
//!
//! Conventions
//! -----------
//! - Builders never set `theta0` or `max_iters`; those are runtime concerns
//!   applied by the runner.
//! - Errors from argmin are converted through the crate's `From<Error>`
//!   implementation and never leak across module boundaries.
use crate::optimization::{
    errors::OptResult,
    mle::{
        adapter::ArgminAdapter,
        traits::{LogLikelihood, MleOptions, OptimOutcome},
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::CostFunction;
use argmin::core::{Executor, State};
use argmin::solver::quasinewton::LBFGS;

/// Construct an L-BFGS solver with Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (default [`DEFAULT_LBFGS_MEM`]) and wires any
/// present tolerances via [`configure_lbfgs`].
///
/// # Errors
/// Propagates argmin configuration errors (e.g. a tolerance it rejects).
pub fn build_lbfgs_hager_zhang(opts: &MleOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

/// Construct an L-BFGS solver with More–Thuente line search.
///
/// Consults `opts.lbfgs_mem` (default [`DEFAULT_LBFGS_MEM`]) and wires any
/// present tolerances via [`configure_lbfgs`].
///
/// # Errors
/// Propagates argmin configuration errors (e.g. a tolerance it rejects).
pub fn build_lbfgs_more_thuente(opts: &MleOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply optional gradient/cost tolerances to an L-BFGS solver.
///
/// When a tolerance is `None`, the corresponding `with_tolerance_*` method is
/// not called and argmin's default remains in effect. Generic over the
/// line-search type so both builders share the wiring.
///
/// # Errors
/// Propagates argmin's rejection of a tolerance value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MleOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// Run an `argmin` optimization for a log-likelihood problem.
///
/// This is the shared runner used by both line-search variants. It wires up:
/// - the user model via [`ArgminAdapter`],
/// - a fully constructed `Solver`,
/// - the initial parameter vector `theta0` (consumed),
/// - optional observers (behind the `obs_slog` feature),
/// - the iteration cap from `opts.tols.max_iter`,
///   then executes the solver and converts the final state into an
///   [`OptimOutcome`].
///
/// # Returns
/// An [`OptimOutcome`] holding the best parameter found, the best
/// log-likelihood value `ℓ(θ̂)`, the convergence classification, iteration
/// and function-evaluation counts, and the last gradient norm if available.
///
/// # Errors
/// - Propagates argmin runtime errors (observer failures, solver errors,
///   line-search failures) via the crate's `From<argmin::core::Error>`.
/// - Propagates validation errors raised while constructing [`OptimOutcome`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MleOptions, problem: ArgminAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgminAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut executor = Executor::new(problem, solver);
    executor = executor.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        executor = executor.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = executor.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgminAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    eprintln!("init: ell(theta0) = {ll0:.6}");
    Ok(())
}
