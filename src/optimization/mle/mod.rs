//! mle — argmin-powered maximum-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)`. Callers implement a single trait,
//! [`LogLikelihood`], and invoke [`maximize`] to run L-BFGS with a
//! configurable line search, tolerances, and finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Convert user-supplied log-likelihoods `ℓ(θ)` into Argmin-compatible
//!   cost functions `c(θ) = -ℓ(θ)` via [`adapter::ArgminAdapter`].
//! - Expose a single entry point [`maximize`] that validates the initial
//!   guess, selects and configures an L-BFGS solver, executes it, and
//!   normalizes results into an [`OptimOutcome`].
//! - Fall back to robust finite-difference gradients when a model does not
//!   provide analytic derivatives.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** a log-likelihood `ℓ(θ)` by
//!   minimizing a cost `c(θ) = -ℓ(θ)`; user code implements `ℓ(θ)` (and
//!   `∇ℓ(θ)` when available), **never** the cost directly.
//! - [`LogLikelihood::value`] and [`LogLikelihood::grad`] treat invalid
//!   inputs as recoverable [`crate::optimization::errors::OptError`] values,
//!   not panics.
//! - Configuration types ([`Tolerances`], [`MleOptions`]) are validated on
//!   construction and treated as internally consistent by the solver layer.
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained optimizer space as [`Theta`]
//!   (`Array1<f64>`). Any mapping from constrained → unconstrained space
//!   happens in the model layer.
//! - All user-facing diagnostics (including [`OptimOutcome::value`]) are
//!   expressed in terms of the log-likelihood `ℓ`, never the internal cost.
//! - Errors bubble up as `OptResult<T>`; this module and its children never
//!   intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - Model code implements [`LogLikelihood`] for its types, then calls
//!   [`maximize`] with a model instance, an initial [`Theta`], a data
//!   payload, and an [`MleOptions`] configuration.
//! - Convergence is reported, not enforced: an exhausted iteration budget
//!   returns the best iterate with `converged == false`, and the caller
//!   decides how to treat the degraded result.

pub mod adapter;
pub mod api;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MleOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};
