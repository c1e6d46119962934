//! Run-time options for conditional-variance model fitting.
//!
//! Bundles the optimizer configuration with the numeric guard rails so a
//! single value can configure a model (or a whole rolling-forecast run).
use crate::optimization::mle::MleOptions;
use crate::volatility::core::guards::SigmaGuards;

/// VolOptions — optimizer settings plus variance guards.
///
/// Fields
/// ------
/// - `mle`: [`MleOptions`]
///   Tolerances, line search, verbosity, and L-BFGS memory for the fit.
///   The default carries an iteration cap so every fit terminates.
/// - `guards`: [`SigmaGuards`]
///   Floor/ceiling applied to every conditional variance before it enters
///   the likelihood.
#[derive(Debug, Clone, PartialEq)]
pub struct VolOptions {
    pub mle: MleOptions,
    pub guards: SigmaGuards,
}

impl VolOptions {
    /// Bundle optimizer options and guards.
    pub fn new(mle: MleOptions, guards: SigmaGuards) -> Self {
        Self { mle, guards }
    }
}

impl Default for VolOptions {
    fn default() -> Self {
        Self { mle: MleOptions::default(), guards: SigmaGuards::default() }
    }
}
