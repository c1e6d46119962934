//! Errors for conditional-variance models (input validation, guard/options
//! checks, fitting, forecasting, and evaluation).
//!
//! This module defines the domain error type, [`VolError`], used across the
//! return-series container, the variance recursions, the model fitter, the
//! rolling forecast engine, and the evaluation helpers. It implements
//! `Display`/`Error` and absorbs optimizer failures through a `From`
//! conversion.
//!
//! ## Conventions
//! - **Indices are 0-based.**
//! - Returns must be **finite**; timestamps must be **strictly increasing**.
//! - Numerical degeneracy inside a variance recursion is never an error: it
//!   is clamped locally by the sigma guards. Only structural problems
//!   (invalid input, unfitted use, hard optimizer failures) surface here.
use crate::optimization::errors::OptError;

/// Crate-wide result alias for volatility-model operations.
pub type VolResult<T> = Result<T, VolError>;

/// Unified error type for conditional-variance modeling.
///
/// Covers input/data validation, guard configuration, estimation failures,
/// forecasting misuse, and evaluation mismatches.
#[derive(Debug, Clone, PartialEq)]
pub enum VolError {
    // ---- Input/data validation ----
    /// Series is empty.
    EmptySeries,

    /// Date index and value vector have different lengths.
    IndexLengthMismatch { index_len: usize, values_len: usize },

    /// A return is NaN/±inf.
    NonFiniteReturn { index: usize, value: f64 },

    /// Timestamp at `index` is not strictly after its predecessor.
    NonMonotonicIndex { index: usize },

    /// Series has fewer observations than the operation requires.
    SeriesTooShort { required: usize, actual: usize },

    /// Requested slice range is not valid for the series.
    InvalidSliceRange { start: usize, end: usize, len: usize },

    // ---- Rolling window ----
    /// Rolling window must cover at least two observations.
    WindowTooSmall { window: usize },

    /// Series must be longer than the rolling window.
    WindowExceedsSeries { window: usize, len: usize },

    // ---- Guards / options ----
    /// Sigma guards must be finite with 0 < min < max.
    InvalidSigmaGuards { min: f64, max: f64, reason: &'static str },

    // ---- Fitting ----
    /// Initial parameter vector has the wrong length for the model.
    ParamLengthMismatch { expected: usize, actual: usize },

    /// Initial parameter values must be finite.
    NonFiniteParam { index: usize, value: f64 },

    /// Hard optimizer failure; includes a human-readable status.
    OptimizationFailed { status: String },

    // ---- Forecasting ----
    /// Model hasn't been fitted yet.
    ModelNotFitted,

    /// Only one-step-ahead forecasts are supported.
    UnsupportedHorizon { horizon: usize },

    // ---- Evaluation ----
    /// Forecast and realized series must share one index.
    LengthMismatch { expected: usize, actual: usize },

    /// No index where both forecast and realized values are defined.
    EmptyOverlap,

    // ---- Synthetic generation ----
    /// Generator configuration is inconsistent.
    InvalidSyntheticConfig { reason: &'static str },
}

impl std::error::Error for VolError {}

impl std::fmt::Display for VolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            VolError::EmptySeries => {
                write!(f, "Input series is empty.")
            }
            VolError::IndexLengthMismatch { index_len, values_len } => {
                write!(
                    f,
                    "Date index length ({index_len}) does not match value length ({values_len})."
                )
            }
            VolError::NonFiniteReturn { index, value } => {
                write!(f, "Return at index {index} is non-finite: {value}")
            }
            VolError::NonMonotonicIndex { index } => {
                write!(f, "Timestamp at index {index} is not strictly after its predecessor.")
            }
            VolError::SeriesTooShort { required, actual } => {
                write!(f, "Series too short: need at least {required} observations, got {actual}.")
            }
            VolError::InvalidSliceRange { start, end, len } => {
                write!(f, "Invalid slice range [{start}, {end}) for series of length {len}.")
            }

            // ---- Rolling window ----
            VolError::WindowTooSmall { window } => {
                write!(f, "Rolling window ({window}) must cover at least two observations.")
            }
            VolError::WindowExceedsSeries { window, len } => {
                write!(
                    f,
                    "Series of length {len} is too short for rolling window {window}; need at \
                     least window + 1 observations."
                )
            }

            // ---- Guards / options ----
            VolError::InvalidSigmaGuards { min, max, reason } => {
                write!(f, "Invalid sigma guards (min: {min}, max: {max}): {reason}")
            }

            // ---- Fitting ----
            VolError::ParamLengthMismatch { expected, actual } => {
                write!(f, "Parameter vector length mismatch: expected {expected}, got {actual}.")
            }
            VolError::NonFiniteParam { index, value } => {
                write!(f, "Parameter at index {index} is non-finite: {value}")
            }
            VolError::OptimizationFailed { status } => {
                write!(f, "Optimization failed: {status}")
            }

            // ---- Forecasting ----
            VolError::ModelNotFitted => {
                write!(f, "Model has not been fitted yet; call fit before forecast.")
            }
            VolError::UnsupportedHorizon { horizon } => {
                write!(f, "Unsupported forecast horizon {horizon}; only horizon 1 is supported.")
            }

            // ---- Evaluation ----
            VolError::LengthMismatch { expected, actual } => {
                write!(f, "Series length mismatch: expected {expected}, got {actual}.")
            }
            VolError::EmptyOverlap => {
                write!(f, "No overlapping defined values between forecast and realized series.")
            }

            // ---- Synthetic generation ----
            VolError::InvalidSyntheticConfig { reason } => {
                write!(f, "Invalid synthetic data configuration: {reason}")
            }
        }
    }
}

impl From<OptError> for VolError {
    fn from(err: OptError) -> Self {
        VolError::OptimizationFailed { status: err.to_string() }
    }
}
