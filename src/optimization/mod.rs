//! Optimization layer: MLE driver, numeric guards, and optimizer errors.
pub mod errors;
pub mod mle;
pub mod numerical_stability;
