//! Fittable conditional-variance models.
pub mod garch;
