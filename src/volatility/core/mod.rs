//! Core building blocks: validated data, variance specs, recursions, guards,
//! and run-time options.
pub mod data;
pub mod guards;
pub mod options;
pub mod sigma;
pub mod spec;
