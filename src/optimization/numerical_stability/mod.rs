//! Guarded numeric transforms shared by the optimizer and model layers.
pub mod transformations;
