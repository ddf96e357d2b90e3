//! Linear-model building blocks.
//!
//! Kept as small, pure functions so the orchestration in `fit` stays thin.

pub mod design;

pub use design::*;
