//! Regression fitting.
//!
//! Responsibilities:
//!
//! - own data points, names and registered crosses (`Regression`)
//! - run design matrix -> least squares -> diagnostics on `fit()`
//! - compute per-point predictions, variances, R² and the formula

pub mod diagnostics;
pub mod regression;

pub use diagnostics::*;
pub use regression::*;
