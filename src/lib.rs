//! `regress` library crate.
//!
//! Multivariate ordinary least squares with pluggable feature crosses. The
//! binary (`regress`) is a thin wrapper around this library so that:
//!
//! - the fitting core is testable without spawning processes
//! - CSV loading, reporting and exports stay out of the numerical code
//!
//! ```
//! use regress::cross::pow_cross;
//! use regress::fit::Regression;
//!
//! let mut r = Regression::new();
//! r.set_var_name(0, "x");
//! for x in [2.0, 4.0, 5.0, 8.0, 12.0] {
//!     r.add_data_point(x * x + x, vec![x]).unwrap();
//! }
//! r.add_cross(pow_cross(0, 2.0)).unwrap();
//! r.fit().unwrap();
//! assert!((r.predict(&[6.0]).unwrap() - 42.0).abs() < 1e-6);
//! ```

pub mod app;
pub mod cli;
pub mod cross;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
