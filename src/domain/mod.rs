//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations and naming (`DataPoint`, `NameTable`)
//! - fit outputs (`FitStats`, `FitSummary`, `ModelState`)
//! - resolved run configuration (`FitConfig`, `SampleConfig`, `CrossSpec`)

pub mod types;

pub use types::*;
