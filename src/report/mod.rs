//! Reporting utilities: formatted terminal output for fits and summaries.

pub mod format;

pub use format::*;
