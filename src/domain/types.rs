//! Shared domain types.
//!
//! These types are intentionally kept lightweight; the fit results are serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for display

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// A single observation: the observed value plus its raw (pre-cross) variables.
///
/// `predicted` and `error` are filled in by the diagnostics pass after a fit and
/// cleared whenever the owning model is invalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub observed: f64,
    pub variables: Vec<f64>,
    pub predicted: Option<f64>,
    /// `predicted - observed`.
    pub error: Option<f64>,
}

impl DataPoint {
    pub fn new(observed: f64, variables: Vec<f64>) -> Self {
        Self {
            observed,
            variables,
            predicted: None,
            error: None,
        }
    }

    pub(crate) fn clear_diagnostics(&mut self) {
        self.predicted = None;
        self.error = None;
    }
}

/// Display names for the observed value and each expanded feature.
///
/// Feature indices are 0-based over the expanded feature space: raw variables
/// first, then cross outputs in registration order. The intercept has no slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    observed: Option<String>,
    vars: BTreeMap<usize, String>,
}

impl NameTable {
    pub fn set_observed(&mut self, name: impl Into<String>) {
        self.observed = Some(name.into());
    }

    pub fn observed(&self) -> &str {
        self.observed.as_deref().unwrap_or("Observed")
    }

    pub fn set_var(&mut self, index: usize, name: impl Into<String>) {
        self.vars.insert(index, name.into());
    }

    /// The assigned name, if any. An empty name counts as unset.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.vars
            .get(&index)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Name for display, falling back to `X{index}`.
    pub fn var(&self, index: usize) -> String {
        match self.get(index) {
            Some(name) => name.to_string(),
            None => format!("X{index}"),
        }
    }
}

/// Goodness-of-fit statistics computed after each fit.
///
/// Variances are population variances (divided by `N`). `r_squared` is left
/// non-finite when the observed variance is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitStats {
    pub n: usize,
    #[serde(deserialize_with = "f64_or_nan")]
    pub variance_observed: f64,
    #[serde(deserialize_with = "f64_or_nan")]
    pub variance_predicted: f64,
    #[serde(deserialize_with = "f64_or_nan")]
    pub r_squared: f64,
}

/// Lifecycle of a regression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    Empty,
    Populated,
    Fit,
}

/// Portable representation of a fitted model, written by `regress fit --export-summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    pub tool: String,
    pub observed_name: String,
    pub feature_names: Vec<String>,
    #[serde(deserialize_with = "vec_f64_or_nan")]
    pub coefficients: Vec<f64>,
    pub formula: String,
    pub stats: FitStats,
}

// serde_json writes non-finite floats as `null`; read them back as NaN.
fn f64_or_nan<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
}

fn vec_f64_or_nan<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<f64>, D::Error> {
    let values = Vec::<Option<f64>>::deserialize(d)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// A cross requested on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossSpec {
    Power { index: usize, exponent: f64 },
    Product { indices: Vec<usize> },
}

/// Resolved configuration for `regress fit`.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    pub observed_column: usize,
    pub crosses: Vec<CrossSpec>,
    pub strict: bool,
    pub show_data: bool,
    pub export_results: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
}

/// Resolved configuration for `regress demo`.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub coefficients: Vec<f64>,
    pub sample_count: usize,
    pub sample_seed: u64,
    pub noise_sd: f64,
    pub variable_min: f64,
    pub variable_max: f64,
}
