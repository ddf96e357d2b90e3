//! Shared "fit pipeline" logic used by the `fit` and `demo` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load/generate points -> register crosses -> fit -> diagnostics
//!
//! The commands can then focus on presentation and exports.

use std::sync::Arc;

use crate::cross::{SharedCross, pow_cross, product_cross};
use crate::data::generate_sample;
use crate::domain::{CrossSpec, FitConfig, SampleConfig};
use crate::error::{AppError, RegressionResult};
use crate::fit::Regression;
use crate::io::ingest::{RowError, load_data_points};

/// All computed outputs of a single `regress fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub regression: Regression,
    pub rows_read: usize,
    pub row_errors: Vec<RowError>,
}

/// Load the CSV, register the requested crosses and fit.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = load_data_points(&config.csv_path, config.observed_column)?;
    log::info!(
        "loaded {} of {} row(s) from {}",
        ingest.rows_used(),
        ingest.rows_read,
        config.csv_path.display()
    );
    for err in &ingest.row_errors {
        log::warn!("skipped line {}: {}", err.line, err.message);
    }

    let rows_read = ingest.rows_read;
    let row_errors = ingest.row_errors.clone();
    let mut regression = ingest.into_regression()?;
    fit_regression(&mut regression, &config.crosses, config.strict)?;

    Ok(RunOutput {
        regression,
        rows_read,
        row_errors,
    })
}

/// Generate a synthetic sample and fit it with no crosses.
pub fn run_demo(config: &SampleConfig) -> Result<Regression, AppError> {
    let points = generate_sample(config)?;
    log::info!(
        "generated {} point(s) with seed {} and noise sd {}",
        points.len(),
        config.sample_seed,
        config.noise_sd
    );

    let mut regression = Regression::new();
    regression.set_observed_name("y");
    for i in 0..config.coefficients.len().saturating_sub(1) {
        regression.set_var_name(i, format!("x{}", i + 1));
    }
    regression.train(points)?;
    fit_regression(&mut regression, &[], false)?;
    Ok(regression)
}

/// Register crosses in order, then fit.
pub fn fit_regression(
    regression: &mut Regression,
    crosses: &[CrossSpec],
    strict: bool,
) -> Result<(), AppError> {
    regression.set_strict(strict);
    for spec in crosses {
        regression.add_shared_cross(build_cross(spec)?)?;
    }
    regression.fit()?;

    if let Some(stats) = regression.stats() {
        log::info!(
            "fit {} coefficient(s) on {} point(s), R2 = {}",
            regression.coefficients().len(),
            stats.n,
            stats.r_squared
        );
        if !stats.r_squared.is_finite() {
            log::warn!("R2 is not finite (observed variance = {})", stats.variance_observed);
        }
    }
    if regression.coefficients().iter().any(|c| !c.is_finite()) {
        log::warn!("non-finite coefficients: the design matrix is rank deficient (try --strict)");
    }
    Ok(())
}

pub fn build_cross(spec: &CrossSpec) -> RegressionResult<SharedCross> {
    Ok(match spec {
        CrossSpec::Power { index, exponent } => Arc::new(pow_cross(*index, *exponent)),
        CrossSpec::Product { indices } => Arc::new(product_cross(indices)?),
    })
}
