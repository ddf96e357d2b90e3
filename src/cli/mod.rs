//! Command-line parsing for the regression tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::CrossSpec;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "regress", version, about = "Multivariate linear regression with feature crosses")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a linear model to a CSV file and print diagnostics.
    Fit(FitArgs),
    /// Generate a synthetic sample from known coefficients and fit it.
    Demo(DemoArgs),
    /// Print a previously exported fit summary.
    Show(ShowArgs),
}

/// Options for fitting a CSV file.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// CSV file; the first row is a header with column names.
    #[arg(long, value_name = "CSV", env = "REGRESS_CSV")]
    pub csv: PathBuf,

    /// Zero-based column holding the observed value. All other columns are variables.
    #[arg(long, default_value_t = 0)]
    pub observed_column: usize,

    /// Derived feature, repeatable: `pow:INDEX:EXPONENT` or `product:I,J[,K...]`.
    ///
    /// Indices refer to variables (the observed column excluded). Crosses are
    /// added in the order given.
    #[arg(long = "cross", value_name = "CROSS", value_parser = parse_cross)]
    pub crosses: Vec<CrossSpec>,

    /// Fail on rank-deficient designs instead of reporting non-finite coefficients.
    #[arg(long)]
    pub strict: bool,

    /// Print the per-point observed/predicted/error table.
    #[arg(long)]
    pub data: bool,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fit summary (coefficients, formula, statistics) to JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,
}

/// Options for the synthetic demo.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// True coefficients, intercept first.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [12.0, 1.0, 2.0, 3.0])]
    pub coeffs: Vec<f64>,

    /// Number of synthetic points to generate.
    #[arg(short = 'n', long, default_value_t = 50)]
    pub sample_count: usize,

    /// Random seed for sample generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Standard deviation of the Gaussian noise added to each observation.
    #[arg(long, default_value_t = 0.5)]
    pub noise: f64,

    /// Lower bound for generated variables.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub min: f64,

    /// Upper bound for generated variables.
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub max: f64,

    /// Print the per-point observed/predicted/error table.
    #[arg(long)]
    pub data: bool,
}

/// Options for showing a saved summary.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Summary JSON file produced by `regress fit --export-summary`.
    #[arg(long, value_name = "JSON")]
    pub summary: PathBuf,
}

/// Parse `pow:INDEX:EXPONENT` or `product:I,J[,K...]`.
pub fn parse_cross(s: &str) -> Result<CrossSpec, String> {
    let (kind, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `pow:INDEX:EXPONENT` or `product:I,J`, got '{s}'"))?;

    match kind {
        "pow" => {
            let (index, exponent) = rest
                .split_once(':')
                .ok_or_else(|| format!("expected `pow:INDEX:EXPONENT`, got '{s}'"))?;
            let index = index
                .parse::<usize>()
                .map_err(|e| format!("invalid variable index '{index}': {e}"))?;
            let exponent = exponent
                .parse::<f64>()
                .map_err(|e| format!("invalid exponent '{exponent}': {e}"))?;
            Ok(CrossSpec::Power { index, exponent })
        }
        "product" => {
            let indices = rest
                .split(',')
                .map(|i| {
                    i.trim()
                        .parse::<usize>()
                        .map_err(|e| format!("invalid variable index '{i}': {e}"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if indices.len() < 2 {
                return Err(format!("a product needs at least two indices, got '{s}'"));
            }
            Ok(CrossSpec::Product { indices })
        }
        other => Err(format!("unknown cross kind '{other}' (use `pow` or `product`)")),
    }
}
