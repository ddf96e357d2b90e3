//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the fit pipeline
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DemoArgs, FitArgs, ShowArgs};
use crate::domain::{FitConfig, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable holding the log filter (`env_logger` syntax).
pub const LOG_ENV: &str = "REGRESS_LOG";

/// Entry point for the `regress` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may provide REGRESS_CSV / REGRESS_LOG; a missing file is fine.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Demo(args) => handle_demo(args),
        Command::Show(args) => handle_show(args),
    }
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or(LOG_ENV, "warn");
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    if !run.row_errors.is_empty() {
        println!(
            "Skipped {} of {} row(s) that could not be parsed.",
            run.row_errors.len(),
            run.rows_read
        );
    }
    println!("{}", crate::report::format_dump(&run.regression, config.show_data)?);

    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.regression)?;
        log::info!("wrote per-point results to {}", path.display());
    }
    if let Some(path) = &config.export_summary {
        crate::io::summary::write_summary_json(path, &run.regression.summary()?)?;
        log::info!("wrote fit summary to {}", path.display());
    }

    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let regression = pipeline::run_demo(&config)?;

    println!("True coefficients: {:?}", config.coefficients);
    println!("{}", crate::report::format_dump(&regression, args.data)?);
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let summary = crate::io::summary::read_summary_json(&args.summary)?;
    println!("{}", crate::report::format_summary(&summary));
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        csv_path: args.csv.clone(),
        observed_column: args.observed_column,
        crosses: args.crosses.clone(),
        strict: args.strict,
        show_data: args.data,
        export_results: args.export.clone(),
        export_summary: args.export_summary.clone(),
    }
}

pub fn sample_config_from_args(args: &DemoArgs) -> SampleConfig {
    SampleConfig {
        coefficients: args.coeffs.clone(),
        sample_count: args.sample_count,
        sample_seed: args.seed,
        noise_sd: args.noise,
        variable_min: args.min,
        variable_max: args.max,
    }
}
