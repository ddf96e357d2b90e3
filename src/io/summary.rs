//! Read/write fit summary JSON files.
//!
//! A summary is the portable representation of a fitted model: names,
//! coefficients, formula and statistics. The schema is `domain::FitSummary`.

use std::fs::File;
use std::path::Path;

use crate::domain::FitSummary;
use crate::error::AppError;

/// Write a fit summary JSON file.
pub fn write_summary_json(path: &Path, summary: &FitSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

/// Read a fit summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<FitSummary, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    let summary: FitSummary =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid summary JSON: {e}")))?;
    Ok(summary)
}
