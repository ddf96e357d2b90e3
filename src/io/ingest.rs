//! CSV ingest.
//!
//! Turns a numeric CSV into named data points:
//! - the header row supplies the observed name and variable names
//! - the observed column (default 0) becomes `observed`, every other column a
//!   raw variable, in file order
//! - rows that fail to parse are skipped and reported with their line number

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::DataPoint;
use crate::error::{AppError, RegressionError, RegressionResult};
use crate::fit::Regression;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: names + parsed points + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub observed_name: String,
    pub var_names: Vec<String>,
    pub points: Vec<DataPoint>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedData {
    pub fn rows_used(&self) -> usize {
        self.points.len()
    }

    /// Build an unfitted model with the CSV names and points loaded.
    pub fn into_regression(self) -> RegressionResult<Regression> {
        let mut r = Regression::new();
        r.set_observed_name(self.observed_name);
        for (i, name) in self.var_names.into_iter().enumerate() {
            r.set_var_name(i, name);
        }
        r.train(self.points)?;
        Ok(r)
    }
}

/// Split each row into an observed value (column `observed_index`) and the
/// remaining columns as variables, order preserved.
pub fn make_data_points(rows: &[Vec<f64>], observed_index: usize) -> RegressionResult<Vec<DataPoint>> {
    rows.iter()
        .map(|row| {
            let observed = *row.get(observed_index).ok_or(RegressionError::OutOfBounds {
                index: observed_index,
                len: row.len(),
            })?;
            let variables = row
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != observed_index)
                .map(|(_, v)| *v)
                .collect();
            Ok(DataPoint::new(observed, variables))
        })
        .collect()
}

/// Load a CSV file from disk.
pub fn load_data_points(path: &Path, observed_column: usize) -> Result<IngestedData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_data_points(file, observed_column)
}

/// Parse CSV content from any reader.
pub fn read_data_points<R: Read>(input: R, observed_column: usize) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    if observed_column >= headers.len() {
        return Err(AppError::new(
            2,
            format!(
                "Observed column {observed_column} does not exist (CSV has {} column(s)).",
                headers.len()
            ),
        ));
    }

    let names: Vec<String> = headers.iter().map(normalize_header_name).collect();
    let observed_name = names[observed_column].clone();
    let var_names = names
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != observed_column)
        .map(|(_, n)| n.clone())
        .collect();

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, headers.len()) {
            Ok(row) => rows.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    // Every kept row is `headers.len()` wide and `observed_column` was checked
    // against the headers, so this split cannot fail.
    let points = make_data_points(&rows, observed_column)
        .map_err(|e| AppError::new(2, format!("Failed to split CSV rows: {e}")))?;

    if points.is_empty() {
        return Err(AppError::new(3, "No valid rows found in CSV."));
    }

    Ok(IngestedData {
        observed_name,
        var_names,
        points,
        row_errors,
        rows_read,
    })
}

fn parse_row(record: &StringRecord, width: usize) -> Result<Vec<f64>, String> {
    if record.len() != width {
        return Err(format!("expected {width} field(s), found {}", record.len()));
    }
    record
        .iter()
        .enumerate()
        .map(|(i, field)| {
            field
                .parse::<f64>()
                .map_err(|_| format!("column {}: '{field}' is not a number", i + 1))
        })
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}
