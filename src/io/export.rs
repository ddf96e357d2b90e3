//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{AppError, RegressionError};
use crate::fit::Regression;

/// Write per-point results to a CSV file.
pub fn write_results_csv(path: &Path, regression: &Regression) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, regression)
}

/// Write per-point results (`observed, variables..., predicted, error`).
pub fn write_results<W: Write>(out: W, regression: &Regression) -> Result<(), AppError> {
    if !regression.is_fit() {
        return Err(RegressionError::NotFitted.into());
    }
    let k = regression.raw_len().unwrap_or(0);
    let mut writer = csv::WriterBuilder::new().from_writer(out);

    let mut header = vec![regression.observed_name().to_string()];
    header.extend((0..k).map(|i| regression.var_name(i)));
    header.push("predicted".to_string());
    header.push("error".to_string());
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for p in regression.data_points() {
        let mut fields = vec![p.observed.to_string()];
        fields.extend(p.variables.iter().map(|v| v.to_string()));
        fields.push(p.predicted.map(|v| format!("{v:.6}")).unwrap_or_default());
        fields.push(p.error.map(|v| format!("{v:.6}")).unwrap_or_default());
        writer
            .write_record(&fields)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_include_predictions() {
        let mut r = Regression::new();
        r.set_observed_name("y");
        r.set_var_name(0, "x, scaled");
        r.add_data_point(1.0, vec![0.0]).unwrap();
        r.add_data_point(3.0, vec![1.0]).unwrap();

        assert!(write_results(Vec::new(), &r).is_err());

        r.fit().unwrap();
        let mut buf = Vec::new();
        write_results(&mut buf, &r).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "y,\"x, scaled\",predicted,error");
        assert!(lines[2].starts_with("3,1,3.000000,"));
    }

    #[test]
    fn quoted_names_read_back_through_csv() {
        let mut r = Regression::new();
        r.set_observed_name("say \"y\"");
        r.set_var_name(0, "x, scaled");
        for (o, x) in [(1.0, 0.0), (3.0, 1.0), (5.0, 2.0)] {
            r.add_data_point(o, vec![x]).unwrap();
        }
        r.fit().unwrap();

        let mut buf = Vec::new();
        write_results(&mut buf, &r).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["say \"y\"", "x, scaled", "predicted", "error"]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[2][0], "5");
        assert_eq!(&rows[2][2], "5.000000");
    }
}
