//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays free of printing
//! - output changes are localized

use crate::domain::{FitStats, FitSummary};
use crate::error::{RegressionError, RegressionResult};
use crate::fit::Regression;

/// Dump of a regression: optional per-point table, then statistics and formula.
///
/// Predictions are shown as stored by the last `fit()`; an unfit model shows
/// blanks for them and `n/a` for the statistics.
pub fn format_dump(regression: &Regression, with_data: bool) -> RegressionResult<String> {
    if regression.data_points().is_empty() {
        return Err(RegressionError::NotPopulated);
    }

    let mut out = String::new();
    if with_data {
        out.push_str(&format_data_table(regression));
        out.push('\n');
    }

    out.push_str(&format!("N = {}\n", regression.data_points().len()));
    match regression.stats() {
        Some(stats) => out.push_str(&format_stats(&stats)),
        None => out.push_str("Variance Observed = n/a\nVariance Predicted = n/a\nR2 = n/a\n"),
    }
    out.push_str(&format!(
        "Formula = {}\n",
        regression.formula().unwrap_or("(not fit)")
    ));
    out.push_str(&format!("{:-<65}\n", ""));
    Ok(out)
}

/// One line per data point: observed, predicted, error.
pub fn format_data_table(regression: &Regression) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>6} {:>14} {:>14} {:>14}",
            "#",
            truncate(regression.observed_name(), 14),
            "predicted",
            "error"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<6} {:-<14} {:-<14} {:-<14}", "", "", "", "").trim_end());
    out.push('\n');

    for (i, p) in regression.data_points().iter().enumerate() {
        out.push_str(
            format!(
                "{:>6} {:>14.4} {:>14} {:>14}",
                i,
                p.observed,
                fmt_opt(p.predicted),
                fmt_opt(p.error)
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Render a summary loaded from JSON.
pub fn format_summary(summary: &FitSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} - fit summary ===\n", summary.tool));
    out.push_str(&format!("Observed: {}\n", summary.observed_name));
    out.push_str("Coefficients:\n");
    for (i, c) in summary.coefficients.iter().enumerate() {
        let name = if i == 0 {
            "(intercept)"
        } else {
            summary.feature_names.get(i - 1).map(String::as_str).unwrap_or("?")
        };
        out.push_str(&format!("  {:<24} {c:.6}\n", truncate(name, 24)));
    }
    out.push_str(&format!("N = {}\n", summary.stats.n));
    out.push_str(&format_stats(&summary.stats));
    out.push_str(&format!("Formula = {}\n", summary.formula));
    out
}

fn format_stats(stats: &FitStats) -> String {
    format!(
        "Variance Observed = {}\nVariance Predicted = {}\nR2 = {}\n",
        stats.variance_observed, stats.variance_predicted, stats.r_squared
    )
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.4}")).unwrap_or_default()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
