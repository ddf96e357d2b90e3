//! Post-fit diagnostics: per-point predictions, variances, R² and the formula.
//!
//! Predictions are recomputed from raw variables on every pass; nothing about
//! crosses is cached on the data points.

use crate::cross::SharedCross;
use crate::domain::{DataPoint, FitStats, NameTable};
use crate::error::RegressionResult;
use crate::math::population_variance;
use crate::models::{evaluate, expand_features};

/// Fill `predicted` and `error` (`predicted - observed`) on every point.
pub fn apply_predictions(
    points: &mut [DataPoint],
    crosses: &[SharedCross],
    coefficients: &[f64],
) -> RegressionResult<()> {
    for p in points.iter_mut() {
        let features = expand_features(&p.variables, crosses)?;
        let predicted = evaluate(coefficients, &features);
        p.predicted = Some(predicted);
        p.error = Some(predicted - p.observed);
    }
    Ok(())
}

/// Population variances of observed and predicted values, and their ratio.
///
/// A zero observed variance yields a non-finite `r_squared`; it is reported
/// as-is.
pub fn compute_stats(points: &[DataPoint]) -> FitStats {
    let observed: Vec<f64> = points.iter().map(|p| p.observed).collect();
    let predicted: Vec<f64> = points
        .iter()
        .map(|p| p.predicted.unwrap_or(f64::NAN))
        .collect();

    let variance_observed = population_variance(&observed);
    let variance_predicted = population_variance(&predicted);
    FitStats {
        n: points.len(),
        variance_observed,
        variance_predicted,
        r_squared: variance_predicted / variance_observed,
    }
}

/// `Predicted = c0 + name_1 * c1 + ...`, names resolved through `names`.
pub fn build_formula(coefficients: &[f64], names: &NameTable) -> String {
    let mut formula = String::new();
    for (i, c) in coefficients.iter().enumerate() {
        if i == 0 {
            formula.push_str(&format!("Predicted = {c:.4}"));
        } else {
            formula.push_str(&format!(" + {} * {c:.4}", names.var(i - 1)));
        }
    }
    formula
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cross::pow_cross;

    #[test]
    fn predictions_include_cross_terms() {
        let mut points = vec![DataPoint::new(10.0, vec![2.0]), DataPoint::new(0.0, vec![3.0])];
        let crosses: Vec<SharedCross> = vec![Arc::new(pow_cross(0, 2.0))];

        apply_predictions(&mut points, &crosses, &[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(points[0].predicted, Some(7.0));
        assert_eq!(points[0].error, Some(-3.0));
        assert_eq!(points[1].predicted, Some(13.0));
        assert_eq!(points[1].error, Some(13.0));
    }

    #[test]
    fn stats_use_population_variance() {
        let mut points = vec![
            DataPoint::new(1.0, vec![]),
            DataPoint::new(3.0, vec![]),
        ];
        points[0].predicted = Some(1.5);
        points[1].predicted = Some(2.5);

        let stats = compute_stats(&points);
        assert_eq!(stats.n, 2);
        assert!((stats.variance_observed - 1.0).abs() < 1e-12);
        assert!((stats.variance_predicted - 0.25).abs() < 1e-12);
        assert!((stats.r_squared - 0.25).abs() < 1e-12);
    }

    #[test]
    fn constant_observations_give_non_finite_r_squared() {
        let mut points = vec![DataPoint::new(4.0, vec![]), DataPoint::new(4.0, vec![])];
        for p in &mut points {
            p.predicted = Some(4.0);
        }
        let stats = compute_stats(&points);
        assert_eq!(stats.variance_observed, 0.0);
        assert!(!stats.r_squared.is_finite());
    }

    #[test]
    fn formula_uses_names_with_fallback() {
        let mut names = NameTable::default();
        names.set_var(0, "Age");
        let formula = build_formula(&[1.5, 2.0, -0.25], &names);
        assert_eq!(formula, "Predicted = 1.5000 + Age * 2.0000 + X1 * -0.2500");
    }
}
