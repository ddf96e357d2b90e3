//! The regression model: owns data, names, crosses and the current fit.
//!
//! Lifecycle: `Empty` → `Populated` → `Fit`. Adding a data point or a cross
//! discards the current fit (coefficients, statistics and per-point
//! predictions), so the model never reports results for data it was not fit on.
//! Call `fit()` again afterwards.

use std::fmt;
use std::sync::Arc;

use crate::cross::{FeatureCross, SharedCross};
use crate::domain::{DataPoint, FitStats, FitSummary, ModelState, NameTable};
use crate::error::{RegressionError, RegressionResult};
use crate::fit::diagnostics::{apply_predictions, build_formula, compute_stats};
use crate::math::solve_least_squares;
use crate::models::{build_design, derived_len, evaluate, expand_features};

#[derive(Debug, Clone)]
struct Fitted {
    coefficients: Vec<f64>,
    stats: FitStats,
    formula: String,
    raw_len: usize,
}

/// Multivariate ordinary least squares with optional feature crosses.
#[derive(Debug, Clone, Default)]
pub struct Regression {
    names: NameTable,
    points: Vec<DataPoint>,
    crosses: Vec<SharedCross>,
    fitted: Option<Fitted>,
    strict: bool,
}

impl Regression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `NumericDegeneracy` on rank-deficient designs instead of
    /// returning non-finite coefficients.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn set_observed_name(&mut self, name: impl Into<String>) {
        self.names.set_observed(name);
    }

    pub fn set_var_name(&mut self, index: usize, name: impl Into<String>) {
        self.names.set_var(index, name);
    }

    pub fn observed_name(&self) -> &str {
        self.names.observed()
    }

    /// Display name of expanded feature `index`, `X{index}` when unset.
    pub fn var_name(&self, index: usize) -> String {
        self.names.var(index)
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn add_data_point(&mut self, observed: f64, variables: Vec<f64>) -> RegressionResult<()> {
        self.push_data_point(DataPoint::new(observed, variables))
    }

    /// Append a data point, rejecting raw-variable counts that disagree with
    /// the points already present.
    pub fn push_data_point(&mut self, mut point: DataPoint) -> RegressionResult<()> {
        if let Some(k) = self.raw_len() {
            if point.variables.len() != k {
                return Err(RegressionError::ShapeMismatch {
                    expected: k,
                    found: point.variables.len(),
                });
            }
        }
        self.invalidate();
        point.clear_diagnostics();
        self.points.push(point);
        Ok(())
    }

    /// Add many data points at once. Stops at the first rejected point.
    pub fn train(&mut self, points: impl IntoIterator<Item = DataPoint>) -> RegressionResult<()> {
        for p in points {
            self.push_data_point(p)?;
        }
        Ok(())
    }

    pub fn add_cross(&mut self, cross: impl FeatureCross + 'static) -> RegressionResult<()> {
        self.add_shared_cross(Arc::new(cross))
    }

    /// Register a cross. Its outputs follow those of every earlier cross.
    pub fn add_shared_cross(&mut self, cross: SharedCross) -> RegressionResult<()> {
        if let Some(k) = self.raw_len() {
            if let Some(&index) = cross.bound_vars().iter().find(|&&i| i >= k) {
                return Err(RegressionError::OutOfBounds { index, len: k });
            }
        }
        self.invalidate();
        self.crosses.push(cross);
        Ok(())
    }

    pub fn data_points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn crosses(&self) -> &[SharedCross] {
        &self.crosses
    }

    /// Raw variables per data point, once any point has been added.
    pub fn raw_len(&self) -> Option<usize> {
        self.points.first().map(|p| p.variables.len())
    }

    /// Raw variables plus cross outputs (the intercept is not counted).
    pub fn feature_len(&self) -> usize {
        self.raw_len().unwrap_or(0) + derived_len(&self.crosses)
    }

    pub fn state(&self) -> ModelState {
        if self.fitted.is_some() {
            ModelState::Fit
        } else if self.points.is_empty() {
            ModelState::Empty
        } else {
            ModelState::Populated
        }
    }

    pub fn is_fit(&self) -> bool {
        self.fitted.is_some()
    }

    /// Build the design matrix, solve for the coefficients and refresh every
    /// diagnostic.
    pub fn fit(&mut self) -> RegressionResult<()> {
        self.invalidate();

        let design = build_design(&self.points, &self.crosses)?;
        let coefficients = solve_least_squares(&design.x, &design.y, self.strict)?;

        let mut offset = design.raw_len;
        for cross in &self.crosses {
            offset += cross.extend_names(&mut self.names, offset);
        }
        let formula = build_formula(&coefficients, &self.names);

        apply_predictions(&mut self.points, &self.crosses, &coefficients)?;
        let stats = compute_stats(&self.points);

        self.fitted = Some(Fitted {
            coefficients,
            stats,
            formula,
            raw_len: design.raw_len,
        });
        Ok(())
    }

    /// Predict the observed value for a row of raw variables.
    pub fn predict(&self, variables: &[f64]) -> RegressionResult<f64> {
        let fitted = self.fitted.as_ref().ok_or(RegressionError::NotFitted)?;
        if variables.len() != fitted.raw_len {
            return Err(RegressionError::ShapeMismatch {
                expected: fitted.raw_len,
                found: variables.len(),
            });
        }
        let features = expand_features(variables, &self.crosses)?;
        Ok(evaluate(&fitted.coefficients, &features))
    }

    /// Coefficient `i` (0 is the intercept); 0 when unfit or out of range.
    pub fn coefficient(&self, i: usize) -> f64 {
        self.coefficients().get(i).copied().unwrap_or(0.0)
    }

    /// All coefficients, empty when unfit.
    pub fn coefficients(&self) -> &[f64] {
        self.fitted
            .as_ref()
            .map(|f| f.coefficients.as_slice())
            .unwrap_or(&[])
    }

    pub fn formula(&self) -> Option<&str> {
        self.fitted.as_ref().map(|f| f.formula.as_str())
    }

    pub fn stats(&self) -> Option<FitStats> {
        self.fitted.as_ref().map(|f| f.stats)
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.stats().map(|s| s.r_squared)
    }

    pub fn variance_observed(&self) -> Option<f64> {
        self.stats().map(|s| s.variance_observed)
    }

    pub fn variance_predicted(&self) -> Option<f64> {
        self.stats().map(|s| s.variance_predicted)
    }

    /// Snapshot of the current fit for export.
    pub fn summary(&self) -> RegressionResult<FitSummary> {
        let fitted = self.fitted.as_ref().ok_or(RegressionError::NotFitted)?;
        let feature_names = (0..fitted.coefficients.len() - 1)
            .map(|i| self.names.var(i))
            .collect();
        Ok(FitSummary {
            tool: "regress".to_string(),
            observed_name: self.names.observed().to_string(),
            feature_names,
            coefficients: fitted.coefficients.clone(),
            formula: fitted.formula.clone(),
            stats: fitted.stats,
        })
    }

    fn invalidate(&mut self) {
        if self.fitted.take().is_some() {
            for p in &mut self.points {
                p.clear_diagnostics();
            }
        }
    }
}

impl fmt::Display for Regression {
    /// Names header followed by one row per data point.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(k) = self.raw_len() else {
            return writeln!(f, "Not enough data points");
        };
        write!(f, "{}", self.observed_name())?;
        for i in 0..k {
            write!(f, "|\t{}", self.var_name(i))?;
        }
        writeln!(f)?;
        for p in &self.points {
            write!(f, "{}", p.observed)?;
            for v in &p.variables {
                write!(f, "|\t{v:.2}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cross::{pow_cross, product_cross};

    fn quadratic() -> Regression {
        let mut r = Regression::new();
        r.set_observed_name("Input-Squared plus Input");
        r.set_var_name(0, "Input");
        for (o, x) in [(6.0, 2.0), (20.0, 4.0), (30.0, 5.0), (72.0, 8.0), (156.0, 12.0)] {
            r.add_data_point(o, vec![x]).unwrap();
        }
        r
    }

    #[test]
    fn lifecycle_moves_through_states() {
        let mut r = Regression::new();
        assert_eq!(r.state(), ModelState::Empty);
        assert_eq!(r.fit().unwrap_err(), RegressionError::NotPopulated);

        r.add_data_point(1.0, vec![0.0]).unwrap();
        r.add_data_point(3.0, vec![1.0]).unwrap();
        assert_eq!(r.state(), ModelState::Populated);

        r.fit().unwrap();
        assert_eq!(r.state(), ModelState::Fit);
        assert!((r.coefficient(0) - 1.0).abs() < 1e-12);
        assert!((r.coefficient(1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn coefficient_is_zero_when_unfit() {
        let r = quadratic();
        assert_eq!(r.coefficient(0), 0.0);
        assert!(r.coefficients().is_empty());
        assert!(r.formula().is_none());
    }

    #[test]
    fn adding_data_discards_the_fit() {
        let mut r = quadratic();
        r.fit().unwrap();
        assert!(r.data_points()[0].predicted.is_some());

        r.add_data_point(42.0, vec![6.0]).unwrap();
        assert_eq!(r.state(), ModelState::Populated);
        assert_eq!(r.coefficient(1), 0.0);
        assert!(r.data_points().iter().all(|p| p.predicted.is_none()));
        assert_eq!(r.predict(&[1.0]).unwrap_err(), RegressionError::NotFitted);
    }

    #[test]
    fn adding_a_cross_discards_the_fit() {
        let mut r = quadratic();
        r.fit().unwrap();
        r.add_cross(pow_cross(0, 2.0)).unwrap();
        assert!(!r.is_fit());
        assert_eq!(r.feature_len(), 2);
    }

    #[test]
    fn mismatched_point_is_rejected() {
        let mut r = quadratic();
        assert_eq!(
            r.add_data_point(1.0, vec![1.0, 2.0]).unwrap_err(),
            RegressionError::ShapeMismatch {
                expected: 1,
                found: 2
            }
        );
        assert_eq!(r.data_points().len(), 5);
    }

    #[test]
    fn cross_bound_outside_raw_variables_is_rejected() {
        let mut r = quadratic();
        assert_eq!(
            r.add_cross(pow_cross(3, 2.0)).unwrap_err(),
            RegressionError::OutOfBounds { index: 3, len: 1 }
        );
        assert!(r.crosses().is_empty());
    }

    #[test]
    fn cross_registered_before_data_fails_at_fit() {
        let mut r = Regression::new();
        r.add_cross(pow_cross(5, 2.0)).unwrap();
        for i in 0..6 {
            r.add_data_point(i as f64, vec![i as f64, 1.0]).unwrap();
        }
        assert_eq!(
            r.fit().unwrap_err(),
            RegressionError::OutOfBounds { index: 5, len: 2 }
        );
    }

    #[test]
    fn crosses_extend_names_in_registration_order() {
        let mut r = quadratic();
        r.add_cross(pow_cross(0, 2.0)).unwrap();
        r.add_cross(pow_cross(0, 3.0)).unwrap();
        r.fit().unwrap();

        assert_eq!(r.var_name(1), "(Input)^2");
        assert_eq!(r.var_name(2), "(Input)^3");
        assert_eq!(r.coefficients().len(), 4);
        assert!(r.formula().unwrap().contains("(Input)^3 * "));
    }

    #[test]
    fn predict_checks_arity() {
        let mut r = quadratic();
        r.add_cross(pow_cross(0, 2.0)).unwrap();
        r.fit().unwrap();
        assert_eq!(
            r.predict(&[1.0, 2.0]).unwrap_err(),
            RegressionError::ShapeMismatch {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn predict_before_fit_fails() {
        assert_eq!(
            quadratic().predict(&[1.0]).unwrap_err(),
            RegressionError::NotFitted
        );
    }

    #[test]
    fn product_cross_recovers_interaction() {
        let mut r = Regression::new();
        r.set_var_name(0, "A");
        r.set_var_name(1, "B");
        for a in 0..4 {
            for b in 0..3 {
                let (a, b) = (a as f64, b as f64);
                r.add_data_point(1.0 + 2.0 * a - b + 0.5 * a * b, vec![a, b]).unwrap();
            }
        }
        r.add_cross(product_cross(&[0, 1]).unwrap()).unwrap();
        r.fit().unwrap();

        for (got, want) in r.coefficients().iter().zip([1.0, 2.0, -1.0, 0.5]) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
        assert_eq!(r.var_name(2), "(A)*(B)");
    }

    #[test]
    fn summary_lists_expanded_feature_names() {
        let mut r = quadratic();
        r.add_cross(pow_cross(0, 2.0)).unwrap();
        assert_eq!(r.summary().unwrap_err(), RegressionError::NotFitted);
        r.fit().unwrap();

        let summary = r.summary().unwrap();
        assert_eq!(summary.feature_names, vec!["Input", "(Input)^2"]);
        assert_eq!(summary.coefficients.len(), 3);
        assert_eq!(summary.observed_name, "Input-Squared plus Input");
    }

    #[test]
    fn display_lists_names_and_rows() {
        let mut r = Regression::new();
        assert_eq!(r.to_string(), "Not enough data points\n");
        r.set_observed_name("Y");
        r.add_data_point(1.0, vec![2.0]).unwrap();
        assert_eq!(r.to_string(), "Y|\tX0\n1|\t2.00\n");
    }
}
