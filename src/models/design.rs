//! Design matrix assembly and linear-model evaluation.
//!
//! The fitter relies on two primitive operations:
//! - expand a row of raw variables into the full feature row (raw variables
//!   followed by every cross output, in registration order)
//! - evaluate `c0 + Σ c_j * feature_j` for a feature row
//!
//! Both the diagnostics pass and `Regression::predict` go through these, so a
//! training point predicted either way gives the same bits.

use nalgebra::{DMatrix, DVector};

use crate::cross::SharedCross;
use crate::domain::DataPoint;
use crate::error::{RegressionError, RegressionResult};

/// The least-squares inputs: `x` is `N × (1 + k + m)`, `y` is `N × 1`.
#[derive(Debug, Clone)]
pub struct Design {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    /// Raw variables per point (`k`).
    pub raw_len: usize,
}

impl Design {
    /// Expanded feature count (`k + m`), excluding the intercept.
    pub fn feature_len(&self) -> usize {
        self.x.ncols() - 1
    }
}

/// Total number of derived columns the crosses add.
pub fn derived_len(crosses: &[SharedCross]) -> usize {
    crosses.iter().map(|c| c.arity()).sum()
}

/// Raw variables followed by each cross's outputs.
pub fn expand_features(raw: &[f64], crosses: &[SharedCross]) -> RegressionResult<Vec<f64>> {
    let mut row = Vec::with_capacity(raw.len() + derived_len(crosses));
    row.extend_from_slice(raw);
    for cross in crosses {
        let values = cross.calculate(raw)?;
        if values.len() != cross.arity() {
            return Err(RegressionError::ShapeMismatch {
                expected: cross.arity(),
                found: values.len(),
            });
        }
        row.extend(values);
    }
    Ok(row)
}

/// Evaluate the fitted model on one expanded feature row.
///
/// `coefficients[0]` is the intercept; `coefficients[j]` weights `features[j - 1]`.
pub fn evaluate(coefficients: &[f64], features: &[f64]) -> f64 {
    let mut predicted = coefficients[0];
    for (c, f) in coefficients[1..].iter().zip(features) {
        predicted += c * f;
    }
    predicted
}

/// Build the design matrix (intercept column first) and observation vector.
pub fn build_design(points: &[DataPoint], crosses: &[SharedCross]) -> RegressionResult<Design> {
    let Some(first) = points.first() else {
        return Err(RegressionError::NotPopulated);
    };

    let n = points.len();
    let k = first.variables.len();
    let cols = 1 + k + derived_len(crosses);
    if n < cols {
        return Err(RegressionError::InsufficientData {
            observations: n,
            features: cols,
        });
    }

    let mut x = DMatrix::<f64>::zeros(n, cols);
    let mut y = DVector::<f64>::zeros(n);

    for (i, p) in points.iter().enumerate() {
        if p.variables.len() != k {
            return Err(RegressionError::ShapeMismatch {
                expected: k,
                found: p.variables.len(),
            });
        }
        let row = expand_features(&p.variables, crosses)?;
        x[(i, 0)] = 1.0;
        for (j, v) in row.iter().enumerate() {
            x[(i, j + 1)] = *v;
        }
        y[i] = p.observed;
    }

    Ok(Design { x, y, raw_len: k })
}
