//! Ordinary least squares via QR decomposition.
//!
//! We solve
//!
//! ```text
//! minimize Σ (y_i - x_i^T c)^2
//! ```
//!
//! by factoring the design matrix `X = Q R` (`Q` with orthonormal columns, `R`
//! upper-triangular) and back-substituting `R c = Qᵗ y` from the last row up.
//!
//! Nalgebra's `QR::solve` only handles square systems, so we take the thin
//! factors from `qr()` and do the triangular solve ourselves.
//!
//! Rank deficiency (e.g. collinear features) shows up as a zero or near-zero
//! diagonal in `R`. By default the division is left to produce non-finite
//! coefficients; `strict` turns it into an error instead.

use nalgebra::{DMatrix, DVector};

use crate::error::{RegressionError, RegressionResult};

/// Relative tolerance on `|R[i][i]|` used by strict mode.
const RANK_TOL: f64 = 1e-10;

/// Solve a least squares problem using QR decomposition and back-substitution.
///
/// Returns one coefficient per column of `x`, in column order.
pub fn solve_least_squares(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    strict: bool,
) -> RegressionResult<Vec<f64>> {
    let (rows, cols) = x.shape();
    if y.len() != rows {
        return Err(RegressionError::ShapeMismatch {
            expected: rows,
            found: y.len(),
        });
    }
    if rows < cols {
        return Err(RegressionError::InsufficientData {
            observations: rows,
            features: cols,
        });
    }

    let qr = x.clone().qr();
    let q = qr.q();
    let r = qr.r();
    let qty = q.transpose() * y;

    if strict {
        check_rank(&r)?;
    }

    Ok(back_substitute(&r, &qty))
}

/// Solve `R c = b` for upper-triangular `R`, last row first.
pub fn back_substitute(r: &DMatrix<f64>, b: &DVector<f64>) -> Vec<f64> {
    let n = r.ncols();
    let mut c = vec![0.0; n];
    for i in (0..n).rev() {
        c[i] = b[i];
        for j in i + 1..n {
            c[i] -= c[j] * r[(i, j)];
        }
        c[i] /= r[(i, i)];
    }
    c
}

fn check_rank(r: &DMatrix<f64>) -> RegressionResult<()> {
    let n = r.ncols();
    let max_diag = (0..n).map(|i| r[(i, i)].abs()).fold(0.0_f64, f64::max);
    for i in 0..n {
        let d = r[(i, i)].abs();
        if !d.is_finite() || d <= RANK_TOL * max_diag {
            return Err(RegressionError::NumericDegeneracy { column: i });
        }
    }
    Ok(())
}
