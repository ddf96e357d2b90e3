//! Feature crosses: derived columns computed from a data point's raw variables.
//!
//! A cross is bound to a fixed set of raw-variable indices and always produces
//! the same number of values (`arity`). Registration order on the model fixes
//! where its outputs land in the expanded feature space, and therefore which
//! coefficients they map to.

use std::sync::Arc;

use crate::domain::NameTable;
use crate::error::{RegressionError, RegressionResult};

/// A derived-feature transformation.
///
/// Implementors must return exactly `arity()` values from every `calculate`
/// call; the design-matrix builder rejects any deviation.
pub trait FeatureCross: std::fmt::Debug {
    /// Raw-variable indices this cross reads from.
    fn bound_vars(&self) -> &[usize];

    /// Number of values produced per data point.
    fn arity(&self) -> usize;

    /// Compute the derived values for one row of raw variables.
    fn calculate(&self, raw: &[f64]) -> RegressionResult<Vec<f64>>;

    /// Write display names for the produced values starting at `offset`.
    ///
    /// Names are only written when the source names are known and non-empty;
    /// otherwise the slot keeps its `X{offset}` fallback. Returns the
    /// number of expanded-feature slots claimed, which is always `arity()`.
    fn extend_names(&self, names: &mut NameTable, offset: usize) -> usize;
}

/// A registered cross. Crosses are read-only once built, so the model and any
/// caller can share the same instance.
pub type SharedCross = Arc<dyn FeatureCross>;

/// `raw[index]^exponent`.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerCross {
    bound: [usize; 1],
    exponent: f64,
    notation: String,
}

impl PowerCross {
    pub fn new(index: usize, exponent: f64) -> Self {
        Self {
            bound: [index],
            exponent,
            notation: format!("^{exponent}"),
        }
    }

    pub fn index(&self) -> usize {
        self.bound[0]
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}

impl FeatureCross for PowerCross {
    fn bound_vars(&self) -> &[usize] {
        &self.bound
    }

    fn arity(&self) -> usize {
        1
    }

    fn calculate(&self, raw: &[f64]) -> RegressionResult<Vec<f64>> {
        let x = bound_value(raw, self.index())?;
        Ok(vec![x.powf(self.exponent)])
    }

    fn extend_names(&self, names: &mut NameTable, offset: usize) -> usize {
        if let Some(source) = names.get(self.index()) {
            let name = format!("({source}){}", self.notation);
            names.set_var(offset, name);
        }
        self.arity()
    }
}

/// Product of two or more raw variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCross {
    indices: Vec<usize>,
}

impl ProductCross {
    pub fn new(indices: Vec<usize>) -> RegressionResult<Self> {
        if indices.len() < 2 {
            return Err(RegressionError::InvalidCross(format!(
                "a product needs at least two variables, got {}",
                indices.len()
            )));
        }
        Ok(Self { indices })
    }
}

impl FeatureCross for ProductCross {
    fn bound_vars(&self) -> &[usize] {
        &self.indices
    }

    fn arity(&self) -> usize {
        1
    }

    fn calculate(&self, raw: &[f64]) -> RegressionResult<Vec<f64>> {
        let mut product = 1.0;
        for &i in &self.indices {
            product *= bound_value(raw, i)?;
        }
        Ok(vec![product])
    }

    fn extend_names(&self, names: &mut NameTable, offset: usize) -> usize {
        let sources: Option<Vec<String>> = self
            .indices
            .iter()
            .map(|&i| names.get(i).map(|s| format!("({s})")))
            .collect();
        if let Some(sources) = sources {
            names.set_var(offset, sources.join("*"));
        }
        self.arity()
    }
}

/// Shorthand for [`PowerCross::new`].
pub fn pow_cross(index: usize, exponent: f64) -> PowerCross {
    PowerCross::new(index, exponent)
}

/// Shorthand for [`ProductCross::new`].
pub fn product_cross(indices: &[usize]) -> RegressionResult<ProductCross> {
    ProductCross::new(indices.to_vec())
}

fn bound_value(raw: &[f64], index: usize) -> RegressionResult<f64> {
    raw.get(index).copied().ok_or(RegressionError::OutOfBounds {
        index,
        len: raw.len(),
    })
}
