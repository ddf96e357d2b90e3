//! Summary statistics used by the fit diagnostics.

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `N`, not `N - 1`).
pub fn population_variance(values: &[f64]) -> f64 {
    let avg = mean(values);
    let ss: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    ss / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_variance_divides_by_n() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v) - 5.0).abs() < 1e-12);
        assert!((population_variance(&v) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn constant_values_have_zero_variance() {
        assert_eq!(population_variance(&[3.0, 3.0, 3.0]), 0.0);
    }
}
