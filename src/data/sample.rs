//! Synthetic sample generation from a known linear formula.
//!
//! Each point draws its raw variables uniformly from `[variable_min, variable_max)`
//! and adds Gaussian noise to `c0 + Σ c_j x_j`. The RNG is seeded, so the same
//! config always yields the same sample.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{DataPoint, SampleConfig};
use crate::error::AppError;

pub fn generate_sample(config: &SampleConfig) -> Result<Vec<DataPoint>, AppError> {
    let Some((&intercept, weights)) = config.coefficients.split_first() else {
        return Err(AppError::new(2, "At least one coefficient (the intercept) is required."));
    };
    if config.sample_count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(config.variable_min.is_finite()
        && config.variable_max.is_finite()
        && config.variable_max > config.variable_min)
    {
        return Err(AppError::new(2, "Invalid variable range for sample generation."));
    }

    let mut rng = StdRng::seed_from_u64(config.sample_seed);
    let noise = Normal::new(0.0, config.noise_sd)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let mut points = Vec::with_capacity(config.sample_count);
    for _ in 0..config.sample_count {
        let variables: Vec<f64> = weights
            .iter()
            .map(|_| rng.gen_range(config.variable_min..config.variable_max))
            .collect();
        let signal: f64 = intercept
            + weights
                .iter()
                .zip(&variables)
                .map(|(c, x)| c * x)
                .sum::<f64>();
        points.push(DataPoint::new(signal + noise.sample(&mut rng), variables));
    }

    Ok(points)
}
