//! Method-of-moments estimator.

use crate::error::{Error, Result};
use crate::statistics::{mean, mean_of_squares};
use crate::types::GammaParams;

/// Estimate Gamma parameters by matching the first two raw moments.
///
/// With m1 the sample mean and m2 the mean of squares:
///
/// ```text
/// k = m1² / (m2 - m1²)
/// θ = (m2 - m1²) / m1
/// ```
///
/// # Errors
///
/// Invalid-input errors for fewer than two values, non-finite values,
/// non-positive variance (including constant samples) or a non-positive mean.
pub fn estimate_moments(sample: &[f64]) -> Result<GammaParams> {
    if sample.len() < 2 {
        return Err(Error::NotEnoughSamples {
            got: sample.len(),
            min: 2,
        });
    }
    if let Some((index, &value)) = sample.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(Error::NonFiniteValue { index, value });
    }

    if sample.iter().all(|&v| v == sample[0]) {
        return Err(Error::ZeroVariance { variance: 0.0 });
    }

    let m1 = mean(sample);
    let m2 = mean_of_squares(sample);
    let variance = m2 - m1 * m1;

    if !(variance > 0.0) {
        return Err(Error::ZeroVariance { variance });
    }
    if !(m1 > 0.0) {
        return Err(Error::NonPositiveMean { mean: m1 });
    }

    Ok(GammaParams {
        shape: m1 * m1 / variance,
        scale: variance / m1,
    })
}
