//! Maximum-likelihood estimator.
//!
//! For a Gamma sample y the score equations reduce to a single equation in
//! the shape k:
//!
//! ```text
//! g(k) = mean(ln y) - ln(mean y) + ln k - ψ(k) = 0
//! θ = mean(y) / k
//! ```
//!
//! `ln k - ψ(k)` decreases monotonically from +∞ to 0, and by Jensen's
//! inequality `ln(mean y) - mean(ln y) > 0` for any non-constant positive
//! sample, so g has exactly one root.

use super::root::RootFinder;
use crate::error::{Error, Result};
use crate::special::digamma;
use crate::statistics::mean;
use crate::types::GammaParams;

/// Starting point for the shape search.
pub const SHAPE_SEED: f64 = 3.0;

/// Estimate Gamma parameters by maximum likelihood with the default root finder.
///
/// # Errors
///
/// Invalid-input errors for fewer than two values, any value that is not
/// finite and strictly positive (checked before any root finding), or a
/// constant sample. Convergence errors if the shape equation cannot be solved.
pub fn estimate_likelihood(sample: &[f64]) -> Result<GammaParams> {
    estimate_likelihood_with(sample, &RootFinder::default())
}

/// Like [`estimate_likelihood`] with explicit root-finder settings.
pub fn estimate_likelihood_with(sample: &[f64], finder: &RootFinder) -> Result<GammaParams> {
    if sample.len() < 2 {
        return Err(Error::NotEnoughSamples {
            got: sample.len(),
            min: 2,
        });
    }
    for (index, &value) in sample.iter().enumerate() {
        if !value.is_finite() {
            return Err(Error::NonFiniteValue { index, value });
        }
        if value <= 0.0 {
            return Err(Error::NonPositiveValue { index, value });
        }
    }
    if sample.iter().all(|&v| v == sample[0]) {
        return Err(Error::ZeroVariance { variance: 0.0 });
    }

    let mean_y = mean(sample);
    let mean_ln_y = sample.iter().map(|y| y.ln()).sum::<f64>() / sample.len() as f64;
    let log_spread = mean_y.ln() - mean_ln_y;
    if !(log_spread > 0.0) {
        return Err(Error::ZeroVariance {
            variance: log_spread,
        });
    }

    let root = finder.solve(|k| k.ln() - digamma(k) - log_spread, SHAPE_SEED)?;
    let shape = root.value;
    if !(shape.is_finite() && shape > 0.0) {
        return Err(Error::NoConvergence {
            iterations: root.iterations,
            residual: root.residual,
        });
    }
    tracing::trace!(shape, iterations = root.iterations, "solved likelihood equation");

    Ok(GammaParams {
        shape,
        scale: mean_y / shape,
    })
}
