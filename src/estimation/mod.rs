//! Gamma parameter estimators.
//!
//! - [`estimate_moments`]: closed-form moment matching
//! - [`estimate_likelihood`]: maximum likelihood, shape solved numerically
//!
//! Both take any sample and return a [`GammaParams`]; neither substitutes a
//! fallback value when estimation fails.

mod likelihood;
mod moments;
mod root;

pub use likelihood::{estimate_likelihood, estimate_likelihood_with, SHAPE_SEED};
pub use moments::estimate_moments;
pub use root::{Root, RootFinder};

use crate::error::Result;
use crate::types::{GammaParams, Method};

impl Method {
    /// Estimate Gamma parameters from `sample` with this method.
    pub fn estimate(self, sample: &[f64]) -> Result<GammaParams> {
        match self {
            Method::Moments => estimate_moments(sample),
            Method::MaximumLikelihood => estimate_likelihood(sample),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            Method::Moments.estimate(&data).unwrap(),
            estimate_moments(&data).unwrap()
        );
        assert_eq!(
            Method::MaximumLikelihood.estimate(&data).unwrap(),
            estimate_likelihood(&data).unwrap()
        );
    }
}
