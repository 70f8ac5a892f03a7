//! Shared moment and correlation helpers.

use crate::error::{Error, Result};

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of squares (second raw moment).
pub fn mean_of_squares(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|x| x * x).sum::<f64>() / values.len() as f64
}

/// Population variance (divide by n).
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient of two equally long series.
///
/// The result is clamped to [-1, 1] to absorb rounding.
///
/// # Errors
///
/// `LengthMismatch` if the lengths differ, `NotEnoughSamples` for fewer than
/// two points, `ZeroVariance` if either series is constant.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(Error::NotEnoughSamples {
            got: x.len(),
            min: 2,
        });
    }

    let mx = mean(x);
    let my = mean(y);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return Err(Error::ZeroVariance {
            variance: sxx.min(syy),
        });
    }

    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moments() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(mean(&v), 2.5);
        assert_eq!(mean_of_squares(&v), 7.5);
        assert!((population_variance(&v) - 1.25).abs() < 1e-12);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_pearson_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let up: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let down: Vec<f64> = x.iter().map(|v| -0.5 * v).collect();
        assert!((pearson_correlation(&x, &up).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson_correlation(&x, &down).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_errors() {
        assert!(matches!(
            pearson_correlation(&[1.0, 2.0], &[1.0]),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(matches!(
            pearson_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(Error::ZeroVariance { .. })
        ));
    }
}
