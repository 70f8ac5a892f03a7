//! Analytic (asymptotic) covariance of the two estimators.
//!
//! Both functions run once over the full reference sample. The results are
//! the prediction that bootstrap variances at large N are compared against.

use crate::error::{Error, Result};
use crate::estimation::estimate_likelihood;
use crate::special::trigamma;
use crate::types::{CovarianceSummary, Matrix2, Method, Vector2};

use super::summary::{mean, mean_of_squares};

/// Determinants smaller than this fraction of `I11 * I22` count as singular.
const SINGULAR_RELATIVE_TOLERANCE: f64 = 1e-12;

/// Analytic covariance for `method` over `sample`.
pub fn analytic_covariance(method: Method, sample: &[f64]) -> Result<CovarianceSummary> {
    match method {
        Method::Moments => moments_covariance(sample),
        Method::MaximumLikelihood => likelihood_covariance(sample),
    }
}

/// Covariance matrix of the sample moments (m1, m2).
///
/// Uses unbiased central sums with `1/(N(N-1))` normalization so the result
/// is the covariance of the *means*, not of single observations.
pub fn moment_covariance(sample: &[f64]) -> Result<Matrix2> {
    let n = sample.len();
    if n < 2 {
        return Err(Error::NotEnoughSamples { got: n, min: 2 });
    }

    let m1 = mean(sample);
    let m2 = mean_of_squares(sample);

    let (mut s11, mut s12, mut s22) = (0.0, 0.0, 0.0);
    for &x in sample {
        let d1 = x - m1;
        let d2 = x * x - m2;
        s11 += d1 * d1;
        s12 += d1 * d2;
        s22 += d2 * d2;
    }

    let norm = 1.0 / (n as f64 * (n - 1) as f64);
    Ok(Matrix2::new(s11, s12, s12, s22) * norm)
}

/// Delta-method covariance of the moment estimator.
///
/// Gradients of k = m1²/s and θ = s/m1 (s = m2 - m1²) with respect to
/// (m1, m2):
///
/// ```text
/// ∂k/∂m1 = 2·m1·m2 / s²      ∂k/∂m2 = -m1² / s²
/// ∂θ/∂m1 = -(m2 + m1²) / m1²  ∂θ/∂m2 = 1 / m1
/// ```
///
/// and Cov(k, θ) = J · V · Jᵀ with J the 2x2 Jacobian.
pub fn moments_covariance(sample: &[f64]) -> Result<CovarianceSummary> {
    let v = moment_covariance(sample)?;

    let m1 = mean(sample);
    let m2 = mean_of_squares(sample);
    let s = m2 - m1 * m1;
    if !(s > 0.0) {
        return Err(Error::ZeroVariance { variance: s });
    }
    if !(m1 > 0.0) {
        return Err(Error::NonPositiveMean { mean: m1 });
    }

    let grad_shape = Vector2::new(2.0 * m1 * m2 / (s * s), -(m1 * m1) / (s * s));
    let grad_scale = Vector2::new(-(m2 + m1 * m1) / (m1 * m1), 1.0 / m1);

    let var_shape = grad_shape.dot(&(v * grad_shape));
    let var_scale = grad_scale.dot(&(v * grad_scale));
    let cov = grad_shape.dot(&(v * grad_scale));

    Ok(CovarianceSummary::from_matrix(&Matrix2::new(
        var_shape, cov, cov, var_scale,
    )))
}

/// Fisher information of N Gamma observations at (k, θ).
///
/// ```text
/// I = N · [ ψ'(k)   1/θ  ]
///         [ 1/θ    k/θ² ]
/// ```
pub fn fisher_information(shape: f64, scale: f64, n: usize) -> Matrix2 {
    let n = n as f64;
    Matrix2::new(
        n * trigamma(shape),
        n / scale,
        n / scale,
        n * shape / (scale * scale),
    )
}

/// Inverse-Fisher covariance of the maximum-likelihood estimator.
///
/// # Errors
///
/// Estimation errors from [`estimate_likelihood`], or `SingularMatrix` if the
/// information matrix has a zero, non-finite or negligible determinant.
pub fn likelihood_covariance(sample: &[f64]) -> Result<CovarianceSummary> {
    let params = estimate_likelihood(sample)?;
    let info = fisher_information(params.shape, params.scale, sample.len());

    let determinant = info.determinant();
    let scale = (info[(0, 0)] * info[(1, 1)]).abs();
    if !determinant.is_finite() || determinant.abs() <= SINGULAR_RELATIVE_TOLERANCE * scale {
        return Err(Error::SingularMatrix { determinant });
    }
    let cov = info
        .try_inverse()
        .ok_or(Error::SingularMatrix { determinant })?;

    Ok(CovarianceSummary::from_matrix(&cov))
}
