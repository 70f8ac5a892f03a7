//! Type aliases and common types.

use std::fmt;
use std::str::FromStr;

use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 2x2 matrix for (shape, scale) covariance and Fisher information.
pub type Matrix2 = SMatrix<f64, 2, 2>;

/// 2-dimensional vector for gradients with respect to (m1, m2).
pub type Vector2 = SVector<f64, 2>;

/// Estimation method for the Gamma parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Method of moments: match sample mean and mean of squares.
    #[serde(rename = "MM")]
    Moments,
    /// Maximum likelihood, shape solved numerically.
    #[serde(rename = "MLLH")]
    MaximumLikelihood,
}

impl Method {
    /// Both methods, in reporting order.
    pub const ALL: [Method; 2] = [Method::Moments, Method::MaximumLikelihood];

    /// Short name used in file names and reports.
    pub fn name(self) -> &'static str {
        match self {
            Method::Moments => "MM",
            Method::MaximumLikelihood => "MLLH",
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Method::Moments => "Method of moments",
            Method::MaximumLikelihood => "Maximum log-likelihood",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MM" => Ok(Method::Moments),
            "MLLH" => Ok(Method::MaximumLikelihood),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// Gamma distribution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaParams {
    /// Shape parameter k.
    pub shape: f64,
    /// Scale parameter θ.
    pub scale: f64,
}

impl GammaParams {
    /// Create a parameter pair.
    pub fn new(shape: f64, scale: f64) -> Self {
        Self { shape, scale }
    }

    /// Distribution mean kθ.
    pub fn mean(&self) -> f64 {
        self.shape * self.scale
    }
}

/// Variances of (shape, scale) and their correlation.
///
/// Produced either analytically or by bootstrap; the two are compared
/// side by side but never combined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CovarianceSummary {
    /// Variance of the shape estimate.
    pub var_shape: f64,
    /// Variance of the scale estimate.
    pub var_scale: f64,
    /// Correlation between shape and scale estimates.
    pub correlation: f64,
}

impl CovarianceSummary {
    /// Build from a symmetric 2x2 covariance matrix.
    pub fn from_matrix(cov: &Matrix2) -> Self {
        let var_shape = cov[(0, 0)];
        let var_scale = cov[(1, 1)];
        Self {
            var_shape,
            var_scale,
            correlation: cov[(0, 1)] / (var_shape * var_scale).sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_method_parsing() {
        assert_eq!("MM".parse::<Method>().unwrap(), Method::Moments);
        assert_eq!("mllh".parse::<Method>().unwrap(), Method::MaximumLikelihood);

        let err = "bayes".parse::<Method>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownMethod);
    }

    #[test]
    fn test_method_serializes_as_short_name() {
        let json = serde_json::to_string(&Method::MaximumLikelihood).unwrap();
        assert_eq!(json, "\"MLLH\"");
    }

    #[test]
    fn test_summary_from_matrix() {
        let cov = Matrix2::new(4.0, -3.0, -3.0, 9.0);
        let summary = CovarianceSummary::from_matrix(&cov);
        assert_eq!(summary.var_shape, 4.0);
        assert_eq!(summary.var_scale, 9.0);
        assert!((summary.correlation + 0.5).abs() < 1e-12);
    }
}
