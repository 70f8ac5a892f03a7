//! Result types produced by the compute phase and consumed by reporting.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{CovarianceSummary, GammaParams, Method};

/// Bootstrap statistics for one sample size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapRow {
    /// Mean bootstrapped shape minus the full-sample shape.
    pub bias_shape: f64,
    /// Mean bootstrapped scale minus the full-sample scale.
    pub bias_scale: f64,
    /// Population variance of the bootstrapped shapes.
    pub var_shape: f64,
    /// Population variance of the bootstrapped scales.
    pub var_scale: f64,
    /// Pearson correlation between bootstrapped shapes and scales.
    pub correlation: f64,
}

impl BootstrapRow {
    /// The (variance, variance, correlation) part of the row.
    pub fn covariance(&self) -> CovarianceSummary {
        CovarianceSummary {
            var_shape: self.var_shape,
            var_scale: self.var_scale,
            correlation: self.correlation,
        }
    }
}

/// Output of a full sweep for one method.
///
/// `sizes` and `rows` are index-aligned; sizes are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// Estimation method that was bootstrapped.
    pub method: Method,
    /// Estimate on the full reference sample (the bias reference).
    pub reference: GammaParams,
    /// Size of the reference sample.
    pub reference_len: usize,
    /// Bootstrap replicates per size.
    pub iterations: usize,
    /// Base seed the sweep was run with.
    pub seed: u64,
    /// Resample sizes, strictly increasing.
    pub sizes: Vec<usize>,
    /// One row per entry of `sizes`.
    pub rows: Vec<BootstrapRow>,
    /// Wall-clock time of the sweep in seconds.
    pub runtime_secs: f64,
}

impl SweepResult {
    /// Row for the largest sample size.
    pub fn last_row(&self) -> Option<(usize, &BootstrapRow)> {
        self.sizes.last().copied().zip(self.rows.last())
    }

    /// Row for an exact sample size.
    pub fn row_at(&self, size: usize) -> Option<&BootstrapRow> {
        self.sizes
            .binary_search(&size)
            .ok()
            .and_then(|i| self.rows.get(i))
    }

    /// Extract one statistic across all sizes.
    pub fn series(&self, stat: Statistic) -> Vec<f64> {
        self.rows.iter().map(|row| stat.of(row)).collect()
    }

    /// Check the alignment and ordering invariants.
    ///
    /// Used when loading persisted results.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.len() != self.rows.len() {
            return Err(Error::LengthMismatch {
                left: self.sizes.len(),
                right: self.rows.len(),
            });
        }
        if self.sizes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidConfig(
                "sweep sizes are not strictly increasing".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn set_runtime(&mut self, elapsed: Duration) {
        self.runtime_secs = elapsed.as_secs_f64();
    }
}

/// One of the five per-size bootstrap statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    /// Bias of the shape.
    BiasShape,
    /// Bias of the scale.
    BiasScale,
    /// Variance of the shape.
    VarShape,
    /// Variance of the scale.
    VarScale,
    /// Shape/scale correlation.
    Correlation,
}

impl Statistic {
    /// All statistics, in row order.
    pub const ALL: [Statistic; 5] = [
        Statistic::BiasShape,
        Statistic::BiasScale,
        Statistic::VarShape,
        Statistic::VarScale,
        Statistic::Correlation,
    ];

    /// Pick this statistic out of a row.
    pub fn of(self, row: &BootstrapRow) -> f64 {
        match self {
            Statistic::BiasShape => row.bias_shape,
            Statistic::BiasScale => row.bias_scale,
            Statistic::VarShape => row.var_shape,
            Statistic::VarScale => row.var_scale,
            Statistic::Correlation => row.correlation,
        }
    }

    /// File stem used for chart output.
    pub fn file_stem(self) -> &'static str {
        match self {
            Statistic::BiasShape => "bias_k",
            Statistic::BiasScale => "bias_theta",
            Statistic::VarShape => "var_k",
            Statistic::VarScale => "var_theta",
            Statistic::Correlation => "correlation",
        }
    }

    /// Chart title.
    pub fn title(self) -> &'static str {
        match self {
            Statistic::BiasShape => "Bias k",
            Statistic::BiasScale => "Bias theta",
            Statistic::VarShape => "Variance k",
            Statistic::VarScale => "Variance theta",
            Statistic::Correlation => "Correlation coefficient",
        }
    }
}

/// Bootstrap vs analytic covariance for one method at one sample size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Method being compared.
    pub method: Method,
    /// Resample size the bootstrap side was computed at.
    pub size: usize,
    /// Bootstrap variances and correlation.
    pub bootstrap: CovarianceSummary,
    /// Analytic prediction on the full reference sample.
    pub analytic: CovarianceSummary,
}

impl Comparison {
    /// |bootstrap var_k - analytic var_k| / analytic var_k.
    pub fn relative_shape_error(&self) -> f64 {
        (self.bootstrap.var_shape - self.analytic.var_shape).abs() / self.analytic.var_shape
    }

    /// |bootstrap var_θ - analytic var_θ| / analytic var_θ.
    pub fn relative_scale_error(&self) -> f64 {
        (self.bootstrap.var_scale - self.analytic.var_scale).abs() / self.analytic.var_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(x: f64) -> BootstrapRow {
        BootstrapRow {
            bias_shape: x,
            bias_scale: -x,
            var_shape: x * x,
            var_scale: 2.0 * x,
            correlation: -0.5,
        }
    }

    fn sweep() -> SweepResult {
        SweepResult {
            method: Method::Moments,
            reference: GammaParams::new(2.0, 3.0),
            reference_len: 1000,
            iterations: 10,
            seed: 1,
            sizes: vec![100, 200, 300],
            rows: vec![row(1.0), row(2.0), row(3.0)],
            runtime_secs: 0.0,
        }
    }

    #[test]
    fn test_series_and_lookup() {
        let s = sweep();
        assert_eq!(s.series(Statistic::VarShape), vec![1.0, 4.0, 9.0]);
        assert_eq!(s.row_at(200), Some(&row(2.0)));
        assert_eq!(s.row_at(250), None);
        assert_eq!(s.last_row().map(|(n, _)| n), Some(300));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_misaligned() {
        let mut s = sweep();
        s.rows.pop();
        assert!(s.validate().is_err());

        let mut s = sweep();
        s.sizes = vec![100, 100, 300];
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_relative_errors() {
        let cmp = Comparison {
            method: Method::MaximumLikelihood,
            size: 1000,
            bootstrap: CovarianceSummary {
                var_shape: 1.1,
                var_scale: 1.8,
                correlation: -0.9,
            },
            analytic: CovarianceSummary {
                var_shape: 1.0,
                var_scale: 2.0,
                correlation: -0.95,
            },
        };
        assert!((cmp.relative_shape_error() - 0.1).abs() < 1e-12);
        assert!((cmp.relative_scale_error() - 0.1).abs() < 1e-12);
    }
}
