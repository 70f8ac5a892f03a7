//! Report phase: comparisons and chart series built from finished sweeps.

use std::path::PathBuf;

use serde::Serialize;

use crate::compare::compare_sweep;
use crate::config::Config;
use crate::error::Result;
use crate::output::{build_charts, write_charts};
use crate::result::{Comparison, SweepResult};
use crate::sample::ReferenceSample;
use crate::types::Method;

/// Everything a study produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyReport {
    /// One sweep per selected method, in configuration order.
    pub sweeps: Vec<SweepResult>,
    /// Bootstrap vs analytic comparison per sweep, when enabled.
    pub comparisons: Vec<Comparison>,
    /// Chart series files written, when enabled and both methods ran.
    pub chart_files: Vec<PathBuf>,
}

impl StudyReport {
    /// Sweep for `method`, if it ran.
    pub fn sweep(&self, method: Method) -> Option<&SweepResult> {
        self.sweeps.iter().find(|s| s.method == method)
    }

    /// Comparison for `method`, if one was made.
    pub fn comparison(&self, method: Method) -> Option<&Comparison> {
        self.comparisons.iter().find(|c| c.method == method)
    }
}

/// Build the report for `sweeps` without recomputing any bootstrap.
pub fn report(
    sample: &ReferenceSample,
    sweeps: Vec<SweepResult>,
    config: &Config,
) -> Result<StudyReport> {
    let comparisons = if config.compare {
        sweeps
            .iter()
            .map(|sweep| compare_sweep(sample, sweep))
            .collect::<Result<Vec<_>>>()?
    } else {
        Vec::new()
    };

    let moments = sweeps.iter().find(|s| s.method == Method::Moments);
    let likelihood = sweeps.iter().find(|s| s.method == Method::MaximumLikelihood);
    let chart_files = match (config.charts, moments, likelihood) {
        (true, Some(mm), Some(ml)) => {
            let charts = build_charts(mm, ml)?;
            write_charts(&config.output_dir, &charts)?
        }
        (true, _, _) => {
            tracing::warn!("charts need both methods, skipping");
            Vec::new()
        }
        _ => Vec::new(),
    };

    Ok(StudyReport {
        sweeps,
        comparisons,
        chart_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::BootstrapRow;
    use crate::types::GammaParams;

    fn sample() -> ReferenceSample {
        ReferenceSample::new((1..=200).map(|i| 0.2 + (i % 11) as f64 * 0.7).collect()).unwrap()
    }

    fn sweep(method: Method) -> SweepResult {
        SweepResult {
            method,
            reference: GammaParams::new(2.0, 1.5),
            reference_len: 200,
            iterations: 10,
            seed: 3,
            sizes: vec![100, 200],
            rows: vec![
                BootstrapRow {
                    bias_shape: 0.1,
                    bias_scale: -0.1,
                    var_shape: 0.04,
                    var_scale: 0.02,
                    correlation: -0.9,
                };
                2
            ],
            runtime_secs: 0.0,
        }
    }

    #[test]
    fn test_report_with_both_methods() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let report = report(
            &sample(),
            vec![sweep(Method::Moments), sweep(Method::MaximumLikelihood)],
            &config,
        )
        .unwrap();

        assert_eq!(report.comparisons.len(), 2);
        assert_eq!(report.chart_files.len(), 10);
        let mm = report.comparison(Method::Moments).unwrap();
        assert_eq!(mm.size, 200);
        assert_eq!(mm.bootstrap.var_shape, 0.04);
        assert!(report.sweep(Method::MaximumLikelihood).is_some());
    }

    #[test]
    fn test_report_single_method_skips_charts() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_dir: dir.path().to_path_buf(),
            compare: false,
            ..Config::default()
        };
        let report = report(&sample(), vec![sweep(Method::Moments)], &config).unwrap();
        assert!(report.comparisons.is_empty());
        assert!(report.chart_files.is_empty());
    }
}
