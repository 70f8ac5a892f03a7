//! Bootstrap vs analytic covariance at the largest sample size.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::result::{Comparison, SweepResult};
use crate::sample::ReferenceSample;
use crate::statistics::{analytic_covariance, bootstrap_row};
use crate::sweep::{method_seed, size_seed};
use crate::types::Method;

/// Bootstrap `method` at `config.max_size` and set it against the analytic
/// covariance on the full sample.
///
/// The bootstrap uses the same per-size seed as [`run_sweep`](crate::sweep::run_sweep),
/// so for equal seeds the result matches the sweep's last row.
pub fn compare(
    sample: &ReferenceSample,
    method: Method,
    config: &Config,
    seed: u64,
) -> Result<Comparison> {
    config.validate()?;

    let truth = method.estimate(sample)?;
    let n = config.max_size;
    let estimator = |s: &[f64]| method.estimate(s);
    let row = bootstrap_row(
        sample,
        n,
        &estimator,
        truth,
        config.bootstrap_iterations,
        size_seed(method_seed(seed, method), n),
    )?;

    finish(sample, method, n, row.covariance())
}

/// Compare using the last row of an existing sweep instead of re-running the
/// bootstrap.
///
/// # Errors
///
/// `NotEnoughSamples` if the sweep has no rows, plus any analytic error.
pub fn compare_sweep(sample: &ReferenceSample, sweep: &SweepResult) -> Result<Comparison> {
    let (n, row) = sweep
        .last_row()
        .ok_or(Error::NotEnoughSamples { got: 0, min: 1 })?;
    finish(sample, sweep.method, n, row.covariance())
}

/// [`compare`] for a method given by name (`"MM"` or `"MLLH"`).
///
/// # Errors
///
/// `UnknownMethod` for any other name, before any computation runs.
pub fn compare_named(
    sample: &ReferenceSample,
    name: &str,
    config: &Config,
    seed: u64,
) -> Result<Comparison> {
    let method: Method = name.parse()?;
    compare(sample, method, config, seed)
}

fn finish(
    sample: &ReferenceSample,
    method: Method,
    size: usize,
    bootstrap: crate::types::CovarianceSummary,
) -> Result<Comparison> {
    let analytic = analytic_covariance(method, sample)?;
    let comparison = Comparison {
        method,
        size,
        bootstrap,
        analytic,
    };
    tracing::info!(
        method = method.name(),
        size,
        rel_err_k = comparison.relative_shape_error(),
        rel_err_theta = comparison.relative_scale_error(),
        "compared bootstrap and analytic covariance"
    );
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sample() -> ReferenceSample {
        ReferenceSample::new((1..=50).map(|i| 0.5 + (i % 7) as f64 * 0.8).collect()).unwrap()
    }

    #[test]
    fn test_unknown_method_fails_fast() {
        let err = compare_named(&sample(), "bayesian", &Config::default(), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownMethod);
    }

    #[test]
    fn test_compare_matches_sweep_last_row() {
        let config = Config {
            bootstrap_iterations: 5,
            min_size: 30,
            max_size: 40,
            ..Config::default()
        };
        let sample = sample();
        let sweep = crate::sweep::run_sweep(&sample, Method::Moments, &config, 21).unwrap();

        let direct = compare(&sample, Method::Moments, &config, 21).unwrap();
        let from_sweep = compare_sweep(&sample, &sweep).unwrap();
        assert_eq!(direct, from_sweep);
        assert_eq!(direct.size, 40);
        assert!(direct.analytic.var_shape > 0.0);
    }

    #[test]
    fn test_empty_sweep_is_rejected() {
        let sweep = SweepResult {
            method: Method::Moments,
            reference: crate::types::GammaParams::new(1.0, 1.0),
            reference_len: 50,
            iterations: 10,
            seed: 0,
            sizes: vec![],
            rows: vec![],
            runtime_secs: 0.0,
        };
        assert!(compare_sweep(&sample(), &sweep).is_err());
    }
}
