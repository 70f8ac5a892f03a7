//! Main `GammaStudy` entry point and builder.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{load_sweep, save_sweep};
use crate::report::{report, StudyReport};
use crate::result::SweepResult;
use crate::sample::ReferenceSample;
use crate::sweep::run_sweep;
use crate::types::Method;

/// Main entry point for a Gamma estimation study.
///
/// A study fits the shape and scale of a reference sample with the selected
/// methods, bootstraps each estimator across a schedule of resample sizes,
/// and compares the bootstrap covariance at the largest size with the
/// analytic prediction.
///
/// # Example
///
/// ```ignore
/// use gamma_bootstrap::{GammaStudy, ReferenceSample};
///
/// let sample = ReferenceSample::from_file("gamma-data.dat")?;
/// let report = GammaStudy::new()
///     .iterations(200)
///     .seed(42)
///     .run(&sample)?;
///
/// for comparison in &report.comparisons {
///     println!("{}", gamma_bootstrap::output::format_comparison(comparison));
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct GammaStudy {
    config: Config,
}

impl GammaStudy {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a small configuration for tests and smoke runs.
    ///
    /// Settings:
    /// - 20 bootstrap iterations (vs 100 default)
    /// - sizes 1,000 to 5,000 (vs 1,000 to 100,000 default)
    pub fn quick() -> Self {
        Self {
            config: Config {
                bootstrap_iterations: 20,
                min_size: 1_000,
                max_size: 5_000,
                ..Config::default()
            },
        }
    }

    /// Create from an existing configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set bootstrap replicates per size.
    pub fn iterations(mut self, n: usize) -> Self {
        self.config.bootstrap_iterations = n;
        self
    }

    /// Set the smallest and largest resample sizes.
    pub fn sizes(mut self, min: usize, max: usize) -> Self {
        self.config.min_size = min;
        self.config.max_size = max;
        self
    }

    /// Set a deterministic seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Select which methods to run.
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.config.methods = methods.into_iter().collect();
        self
    }

    /// Set the directory for persisted sweeps and chart series.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Skip the bootstrap and report from previously saved sweeps.
    pub fn skip_bootstrap(mut self) -> Self {
        self.config.run_bootstrap = false;
        self
    }

    /// Enable or disable the analytic comparison.
    pub fn compare(mut self, enabled: bool) -> Self {
        self.config.compare = enabled;
        self
    }

    /// Enable or disable chart output.
    pub fn charts(mut self, enabled: bool) -> Self {
        self.config.charts = enabled;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The configured seed, or a fresh one from OS entropy.
    pub fn resolve_seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(rand::random)
    }

    /// Run the bootstrap sweep for every selected method.
    ///
    /// Nothing is written to disk.
    pub fn compute(&self, sample: &ReferenceSample) -> Result<Vec<SweepResult>> {
        self.config.validate()?;
        let seed = self.resolve_seed();
        self.config
            .methods
            .iter()
            .map(|&method| run_sweep(sample, method, &self.config, seed))
            .collect()
    }

    /// Run the full study: compute (or load) sweeps, persist, then report.
    pub fn run(&self, sample: &ReferenceSample) -> Result<StudyReport> {
        self.config.validate()?;

        let sweeps = if self.config.run_bootstrap {
            let sweeps = self.compute(sample)?;
            for sweep in &sweeps {
                save_sweep(&self.config.sweep_path(sweep.method), sweep)?;
            }
            sweeps
        } else {
            tracing::info!(dir = %self.config.output_dir.display(), "loading saved sweeps");
            self.config
                .methods
                .iter()
                .map(|&method| self.load_checked(sample, method))
                .collect::<Result<Vec<_>>>()?
        };

        report(sample, sweeps, &self.config)
    }

    /// Load the saved sweep for `method` and check it belongs to `sample`.
    fn load_checked(&self, sample: &ReferenceSample, method: Method) -> Result<SweepResult> {
        let path = self.config.sweep_path(method);
        let sweep = load_sweep(&path)?;
        if sweep.method != method {
            return Err(Error::InvalidConfig(format!(
                "{} holds a {} sweep, expected {}",
                path.display(),
                sweep.method,
                method
            )));
        }
        if sweep.reference_len != sample.len() {
            return Err(Error::InvalidConfig(format!(
                "{} was computed on {} values, reference sample has {}",
                path.display(),
                sweep.reference_len,
                sample.len()
            )));
        }
        Ok(sweep)
    }
}
