//! Configuration for an estimation study.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::Method;

/// Configuration options for [`GammaStudy`](crate::GammaStudy).
///
/// Built once at entry and passed explicitly to every phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Bootstrap replicates per sample size (default: 100).
    pub bootstrap_iterations: usize,

    /// Smallest resample size in the sweep (default: 1,000).
    pub min_size: usize,

    /// Largest resample size in the sweep (default: 100,000).
    ///
    /// The comparison against the analytic covariance is made at this size.
    pub max_size: usize,

    /// Methods to run, in order (default: both).
    pub methods: Vec<Method>,

    /// Optional deterministic seed. When `None`, a seed is drawn from OS
    /// entropy and recorded in each [`SweepResult`](crate::SweepResult).
    pub seed: Option<u64>,

    /// Run the bootstrap sweep (default: true).
    ///
    /// When false, the report phase reads previously persisted sweeps from
    /// `output_dir` instead.
    pub run_bootstrap: bool,

    /// Compare bootstrap and analytic covariance (default: true).
    pub compare: bool,

    /// Write chart series (default: true). Needs both methods.
    pub charts: bool,

    /// Directory for persisted sweeps and chart series.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bootstrap_iterations: 100,
            min_size: 1_000,
            max_size: 100_000,
            methods: Method::ALL.to_vec(),
            seed: None,
            run_bootstrap: true,
            compare: true,
            charts: true,
            output_dir: PathBuf::from("bootstrap-results"),
        }
    }
}

impl Config {
    /// Reject settings no phase can run with.
    pub fn validate(&self) -> Result<()> {
        if self.bootstrap_iterations < 2 {
            return Err(Error::InvalidConfig(format!(
                "bootstrap_iterations must be at least 2, got {}",
                self.bootstrap_iterations
            )));
        }
        if self.min_size == 0 {
            return Err(Error::InvalidConfig("min_size must be at least 1".to_string()));
        }
        if self.min_size > self.max_size {
            return Err(Error::InvalidConfig(format!(
                "min_size ({}) exceeds max_size ({})",
                self.min_size, self.max_size
            )));
        }
        if self.methods.is_empty() {
            return Err(Error::InvalidConfig("no estimation method selected".to_string()));
        }
        Ok(())
    }

    /// Whether a method is selected.
    pub fn runs(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    /// Path of the persisted sweep for `method`.
    pub fn sweep_path(&self, method: Method) -> PathBuf {
        self.output_dir.join(format!("bootstrap_{}.json", method.name()))
    }
}
