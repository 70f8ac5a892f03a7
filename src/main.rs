//! Command-line driver for a Gamma estimation study.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gamma_bootstrap::logging::init_tracing;
use gamma_bootstrap::output::{divider, format_comparison, format_sweep_summary, to_json_pretty};
use gamma_bootstrap::{Config, GammaStudy, Method, ReferenceSample};

/// Gamma shape/scale estimation with bootstrap and analytic variances
#[derive(Parser, Debug)]
#[command(name = "gamma-bootstrap")]
#[command(author, version, about)]
struct Cli {
    /// Reference sample: whitespace-separated floats, `#` starts a comment
    #[arg(long, default_value = "gamma-data.dat")]
    samples: PathBuf,

    /// Bootstrap replicates per sample size
    #[arg(long, default_value = "100")]
    iterations: usize,

    /// Smallest resample size in the sweep
    #[arg(long, default_value = "1000")]
    start: usize,

    /// Largest resample size; the analytic comparison is made here
    #[arg(long, default_value = "100000")]
    max: usize,

    /// Seed for reproducible runs (drawn from OS entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Estimation method to run; repeat for several (default: both)
    #[arg(long = "method", value_name = "METHOD")]
    methods: Vec<Method>,

    /// Report from results saved by an earlier run instead of bootstrapping
    #[arg(long)]
    skip_bootstrap: bool,

    /// Skip the bootstrap vs analytic comparison
    #[arg(long)]
    no_compare: bool,

    /// Skip writing charts
    #[arg(long)]
    no_charts: bool,

    /// Directory for saved sweeps and charts
    #[arg(long, default_value = "bootstrap-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Human)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Human,
    Json,
}

impl Cli {
    fn config(&self) -> Config {
        let methods = if self.methods.is_empty() {
            Method::ALL.to_vec()
        } else {
            self.methods.clone()
        };
        Config {
            bootstrap_iterations: self.iterations,
            min_size: self.start,
            max_size: self.max,
            methods,
            seed: self.seed,
            run_bootstrap: !self.skip_bootstrap,
            compare: !self.no_compare,
            charts: !self.no_charts,
            output_dir: self.output_dir.clone(),
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    config.validate().context("invalid arguments")?;

    let sample = ReferenceSample::from_file(&cli.samples)
        .with_context(|| format!("failed to load reference sample {}", cli.samples.display()))?;

    for &method in &config.methods {
        let params = method
            .estimate(&sample)
            .with_context(|| format!("{method} estimate on the full sample failed"))?;
        tracing::info!(
            method = method.name(),
            k = params.shape,
            theta = params.scale,
            "full-sample estimate"
        );
    }

    let report = GammaStudy::with_config(config)
        .run(&sample)
        .context("study failed")?;

    match cli.format {
        Format::Json => {
            let json = to_json_pretty(&report).context("failed to serialize report")?;
            println!("{json}");
        }
        Format::Human => {
            for sweep in &report.sweeps {
                println!("{}", format_sweep_summary(sweep));
            }
            for comparison in &report.comparisons {
                println!("{}", divider());
                print!("{}", format_comparison(comparison));
            }
            if !report.chart_files.is_empty() {
                println!("{}", divider());
                for path in &report.chart_files {
                    println!("chart: {}", path.display());
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
