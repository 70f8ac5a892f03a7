//! Statistical machinery for the estimation study.
//!
//! - Moment helpers and Pearson correlation
//! - With-replacement resampling and the bootstrap engine
//! - Analytic covariance of both estimators (delta method, inverse Fisher)

mod bootstrap;
mod covariance;
mod summary;

pub use bootstrap::{
    bootstrap_estimates, bootstrap_row, counter_rng_seed, resample, resample_into,
    summarize_estimates,
};
pub use covariance::{
    analytic_covariance, fisher_information, likelihood_covariance, moment_covariance,
    moments_covariance,
};
pub use summary::{mean, mean_of_squares, pearson_correlation, population_variance};
