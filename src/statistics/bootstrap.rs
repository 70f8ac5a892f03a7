//! With-replacement resampling and the bootstrap engine.
//!
//! Every replicate gets its own RNG seeded from the base seed and the
//! replicate index, so a bootstrap call produces bit-identical output for the
//! same inputs whether replicates run serially or on the thread pool.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::result::BootstrapRow;
use crate::types::GammaParams;

use super::summary::{mean, pearson_correlation, population_variance};

/// Counter-based RNG seed generation using SplitMix64.
///
/// Stateless mixing of a base seed and a counter into a well-distributed
/// 64-bit seed. Adjacent counters give uncorrelated streams, which plain
/// `base + counter` does not.
#[inline]
pub fn counter_rng_seed(base_seed: u64, counter: u64) -> u64 {
    // https://xoshiro.di.unimi.it/splitmix64.c
    let mut z = base_seed.wrapping_add(counter.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Fill `out` with values drawn uniformly with replacement from `data`.
///
/// # Panics
///
/// Panics if `data` is empty and `out` is not.
pub fn resample_into<R: Rng>(data: &[f64], rng: &mut R, out: &mut [f64]) {
    if out.is_empty() {
        return;
    }
    assert!(!data.is_empty(), "cannot resample from an empty sample");

    let len = data.len();
    for slot in out.iter_mut() {
        *slot = data[rng.random_range(0..len)];
    }
}

/// Draw `n` values uniformly with replacement from `data`.
///
/// # Errors
///
/// `EmptyResample` if `n == 0`, `NotEnoughSamples` if `data` is empty.
pub fn resample<R: Rng>(data: &[f64], n: usize, rng: &mut R) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(Error::EmptyResample);
    }
    if data.is_empty() {
        return Err(Error::NotEnoughSamples { got: 0, min: 1 });
    }
    let mut out = vec![0.0; n];
    resample_into(data, rng, &mut out);
    Ok(out)
}

/// Apply `estimator` to `iterations` independent resamples of size `n`.
///
/// Estimates are returned in replicate order. If any replicate fails, the
/// error of the lowest-numbered failing replicate is returned; no replicate
/// is retried.
pub fn bootstrap_estimates<F>(
    data: &[f64],
    n: usize,
    estimator: &F,
    iterations: usize,
    seed: u64,
) -> Result<Vec<GammaParams>>
where
    F: Fn(&[f64]) -> Result<GammaParams> + Sync,
{
    if n == 0 {
        return Err(Error::EmptyResample);
    }
    if data.is_empty() {
        return Err(Error::NotEnoughSamples { got: 0, min: 1 });
    }

    #[cfg(feature = "parallel")]
    let estimates: Vec<Result<GammaParams>> = crate::thread_pool::install(|| {
        (0..iterations)
            .into_par_iter()
            .map_init(
                || vec![0.0; n],
                |buffer, i| {
                    let mut rng =
                        Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
                    resample_into(data, &mut rng, buffer);
                    estimator(buffer.as_slice())
                },
            )
            .collect()
    });

    #[cfg(not(feature = "parallel"))]
    let estimates: Vec<Result<GammaParams>> = {
        let mut buffer = vec![0.0; n];
        (0..iterations)
            .map(|i| {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
                resample_into(data, &mut rng, &mut buffer);
                estimator(buffer.as_slice())
            })
            .collect()
    };

    estimates.into_iter().collect()
}

/// Reduce replicate estimates to bias, variance and correlation.
///
/// Bias is relative to `truth`; variances are population variances (divide
/// by the replicate count).
pub fn summarize_estimates(estimates: &[GammaParams], truth: GammaParams) -> Result<BootstrapRow> {
    if estimates.len() < 2 {
        return Err(Error::NotEnoughSamples {
            got: estimates.len(),
            min: 2,
        });
    }

    let shapes: Vec<f64> = estimates.iter().map(|p| p.shape).collect();
    let scales: Vec<f64> = estimates.iter().map(|p| p.scale).collect();

    Ok(BootstrapRow {
        bias_shape: mean(&shapes) - truth.shape,
        bias_scale: mean(&scales) - truth.scale,
        var_shape: population_variance(&shapes),
        var_scale: population_variance(&scales),
        correlation: pearson_correlation(&shapes, &scales)?,
    })
}

/// Bootstrap one sample size: resample, estimate, summarize.
///
/// # Arguments
///
/// * `data` - The reference sample
/// * `n` - Size of each resample
/// * `estimator` - Maps a sample to Gamma parameters
/// * `truth` - The estimator's output on the full reference sample
/// * `iterations` - Number of replicates M (at least 2)
/// * `seed` - Base seed; replicate `i` uses `counter_rng_seed(seed, i)`
pub fn bootstrap_row<F>(
    data: &[f64],
    n: usize,
    estimator: &F,
    truth: GammaParams,
    iterations: usize,
    seed: u64,
) -> Result<BootstrapRow>
where
    F: Fn(&[f64]) -> Result<GammaParams> + Sync,
{
    if iterations < 2 {
        return Err(Error::InvalidConfig(format!(
            "bootstrap needs at least 2 iterations, got {iterations}"
        )));
    }
    let estimates = bootstrap_estimates(data, n, estimator, iterations, seed)?;
    summarize_estimates(&estimates, truth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::estimation::estimate_moments;
    use rand_distr::{Distribution, Gamma};

    fn gamma_data(n: usize, seed: u64) -> Vec<f64> {
        let dist = Gamma::new(2.0, 3.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        (0..n).map(|_| dist.sample(&mut rng)).collect()
    }

    #[test]
    fn test_counter_seed_spreads_adjacent_counters() {
        let a = counter_rng_seed(42, 0);
        let b = counter_rng_seed(42, 1);
        assert_ne!(a, b);
        assert!((a ^ b).count_ones() > 10);
        assert_eq!(counter_rng_seed(42, 7), counter_rng_seed(42, 7));
    }

    #[test]
    fn test_resample_preserves_length_and_membership() {
        let data: Vec<f64> = (0..100).map(|x| x as f64).collect();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        for n in [1, 7, 100, 1_000] {
            let resampled = resample(&data, n, &mut rng).unwrap();
            assert_eq!(resampled.len(), n);
            for val in &resampled {
                assert!(data.contains(val));
            }
        }
    }

    #[test]
    fn test_resample_draws_with_replacement() {
        let data = [1.0, 2.0, 3.0];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let resampled = resample(&data, 300, &mut rng).unwrap();
        // Larger than the source, so repeats are unavoidable; all values appear
        for v in data {
            assert!(resampled.contains(&v));
        }
    }

    #[test]
    fn test_resample_rejects_zero_and_empty() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        assert!(matches!(resample(&[1.0], 0, &mut rng), Err(Error::EmptyResample)));
        assert_eq!(
            resample(&[], 5, &mut rng).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_bootstrap_row_is_deterministic() {
        let data = gamma_data(5_000, 3);
        let truth = estimate_moments(&data).unwrap();

        let a = bootstrap_row(&data, 500, &estimate_moments, truth, 50, 99).unwrap();
        let b = bootstrap_row(&data, 500, &estimate_moments, truth, 50, 99).unwrap();
        assert_eq!(a, b);

        let c = bootstrap_row(&data, 500, &estimate_moments, truth, 50, 100).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_summarize_known_values() {
        let estimates = [
            GammaParams::new(1.0, 4.0),
            GammaParams::new(2.0, 3.0),
            GammaParams::new(3.0, 2.0),
        ];
        let row = summarize_estimates(&estimates, GammaParams::new(1.5, 3.5)).unwrap();
        assert!((row.bias_shape - 0.5).abs() < 1e-12);
        assert!((row.bias_scale + 0.5).abs() < 1e-12);
        assert!((row.var_shape - 2.0 / 3.0).abs() < 1e-12);
        assert!((row.var_scale - 2.0 / 3.0).abs() < 1e-12);
        assert!((row.correlation + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_estimator_failure_propagates() {
        // Resamples of size 1 always fail the moment estimator
        let data = gamma_data(100, 4);
        let truth = estimate_moments(&data).unwrap();
        let err = bootstrap_row(&data, 1, &estimate_moments, truth, 10, 1).unwrap_err();
        assert!(matches!(err, Error::NotEnoughSamples { got: 1, min: 2 }));
    }

    #[test]
    fn test_iterations_below_two_rejected() {
        let data = gamma_data(100, 4);
        let truth = estimate_moments(&data).unwrap();
        let err = bootstrap_row(&data, 50, &estimate_moments, truth, 1, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_variance_shrinks_with_size() {
        let data = gamma_data(20_000, 8);
        let truth = estimate_moments(&data).unwrap();
        let small = bootstrap_row(&data, 200, &estimate_moments, truth, 200, 5).unwrap();
        let large = bootstrap_row(&data, 5_000, &estimate_moments, truth, 200, 5).unwrap();
        assert!(large.var_shape < small.var_shape);
        assert!(large.var_scale < small.var_scale);
    }
}
