//! Bootstrap sweep over a non-uniform schedule of sample sizes.

use crate::config::Config;
use crate::error::Result;
use crate::result::{BootstrapRow, SweepResult};
use crate::sample::ReferenceSample;
use crate::statistics::{bootstrap_row, counter_rng_seed};
use crate::timer::timed;
use crate::types::{GammaParams, Method};

/// `(from, to, step)` segments of the schedule.
///
/// Each segment is clipped to `[min_size, max_size)`; `max_size` itself is
/// emitted once at the end.
pub const SEGMENTS: [(usize, usize, usize); 4] = [
    (0, 1_000, 100),
    (1_000, 10_000, 250),
    (10_000, 50_000, 500),
    (50_000, usize::MAX, 1_000),
];

/// Lazy, restartable iterator over sweep sample sizes.
///
/// Starts at `min_size`, ends exactly at `max_size`, strictly increasing.
/// Clone it to iterate again from the start.
#[derive(Debug, Clone)]
pub struct SampleSizes {
    min_size: usize,
    max_size: usize,
    segment: usize,
    next: usize,
    finished: bool,
}

impl SampleSizes {
    /// Schedule from `min_size` to `max_size` inclusive.
    pub fn new(min_size: usize, max_size: usize) -> Self {
        let mut sizes = Self {
            min_size,
            max_size,
            segment: 0,
            next: 0,
            finished: false,
        };
        sizes.enter_segment(0);
        sizes
    }

    /// Schedule for a configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.min_size, config.max_size)
    }

    fn enter_segment(&mut self, segment: usize) {
        self.segment = segment;
        if let Some(&(from, _, _)) = SEGMENTS.get(segment) {
            self.next = from.max(self.min_size);
        }
    }
}

impl Iterator for SampleSizes {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.finished {
            return None;
        }
        while let Some(&(_, to, step)) = SEGMENTS.get(self.segment) {
            if self.next < to.min(self.max_size) {
                let n = self.next;
                self.next += step;
                return Some(n);
            }
            self.enter_segment(self.segment + 1);
        }
        self.finished = true;
        Some(self.max_size)
    }
}

/// Seed for the bootstrap at size `n`.
///
/// Keyed on the size rather than its position so the same size gives the
/// same row under any schedule.
pub fn size_seed(base_seed: u64, n: usize) -> u64 {
    counter_rng_seed(base_seed, n as u64)
}

/// Base seed for one method's sweep.
///
/// Each method draws its own resamples from the study seed.
pub fn method_seed(base_seed: u64, method: Method) -> u64 {
    let tag = match method {
        Method::Moments => 1,
        Method::MaximumLikelihood => 2,
    };
    counter_rng_seed(base_seed, tag)
}

/// Bootstrap `estimator` at every size in `sizes`.
///
/// Rows are returned in schedule order. The first failing size aborts the
/// sweep.
pub fn sweep_rows<F>(
    data: &[f64],
    estimator: &F,
    truth: GammaParams,
    sizes: &[usize],
    iterations: usize,
    seed: u64,
) -> Result<Vec<BootstrapRow>>
where
    F: Fn(&[f64]) -> Result<GammaParams> + Sync,
{
    sizes
        .iter()
        .map(|&n| {
            let row = bootstrap_row(data, n, estimator, truth, iterations, size_seed(seed, n))?;
            tracing::debug!(
                n,
                bias_k = row.bias_shape,
                bias_theta = row.bias_scale,
                var_k = row.var_shape,
                var_theta = row.var_scale,
                corr = row.correlation,
                "bootstrap row"
            );
            Ok(row)
        })
        .collect()
}

/// Run the full sweep for `method` and time it.
pub fn run_sweep(
    sample: &ReferenceSample,
    method: Method,
    config: &Config,
    seed: u64,
) -> Result<SweepResult> {
    config.validate()?;

    let reference = method.estimate(sample)?;
    let sizes: Vec<usize> = SampleSizes::from_config(config).collect();
    tracing::info!(
        method = method.name(),
        sizes = sizes.len(),
        iterations = config.bootstrap_iterations,
        seed,
        "starting bootstrap sweep"
    );

    let estimator = |s: &[f64]| method.estimate(s);
    let timed_rows = timed(|| {
        sweep_rows(
            sample,
            &estimator,
            reference,
            &sizes,
            config.bootstrap_iterations,
            method_seed(seed, method),
        )
    });
    let elapsed = timed_rows.elapsed;
    let rows = timed_rows.value?;

    let mut result = SweepResult {
        method,
        reference,
        reference_len: sample.len(),
        iterations: config.bootstrap_iterations,
        seed,
        sizes,
        rows,
        runtime_secs: 0.0,
    };
    result.set_runtime(elapsed);
    tracing::info!(
        method = method.name(),
        runtime_secs = result.runtime_secs,
        "finished bootstrap sweep"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_strictly_increasing(sizes: &[usize]) {
        for w in sizes.windows(2) {
            assert!(w[0] < w[1], "{} !< {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_default_schedule() {
        let sizes: Vec<usize> = SampleSizes::new(1_000, 100_000).collect();
        assert_eq!(sizes.first(), Some(&1_000));
        assert_eq!(sizes.last(), Some(&100_000));
        assert_strictly_increasing(&sizes);
        // 36 + 80 + 50 steps, then the final maximum
        assert_eq!(sizes.len(), 36 + 80 + 50 + 1);
        assert!(sizes.contains(&9_750));
        assert!(sizes.contains(&49_500));
        assert!(sizes.contains(&99_000));
    }

    #[test]
    fn test_first_segment_is_empty_at_default_start() {
        // The hundreds segment ends at 1,000, so starting there skips it
        let sizes: Vec<usize> = SampleSizes::new(1_000, 2_000).collect();
        assert_eq!(sizes, vec![1_000, 1_250, 1_500, 1_750, 2_000]);
    }

    #[test]
    fn test_first_segment_steps_by_hundred_below_thousand() {
        let sizes: Vec<usize> = SampleSizes::new(100, 1_500).collect();
        assert_eq!(
            sizes,
            vec![100, 200, 300, 400, 500, 600, 700, 800, 900, 1_000, 1_250, 1_500]
        );
    }

    #[test]
    fn test_max_inside_segment_not_on_grid() {
        let sizes: Vec<usize> = SampleSizes::new(9_000, 10_600).collect();
        assert_eq!(
            sizes,
            vec![9_000, 9_250, 9_500, 9_750, 10_000, 10_500, 10_600]
        );
    }

    #[test]
    fn test_min_equals_max() {
        let sizes: Vec<usize> = SampleSizes::new(500, 500).collect();
        assert_eq!(sizes, vec![500]);
    }

    #[test]
    fn test_restartable() {
        let schedule = SampleSizes::new(100, 20_000);
        let first: Vec<usize> = schedule.clone().collect();
        let second: Vec<usize> = schedule.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_size_seed_depends_on_size_only() {
        assert_eq!(size_seed(7, 1_000), size_seed(7, 1_000));
        assert_ne!(size_seed(7, 1_000), size_seed(7, 1_250));
    }

    #[test]
    fn test_methods_get_separate_resamples() {
        assert_ne!(
            method_seed(7, Method::Moments),
            method_seed(7, Method::MaximumLikelihood)
        );
        assert_eq!(method_seed(7, Method::Moments), method_seed(7, Method::Moments));

        let data: Vec<f64> = (1..=500).map(|i| i as f64).collect();
        let resample_mean = |s: &[f64]| -> Result<GammaParams> {
            Ok(GammaParams::new(crate::statistics::mean(s), 1.0))
        };
        let draw = |method| {
            crate::statistics::bootstrap_estimates(
                &data,
                100,
                &resample_mean,
                5,
                size_seed(method_seed(7, method), 100),
            )
            .unwrap()
        };
        assert_ne!(draw(Method::Moments), draw(Method::MaximumLikelihood));
    }
}
