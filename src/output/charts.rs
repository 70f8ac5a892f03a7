//! Charts of the five sweep statistics.
//!
//! Each statistic is drawn as an SVG scatter chart overlaying both methods
//! against sample size (MM in red, MLLH in blue). The same series is also
//! written as CSV with a column per method.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::result::{Statistic, SweepResult};
use crate::types::Method;

/// Pixel size of each rendered chart.
const CHART_SIZE: (u32, u32) = (900, 600);

/// Marker radius in pixels.
const MARKER_RADIUS: i32 = 3;

/// One statistic plotted against sample size for both methods.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// The statistic on the y axis.
    pub statistic: Statistic,
    /// Sample sizes on the x axis.
    pub sizes: Vec<usize>,
    /// Method-of-moments values, aligned with `sizes`.
    pub moments: Vec<f64>,
    /// Maximum-likelihood values, aligned with `sizes`.
    pub likelihood: Vec<f64>,
}

impl ChartSeries {
    /// Render as CSV with header `n,MM,MLLH`.
    pub fn to_csv(&self) -> String {
        let mut out = format!(
            "n,{},{}\n",
            Method::Moments.name(),
            Method::MaximumLikelihood.name()
        );
        for ((n, mm), ml) in self.sizes.iter().zip(&self.moments).zip(&self.likelihood) {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{n},{mm},{ml}");
        }
        out
    }

    /// CSV file name for this series, e.g. `bias_k.csv`.
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.statistic.file_stem())
    }

    /// Chart file name for this series, e.g. `bias_k.svg`.
    pub fn svg_file_name(&self) -> String {
        format!("{}.svg", self.statistic.file_stem())
    }

    /// Finite `(n, value)` points for one method.
    fn points(&self, method: Method) -> Vec<(f64, f64)> {
        let values = match method {
            Method::Moments => &self.moments,
            Method::MaximumLikelihood => &self.likelihood,
        };
        self.sizes
            .iter()
            .zip(values)
            .filter(|(_, v)| v.is_finite())
            .map(|(&n, &v)| (n as f64, v))
            .collect()
    }
}

/// Build all five series from a moments sweep and a likelihood sweep.
///
/// # Errors
///
/// `InvalidConfig` if the sweeps are for the wrong methods or were run on
/// different size schedules.
pub fn build_charts(moments: &SweepResult, likelihood: &SweepResult) -> Result<Vec<ChartSeries>> {
    if moments.method != Method::Moments || likelihood.method != Method::MaximumLikelihood {
        return Err(Error::InvalidConfig(format!(
            "charts need an MM and an MLLH sweep, got {} and {}",
            moments.method, likelihood.method
        )));
    }
    if moments.sizes != likelihood.sizes {
        return Err(Error::InvalidConfig(
            "sweeps were run on different size schedules".to_string(),
        ));
    }
    moments.validate()?;
    likelihood.validate()?;

    Ok(Statistic::ALL
        .iter()
        .map(|&statistic| ChartSeries {
            statistic,
            sizes: moments.sizes.clone(),
            moments: moments.series(statistic),
            likelihood: likelihood.series(statistic),
        })
        .collect())
}

/// Render each series as an SVG chart and a CSV file in `dir`.
///
/// Returns the paths written, chart then CSV for each series.
pub fn write_charts(dir: &Path, charts: &[ChartSeries]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let mut written = Vec::with_capacity(charts.len() * 2);
    for chart in charts {
        let svg = dir.join(chart.svg_file_name());
        render_chart(chart, &svg).map_err(|e| Error::Render {
            path: svg.clone(),
            message: e.to_string(),
        })?;

        let csv = dir.join(chart.csv_file_name());
        fs::write(&csv, chart.to_csv()).map_err(|e| Error::io(&csv, e))?;

        tracing::debug!(path = %svg.display(), title = chart.statistic.title(), "wrote chart");
        written.push(svg);
        written.push(csv);
    }
    Ok(written)
}

fn render_chart(
    series: &ChartSeries,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let overlays = [(Method::Moments, RED), (Method::MaximumLikelihood, BLUE)];
    let points: Vec<Vec<(f64, f64)>> = overlays
        .iter()
        .map(|&(method, _)| series.points(method))
        .collect();
    let (x_lo, x_hi) = padded_range(points.iter().flatten().map(|p| p.0));
    let (y_lo, y_hi) = padded_range(points.iter().flatten().map(|p| p.1));

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(series.statistic.title(), ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("N")
        .y_desc(series.statistic.title())
        .draw()?;

    for ((method, color), pts) in overlays.into_iter().zip(points) {
        chart
            .draw_series(
                pts.into_iter()
                    .map(move |p| Circle::new(p, MARKER_RADIUS, color.filled())),
            )?
            .label(method.name())
            .legend(move |(x, y)| Circle::new((x + 10, y), MARKER_RADIUS, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Axis range covering `values` with a 5% margin; never empty.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        lo.abs().max(1.0) * 0.05
    };
    (lo - pad, hi + pad)
}
