//! Terminal output formatting with colors.

use colored::Colorize;

use crate::result::{Comparison, SweepResult};

/// Width of the bootstrap column in the comparison table.
const VALUE_WIDTH: usize = 28;

/// Format a comparison as a three-line bootstrap vs analytic table.
pub fn format_comparison(comparison: &Comparison) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({}) at N = {}\n",
        comparison.method.description().bold(),
        comparison.method.name(),
        comparison.size
    ));

    let rows = [
        (
            "Variance k",
            comparison.bootstrap.var_shape,
            comparison.analytic.var_shape,
        ),
        (
            "Variance theta",
            comparison.bootstrap.var_scale,
            comparison.analytic.var_scale,
        ),
        (
            "Correlation",
            comparison.bootstrap.correlation,
            comparison.analytic.correlation,
        ),
    ];
    for (label, bootstrap, analytic) in rows {
        output.push_str(&format!(
            "  {:<16}---  {} {:<width$}{} {}\n",
            label,
            "bootstrap:".cyan(),
            bootstrap,
            "analytic:".cyan(),
            analytic,
            width = VALUE_WIDTH
        ));
    }

    output
}

/// Format a one-line summary of a finished sweep.
pub fn format_sweep_summary(sweep: &SweepResult) -> String {
    format!(
        "{} sweep: {} sizes ({}..={}), {} replicates each, reference k = {:.4}, theta = {:.4}, took {:.2}s",
        sweep.method.name().bold(),
        sweep.sizes.len(),
        sweep.sizes.first().copied().unwrap_or(0),
        sweep.sizes.last().copied().unwrap_or(0),
        sweep.iterations,
        sweep.reference.shape,
        sweep.reference.scale,
        sweep.runtime_secs
    )
}

/// Horizontal divider between method sections.
pub fn divider() -> String {
    "\u{2500}".repeat(90)
}
