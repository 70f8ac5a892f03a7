//! Output formatting and persistence.

mod charts;
mod json;
mod terminal;

pub use charts::{build_charts, write_charts, ChartSeries};
pub use json::{load_sweep, save_sweep, to_json, to_json_pretty};
pub use terminal::{divider, format_comparison, format_sweep_summary};
