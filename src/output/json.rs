//! JSON serialization and persistence of sweep results.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::result::SweepResult;

/// Serialize a result to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for the
/// crate's result types).
pub fn to_json<T: Serialize>(result: &T) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string(result)
}

/// Serialize a result to a pretty-printed JSON string.
pub fn to_json_pretty<T: Serialize>(result: &T) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Write a sweep to `path`, creating parent directories.
pub fn save_sweep(path: &Path, sweep: &SweepResult) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let json = to_json_pretty(sweep)?;
    fs::write(path, json).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), "saved sweep");
    Ok(())
}

/// Read a sweep written by [`save_sweep`] and check its invariants.
pub fn load_sweep(path: &Path) -> Result<SweepResult> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let sweep: SweepResult = serde_json::from_str(&text)?;
    sweep.validate()?;
    Ok(sweep)
}
