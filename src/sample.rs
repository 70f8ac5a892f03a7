//! The immutable reference sample all estimation and resampling read from.

use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Reference samples smaller than this produce a warning on load.
const SMALL_SAMPLE_WARNING: usize = 100;

/// Observations loaded once at startup and shared read-only.
///
/// Cloning is cheap: clones share the same backing storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSample {
    values: Arc<[f64]>,
}

impl ReferenceSample {
    /// Wrap a vector of observations.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if `values` is empty or contains a
    /// non-finite value. Positivity is checked by the estimators that need it.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::NotEnoughSamples { got: 0, min: 1 });
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFiniteValue { index, value });
        }
        if values.len() < SMALL_SAMPLE_WARNING {
            tracing::warn!(
                len = values.len(),
                "reference sample is small; bootstrap statistics will be unreliable"
            );
        }
        Ok(Self {
            values: values.into(),
        })
    }

    /// Load a whitespace/line-delimited file of floating-point numbers.
    ///
    /// Blank lines and anything after a `#` are ignored.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let values = parse_values(&text, path)?;
        tracing::info!(path = %path.display(), len = values.len(), "loaded reference sample");
        Self::new(values)
    }

    /// The observations.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Deref for ReferenceSample {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for ReferenceSample {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

fn parse_values(text: &str, path: &Path) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("");
        for token in content.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| Error::Parse {
                path: path.to_path_buf(),
                line: line_no + 1,
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }
    Ok(values)
}
