//! Error types for estimation, covariance and bootstrap operations.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of an [`Error`].
///
/// Callers that want to react differently to bad input and to numerical
/// trouble (for example, retrying a bootstrap replicate with fresh randomness)
/// should match on this rather than on the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input sample or configuration is not admissible.
    InvalidInput,
    /// The likelihood root finder did not converge.
    Convergence,
    /// The Fisher information matrix could not be inverted.
    SingularMatrix,
    /// An estimation method name was not recognised.
    UnknownMethod,
    /// Reading or writing a file failed.
    Io,
    /// Parsing a sample file or (de)serializing results failed.
    Format,
}

/// Errors produced by the estimation pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer values than the operation needs.
    #[error("not enough samples: got {got}, need at least {min}")]
    NotEnoughSamples {
        /// Number of values supplied.
        got: usize,
        /// Minimum number required.
        min: usize,
    },

    /// A sample value is NaN or infinite.
    #[error("sample value at index {index} is not finite ({value})")]
    NonFiniteValue {
        /// Position in the sample.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// The likelihood needs every value to be strictly positive.
    #[error("sample value at index {index} must be strictly positive, got {value}")]
    NonPositiveValue {
        /// Position in the sample.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// All values are equal, so no spread can be estimated.
    #[error("sample has no spread (variance {variance:e})")]
    ZeroVariance {
        /// Spread measure that was not positive.
        variance: f64,
    },

    /// The moment estimator needs a positive mean.
    #[error("sample mean must be strictly positive, got {mean}")]
    NonPositiveMean {
        /// The sample mean.
        mean: f64,
    },

    /// A resample of size zero was requested.
    #[error("resample size must be at least 1")]
    EmptyResample,

    /// A configuration or result invariant does not hold.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Paired series differ in length.
    #[error("series have different lengths ({left} vs {right})")]
    LengthMismatch {
        /// Length of the first series.
        left: usize,
        /// Length of the second series.
        right: usize,
    },

    /// Bracket expansion never found a sign change.
    #[error("could not bracket a root of the likelihood equation after {expansions} expansions")]
    NoBracket {
        /// Expansions attempted.
        expansions: usize,
    },

    /// Brent iteration hit its cap.
    #[error("root finder did not converge after {iterations} iterations (residual {residual:e})")]
    NoConvergence {
        /// Iterations used.
        iterations: usize,
        /// `|f|` at the last iterate.
        residual: f64,
    },

    /// Fisher information could not be inverted.
    #[error("Fisher information matrix is singular (determinant {determinant:e})")]
    SingularMatrix {
        /// Determinant of the information matrix.
        determinant: f64,
    },

    /// Method name other than `MM` or `MLLH`.
    #[error("unknown estimation method {0:?} (expected \"MM\" or \"MLLH\")")]
    UnknownMethod(String),

    /// A token in a sample file is not a number.
    #[error("failed to parse {token:?} on line {line} of {path}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// The unparseable token.
        token: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {path}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Drawing a chart failed.
    #[error("failed to render chart {path}: {message}")]
    Render {
        /// Chart file being written.
        path: PathBuf,
        /// Message from the drawing backend.
        message: String,
    },

    /// JSON (de)serialization failed.
    #[error("serialization error")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotEnoughSamples { .. }
            | Error::NonFiniteValue { .. }
            | Error::NonPositiveValue { .. }
            | Error::ZeroVariance { .. }
            | Error::NonPositiveMean { .. }
            | Error::EmptyResample
            | Error::InvalidConfig(_)
            | Error::LengthMismatch { .. } => ErrorKind::InvalidInput,
            Error::NoBracket { .. } | Error::NoConvergence { .. } => ErrorKind::Convergence,
            Error::SingularMatrix { .. } => ErrorKind::SingularMatrix,
            Error::UnknownMethod(_) => ErrorKind::UnknownMethod,
            Error::Io { .. } | Error::Render { .. } => ErrorKind::Io,
            Error::Parse { .. } | Error::Serialization(_) => ErrorKind::Format,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
