//! Error types for coordplot.

use std::num::ParseIntError;
use std::path::PathBuf;
use pyo3::PyErr;
use thiserror::Error;

/// Result type alias for coordplot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Possible errors when loading or plotting coordinates.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the input is not a pair of integers.
    #[error("line {line}: {text:?}: {source}")]
    Format {
        /// 1-based line number.
        line: usize,
        text: String,
        #[source]
        source: PointError,
    },

    /// The Python library "matplotlib" (or numpy) was not found.
    #[error("The matplotlib library has not been found.\n\
             Please install it.  See https://matplotlib.org/")]
    NoMatplotlib,

    /// The output path contains an element that is not a directory or
    /// does not exist.
    #[error("A path contains an element that is not a directory or \
             does not exist")]
    OutputNotFound,

    /// Permission denied to create the output file.
    #[error("Permission denied to access or create the filesystem path")]
    OutputPermission,

    /// Other Python errors.
    #[error("Python error: {0}")]
    Python(#[from] PyErr),
}

impl Error {
    pub(crate) fn file_access(path: impl Into<PathBuf>,
                              source: std::io::Error) -> Self {
        Self::FileAccess { path: path.into(), source }
    }
}

/// Why a single line failed to parse as a [`Point`](crate::Point).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointError {
    #[error("expected 2 comma-separated fields, found {0}")]
    FieldCount(usize),

    #[error("invalid integer {token:?}: {source}")]
    InvalidInteger {
        token: String,
        #[source]
        source: ParseIntError,
    },
}
