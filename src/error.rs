//! Error types for h5pad.
//!
//! Container-level failures use [`PadError`] and propagate to the caller.
//! Failures while decoding a single cell or attribute use [`DecodeError`]
//! and are recovered locally by the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for h5pad operations.
pub type Result<T> = std::result::Result<T, PadError>;

/// Errors that can occur while opening or browsing a container.
#[derive(Debug, Error)]
pub enum PadError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}: {message}")]
    FileOpen {
        /// Path of the file.
        path: PathBuf,
        /// Reason reported by the backend.
        message: String,
    },

    /// Error reported by the container backend.
    #[error("Container error: {0}")]
    Container(String),

    /// Object not found in the container.
    #[error("Object not found: {path}")]
    NotFound {
        /// Requested path.
        path: String,
    },

    /// Object exists but is not a dataset.
    #[error("Not a dataset: {path}")]
    NotADataset {
        /// Requested path.
        path: String,
    },

    /// Feature not supported by the backend.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl PadError {
    /// Create a FileOpen error.
    pub fn file_open(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FileOpen {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a NotFound error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a NotADataset error.
    pub fn not_a_dataset(path: impl Into<String>) -> Self {
        Self::NotADataset { path: path.into() }
    }

    /// Create an Unsupported error.
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported(what.into())
    }
}

impl From<netcdf::Error> for PadError {
    fn from(err: netcdf::Error) -> Self {
        Self::Container(err.to_string())
    }
}

/// Failure while decoding one element into a display value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes than the element type declares.
    #[error("element needs {needed} bytes, only {available} available")]
    Truncated {
        /// Declared element size.
        needed: usize,
        /// Bytes actually present.
        available: usize,
    },

    /// Reference could not be resolved.
    #[error("unresolved reference: {0}")]
    Reference(String),
}
