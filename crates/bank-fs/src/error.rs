//! Error types for the storage layer

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while working with the storage root
#[derive(Debug, Error)]
pub enum Error {
    /// A project or file name that would escape the storage root
    #[error("invalid name segment: {name}")]
    InvalidSegment { name: String },

    /// IO error with the path it occurred on
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Attach a path to an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
