//! Error types for the application layer

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for use-case operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while executing a use case
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the storage layer
    #[error("storage error: {0}")]
    Storage(#[from] bank_fs::Error),

    /// Creating a file that already exists
    #[error("file {file} already exists in project {project}")]
    FileAlreadyExists { project: String, file: String },

    /// Updating or reading a file that does not exist
    #[error("file {file} not found in project {project}")]
    FileNotFound { project: String, file: String },

    /// IO error outside the storage root (local retrieve target)
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure was caused by the caller's input rather than the
    /// server. Controllers use this to pick the 4xx/5xx status class.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Error::FileAlreadyExists { .. }
                | Error::FileNotFound { .. }
                | Error::Storage(bank_fs::Error::InvalidSegment { .. })
        )
    }
}
