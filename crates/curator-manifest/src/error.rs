//! Error types for curator-manifest

use std::path::PathBuf;

/// Result type for curator-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in curator-manifest operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A manifest file exists but cannot be parsed. Recoverable at the
    /// engine boundary: manifests are regenerable from their folder.
    #[error("Failed to parse manifest at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Fs(#[from] curator_fs::Error),
}

impl Error {
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
