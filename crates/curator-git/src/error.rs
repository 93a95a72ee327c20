//! Error types for curator-git

use std::path::PathBuf;

/// Result type for curator-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in curator-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("git executable not found on PATH")]
    GitUnavailable,

    #[error("Repository at {path} has uncommitted changes")]
    DirtyRepo { path: PathBuf },

    #[error("Cannot fast-forward: {message}")]
    FastForward { message: String },

    #[error("Push rejected by remote: {message}")]
    PushRejected { message: String },

    #[error("git {command} failed with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] curator_manifest::Error),

    #[error(transparent)]
    Fs(#[from] curator_fs::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
