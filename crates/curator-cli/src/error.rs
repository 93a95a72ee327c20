//! Error types for curator-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from curator-git
    #[error(transparent)]
    Git(#[from] curator_git::Error),

    /// Error from curator-manifest
    #[error(transparent)]
    Manifest(#[from] curator_manifest::Error),
}
