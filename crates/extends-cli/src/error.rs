//! Error types for extends-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Resolution failed
    #[error(transparent)]
    Core(#[from] extends_core::Error),

    /// The GitLab fetcher could not be built
    #[error("failed to create GitLab fetcher: {0}")]
    Fetcher(#[from] extends_core::FetchError),

    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resolved config could not be written out
    #[error("failed to write resolved config: {0}")]
    Output(#[from] serde_json::Error),

    /// Logging could not be initialised
    #[error("failed to initialise logging: {message}")]
    Logging { message: String },
}

impl CliError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
