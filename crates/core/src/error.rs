use std::io;

/// Errors that can occur during taskbridge operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("buildPath: [ {path} ] cannot be resolved: {reason}")]
    Resolution { path: String, reason: String },

    #[error("Builder failure: {0}")]
    Driver(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Scheduler has not been installed")]
    NotInitialized,

    #[error("No builder home configured and no bundled builder found")]
    MissingBuilderHome,

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    pub fn resolution(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Resolution {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for taskbridge operations
pub type Result<T> = std::result::Result<T, Error>;
