use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Settings could not be loaded or saved
    #[error("Config error: {0}")]
    Config(#[from] dextrack_lib::SettingsError),

    /// The upload was refused
    #[error("{0}")]
    Upload(#[from] dextrack_import::UploadError),

    /// The file exceeds the configured upload limit
    #[error("{path} is {size} bytes, over the {limit} byte upload limit")]
    TooLarge { path: String, size: u64, limit: u64 },

    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
