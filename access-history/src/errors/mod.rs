//! Error types for the access history binary.
//! Wraps the errors of the pipeline crates alongside configuration and
//! fixture loading failures.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("View error: {0}")]
    View(#[from] access_history_pipeline::ViewError),
    #[error("Directory error: {0}")]
    Directory(#[from] access_history_resolver::DirectoryError),
}

impl HistoryError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
