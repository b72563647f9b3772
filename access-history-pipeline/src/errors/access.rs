//! Error types for the access registry.
use thiserror::Error;

/// Represents errors raised by grant and revoke operations.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Unknown practitioner: {0}")]
    UnknownPractitioner(String),
    #[error("Access already granted to {0}")]
    AlreadyGranted(String),
    #[error("Access was not granted to {0}")]
    NotGranted(String),
    #[error("Invalid roster: {0}")]
    InvalidRoster(#[from] serde_json::Error),
}
