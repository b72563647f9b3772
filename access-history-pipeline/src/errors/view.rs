//! Error types for the view module of the access history pipeline.
use thiserror::Error;

/// Represents errors that can occur while loading a history view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A newer load started while this one was resolving names. Its results
    /// must not be applied.
    #[error("Load {generation} superseded by load {current}")]
    Superseded { generation: u64, current: u64 },
}
