use thiserror::Error;

/// Errors raised when a canonical event would violate its invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event actor id is empty")]
    EmptyActor,
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Errors raised when building a time window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("Window start {start} is after window end {end}")]
    Inverted { start: u64, end: u64 },
}
