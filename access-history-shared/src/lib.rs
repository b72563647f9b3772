//! # Access History Shared
//! This crate defines the data structures shared across the access history
//! workspace: the raw order and access-log records handed over by the data
//! retrieval layer, and the canonical events, ranked actors and time windows
//! produced from them.
pub mod types;
