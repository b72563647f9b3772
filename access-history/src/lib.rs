//! # Access History
//!
//! Builds the access history report of one data asset from a transaction
//! history file.
//!
//! ## Modules
//!
//! - [`config`]: Environment settings and dependency initialization
//! - [`report`]: Runs a history load and collects the rendered artifacts
//! - [`errors`]: Error types for the binary

pub mod config;
pub mod errors;
pub mod report;

pub use config::{Dependencies, LogFormat, Settings};
pub use errors::HistoryError;
pub use report::{build_report, Report};
