//! Configuration module for the access history binary.
//! Reads settings from the environment and wires up the view.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{LogFormat, Settings};
