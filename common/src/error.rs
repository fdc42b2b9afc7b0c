//! Error module
//!

use thiserror::Error;

/// Configuration-related errors, raised before any network or database I/O.
///
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Bad file version {0}, need {1}")]
    BadFileVersion(usize, usize),
    #[error("Missing environment variable {0}")]
    MissingVariable(String),
    #[error("Unknown config file {0}")]
    UnknownFile(String),
}
