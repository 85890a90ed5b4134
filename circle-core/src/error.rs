//! Error types for the circles ecosystem.
//!
//! Schedule parsing and occurrence generation never fail: bad schedule text
//! yields fewer occurrences. These errors only cover config, roster files
//! and exports.

use thiserror::Error;

/// Errors that can occur in circles operations.
#[derive(Error, Debug)]
pub enum CircleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Roster error: {0}")]
    Roster(String),

    #[error("Leader not found: {0}")]
    LeaderNotFound(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for circles operations.
pub type CircleResult<T> = Result<T, CircleError>;
