//! Error types for the fitcoach engine
//!
//! The scoring formulas never fail; invalid numeric outcomes are replaced with
//! defaults. Errors only surface at the boundaries: JSON snapshots, configuration
//! tables and categorical values parsed from strings.

use thiserror::Error;

/// Errors that can occur at the engine boundary
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown sex: {0}")]
    UnknownSex(String),

    #[error("Unknown activity level: {0}")]
    UnknownActivityLevel(String),

    #[error("Unknown goal category: {0}")]
    UnknownGoalCategory(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
