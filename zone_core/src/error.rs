//! Error types for the zone_core library.

use chrono::NaiveDate;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for zone_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Threshold input was non-positive, non-finite or unparseable
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Unknown zone id or zone position outside [0.0, 1.0]
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// A workout block carries neither a zone nor an explicit target
    #[error("Block {index} has no zone or explicit target")]
    MissingTarget { index: usize },

    /// Inbound workout document is malformed
    #[error("Schema error: {0}")]
    Schema(String),

    /// Temporal safeguard veto
    #[error("{action} is not allowed for {date}: date is before today ({today})")]
    PastDate {
        action: &'static str,
        date: NaiveDate,
        today: NaiveDate,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
