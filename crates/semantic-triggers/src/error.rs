//! Error types for trigger preparation and configuration loading

use thiserror::Error;

/// Result type for trigger operations
pub type TriggerResult<T> = Result<T, TriggerError>;

/// Errors that can occur while building trigger tables or loading configuration
///
/// Query-time operations never fail; every variant here is a setup error.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// A `re!` trigger whose pattern does not compile
    #[error("Invalid trigger pattern '{spec}': {source}")]
    InvalidPattern {
        spec: String,
        #[source]
        source: regex::Error,
    },

    /// Semantically invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML configuration could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON configuration could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
