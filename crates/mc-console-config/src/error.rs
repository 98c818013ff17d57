//! Configuration error types

use thiserror::Error;

/// Errors raised while loading, saving or validating console configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error occurred during config operations
    #[error("IO error: {operation} - {reason}")]
    IoError {
        operation: String,
        reason: String,
        #[source]
        cause: Option<std::io::Error>,
    },

    /// Configuration serialization/deserialization failed
    #[error("Serialization error: {format} - {reason}")]
    SerializationError {
        format: String,
        reason: String,
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation failed
    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Layering defaults, file and environment sources failed
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

impl ConfigError {
    /// Creates an IO error with optional cause.
    pub fn io_error(
        operation: impl Into<String>,
        reason: impl Into<String>,
        cause: Option<std::io::Error>,
    ) -> Self {
        Self::IoError {
            operation: operation.into(),
            reason: reason.into(),
            cause,
        }
    }

    /// Creates a serialization error with optional cause.
    pub fn serialization_error(
        format: impl Into<String>,
        reason: impl Into<String>,
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::SerializationError {
            format: format.into(),
            reason: reason.into(),
            cause,
        }
    }

    /// Creates an invalid config error with optional cause.
    pub fn invalid_config(
        field: impl Into<String>,
        reason: impl Into<String>,
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
            cause,
        }
    }
}

/// Result type for configuration operations.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
