//! Error types for the Sportello engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Sportello crates.
///
/// Classification is total and never produces an error; these variants cover
/// configuration, I/O, serialization and the remote-capability edge. Capability
/// failures are recovered inside the engine and never surface to end users.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SportelloError {
    /// Configuration error (missing file, bad value, invalid threshold order)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Remote AI capability failure (timeout, upstream error, bad payload)
    #[error("Capability error ({kind}): {message}")]
    Capability { kind: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SportelloError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Capability error
    pub fn capability(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Capability {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a capability error
    pub fn is_capability(&self) -> bool {
        matches!(self, Self::Capability { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SportelloError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SportelloError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SportelloError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for SportelloError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, SportelloError>`.
pub type Result<T> = std::result::Result<T, SportelloError>;
