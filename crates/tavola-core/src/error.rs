//! Error types for the Tavola ordering core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the ordering core.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Parsing failures in the
/// order extractor are deliberately *not* represented here: an assistant
/// reply that does not encode an order degrades to plain text, it is not
/// an error condition.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TavolaError {
    /// Transport or upstream failure while talking to the recommendation
    /// gateway. `retryable` classifies timeouts, connection failures and
    /// 429/5xx statuses.
    #[error("Gateway error: {message}")]
    Gateway {
        message: String,
        status_code: Option<u16>,
        retryable: bool,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TavolaError {
    /// Creates a non-retryable Gateway error.
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway {
            message: message.into(),
            status_code: None,
            retryable: false,
        }
    }

    /// Creates a Gateway error with a retryable classification.
    pub fn gateway_retryable(message: impl Into<String>) -> Self {
        Self::Gateway {
            message: message.into(),
            status_code: None,
            retryable: true,
        }
    }

    /// Creates a Gateway error carrying an upstream HTTP status.
    pub fn gateway_status(status_code: u16, message: impl Into<String>, retryable: bool) -> Self {
        Self::Gateway {
            message: message.into(),
            status_code: Some(status_code),
            retryable,
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Gateway error
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway { .. })
    }

    /// Check if this error is worth retrying (transient transport or
    /// upstream overload conditions).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Gateway { retryable: true, .. })
    }

    /// Check if this error carries the given upstream HTTP status.
    pub fn has_status(&self, status: u16) -> bool {
        matches!(self, Self::Gateway { status_code: Some(s), .. } if *s == status)
    }
}

impl From<std::io::Error> for TavolaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TavolaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TavolaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, for host boundaries)
impl From<anyhow::Error> for TavolaError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, TavolaError>`.
pub type Result<T> = std::result::Result<T, TavolaError>;
