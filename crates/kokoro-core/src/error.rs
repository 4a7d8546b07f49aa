//! Error types for the Kokoro application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Kokoro application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// The insight-service variants carry a fixed meaning at the orchestration
/// boundary: `ServiceUnavailable` is a connection-level failure (the service
/// could not be reached), `ServiceResponseInvalid` is a malformed or
/// incomplete response from a service that did answer. The two are kept
/// distinct so callers can degrade differently.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum KokoroError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// User-input validation error, surfaced directly for user-visible messaging
    #[error("Validation error: {0}")]
    Validation(String),

    /// The external insight service could not be reached
    #[error("Insight service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The external insight service answered with a malformed or incomplete body
    #[error("Invalid insight service response: {0}")]
    ServiceResponseInvalid(String),

    /// Illegal conversation-session transition
    #[error("Session state error: {0}")]
    SessionState(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl KokoroError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a ServiceUnavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Creates a ServiceResponseInvalid error
    pub fn service_response_invalid(message: impl Into<String>) -> Self {
        Self::ServiceResponseInvalid(message.into())
    }

    /// Creates a SessionState error
    pub fn session_state(message: impl Into<String>) -> Self {
        Self::SessionState(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a SessionState error
    pub fn is_session_state(&self) -> bool {
        matches!(self, Self::SessionState(_))
    }

    /// Check if this error came from the external insight service.
    ///
    /// Returns true for both `ServiceUnavailable` and `ServiceResponseInvalid`;
    /// these are the two conditions the orchestration boundary converts to a
    /// fallback or tagged result instead of propagating.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_) | Self::ServiceResponseInvalid(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for KokoroError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for KokoroError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for KokoroError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for KokoroError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for KokoroError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, KokoroError>`.
pub type Result<T> = std::result::Result<T, KokoroError>;
