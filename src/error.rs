//! Error types for console-client.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for console-client.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ────────────────────────────────────────────────────────────
    /// The call failed before any response was received.
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// The call exceeded the request timeout.
    #[error("Request timed out")]
    Timeout,

    /// No response for a reason other than a network failure or timeout.
    #[error("No response: {0}")]
    NoResponse(String),

    /// A response was received with a non-success HTTP status.
    #[error("API error {status}")]
    Api {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded as the expected envelope.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The request could not be constructed (bad URL, unserializable query).
    #[error("Request error: {0}")]
    Request(String),

    // ── Session ──────────────────────────────────────────────────────────────
    /// The session is no longer valid (HTTP 401 or embedded code 401).
    /// Handling this error clears the session store and schedules a redirect.
    #[error("Session expired")]
    SessionExpired,

    /// The operation requires a stored credential and none is present.
    #[error("Not authenticated")]
    NotAuthenticated,

    // ── Business ─────────────────────────────────────────────────────────────
    /// The backend reported an application-level failure inside a 2xx envelope.
    #[error("Business error {code}: {message}")]
    Business {
        /// Embedded envelope code.
        code: i64,
        /// Message surfaced to the user.
        message: String,
    },

    // ── Storage ──────────────────────────────────────────────────────────────
    /// Session storage I/O error.
    #[error("Storage I/O error at {path}: {message}")]
    StorageIo {
        /// Path that caused the error.
        path: PathBuf,
        /// Error description.
        message: String,
    },

    /// Session snapshot (de)serialization error.
    #[error("Storage serialization error: {0}")]
    StorageSerialization(String),

    // ── Infrastructure ───────────────────────────────────────────────────────
    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true if this error must force session teardown and a redirect.
    #[must_use]
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, Error::SessionExpired)
    }

    /// The user-facing message surfaced through the notification side effect.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Error::Network(_) => "network error, check your connection".into(),
            Error::Timeout => "request timed out, try again".into(),
            Error::NoResponse(_) | Error::Decode(_) | Error::Request(_) => {
                "request failed, please try again".into()
            }
            Error::SessionExpired => "session expired, please log in again".into(),
            Error::Api { status: 404 } => "requested resource not found".into(),
            Error::Api { status: 500 } => "internal server error".into(),
            Error::Api { status } => format!("request failed ({})", status),
            Error::Business { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Creates a storage I/O error.
    #[must_use]
    pub fn storage_io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::StorageIo {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience type alias.
pub type Result<T> = std::result::Result<T, Error>;
