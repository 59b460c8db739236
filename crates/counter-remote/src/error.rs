//! # Remote Error Types
//!
//! Error categorization for hosted-backend calls.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reqwest::Error / HTTP status / backend error body                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RemoteError { kind, message } ← categorized, human-readable            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RemoteResult<T> { data, error } ← never a panic, never a throw         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong, broadly. Drives the front-end's choice of message and
/// whether a retry by the user makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorKind {
    /// Could not reach the backend at all.
    Network,
    /// The request timed out.
    Timeout,
    /// Credentials missing, invalid or expired (401/403).
    Unauthorized,
    /// The requested entity does not exist (404).
    NotFound,
    /// The backend reported a server-side failure (5xx).
    Server,
    /// The response body could not be decoded.
    InvalidResponse,
    /// The backend returned a structured error of its own.
    Backend,
}

/// A failed remote call.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        RemoteError {
            kind,
            message: message.into(),
        }
    }

    /// Maps a transport-level failure to a user-friendly error.
    pub fn from_transport(url: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return RemoteError::new(
                RemoteErrorKind::Timeout,
                format!("Connection to {url} timed out"),
            );
        }
        if err.is_connect() {
            return RemoteError::new(
                RemoteErrorKind::Network,
                format!("Cannot reach backend at {url}"),
            );
        }
        if err.is_builder() {
            return RemoteError::new(
                RemoteErrorKind::Network,
                format!("Invalid backend URL: {url}"),
            );
        }
        RemoteError::new(
            RemoteErrorKind::Network,
            format!("Network error communicating with {url}: {err}"),
        )
    }

    /// Maps a non-success HTTP status to a user-friendly error.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = backend_message(body);
        match status.as_u16() {
            401 | 403 => RemoteError::new(
                RemoteErrorKind::Unauthorized,
                detail.unwrap_or_else(|| "Credentials are invalid or expired".to_string()),
            ),
            404 => RemoteError::new(
                RemoteErrorKind::NotFound,
                detail.unwrap_or_else(|| "Requested record not found".to_string()),
            ),
            s if s >= 500 => RemoteError::new(
                RemoteErrorKind::Server,
                detail.unwrap_or_else(|| format!("Backend server error (HTTP {s})")),
            ),
            s => RemoteError::new(
                RemoteErrorKind::Backend,
                detail.unwrap_or_else(|| format!("Unexpected backend response (HTTP {s})")),
            ),
        }
    }

    /// Maps a body-decoding failure.
    pub fn invalid_response(err: impl std::fmt::Display) -> Self {
        RemoteError::new(
            RemoteErrorKind::InvalidResponse,
            format!("Could not decode backend response: {err}"),
        )
    }
}

/// Pulls the human-readable message out of a PostgREST-style error body,
/// when there is one.
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["message", "error_description", "error", "msg"] {
        if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
            if !msg.trim().is_empty() {
                return Some(msg.trim().to_string());
            }
        }
    }
    None
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = RemoteError::from_status(StatusCode::UNAUTHORIZED, "");
        assert_eq!(err.kind, RemoteErrorKind::Unauthorized);

        let err = RemoteError::from_status(StatusCode::NOT_FOUND, "");
        assert_eq!(err.kind, RemoteErrorKind::NotFound);

        let err = RemoteError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.kind, RemoteErrorKind::Server);
        assert!(err.message.contains("500"));

        let err = RemoteError::from_status(StatusCode::CONFLICT, "");
        assert_eq!(err.kind, RemoteErrorKind::Backend);
    }

    #[test]
    fn test_backend_message_extraction() {
        let err = RemoteError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message": "duplicate key value"}"#,
        );
        assert_eq!(err.message, "duplicate key value");

        let err = RemoteError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"error_description": "Invalid login credentials"}"#,
        );
        assert_eq!(err.message, "Invalid login credentials");

        // Not JSON: fall back to the generic message.
        let err = RemoteError::from_status(StatusCode::BAD_REQUEST, "<html>oops</html>");
        assert!(err.message.contains("HTTP 400"));
    }
}
