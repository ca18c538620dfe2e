//! Error types and rejection payloads for API calls.
//!
//! Every failed call ends up as an [`ErrorPayload`]: the backend's own
//! `{message, error}` body when it sent one, otherwise a synthesized payload
//! carrying an operation-specific fallback message.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection value stored in a slice's failed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(detail.into()),
        }
    }

    /// Parse a non-2xx response body.
    ///
    /// Accepts `{message, error?}` and `{error: "text"}` shapes. Anything
    /// else (HTML error pages, empty bodies) yields `None`.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        #[derive(Deserialize)]
        struct RawBody {
            #[serde(default)]
            message: Option<String>,
            #[serde(default)]
            error: Option<serde_json::Value>,
        }

        let raw: RawBody = serde_json::from_slice(body).ok()?;
        let error = raw.error.map(|value| match value {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        });
        match (raw.message, error) {
            (Some(message), error) => Some(Self { message, error }),
            (None, Some(error)) => Some(Self::new(error)),
            (None, None) => None,
        }
    }
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, TLS or body transfer failure
    #[error("Request to '{path}' failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-2xx status
    #[error("Server responded {status}{}", .payload.as_ref().map(|p| format!(": {}", p.message)).unwrap_or_default())]
    Status {
        status: u16,
        payload: Option<ErrorPayload>,
    },

    /// 2xx response whose body did not match the expected shape
    #[error("Unexpected response from '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An id that cannot be used as a path segment
    #[error("Invalid path segment '{0}'")]
    InvalidPath(String),

    /// A local file to upload could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 responses.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Convert into the rejection payload stored by a slice.
    ///
    /// The server's payload passes through verbatim; otherwise `fallback`
    /// becomes the message and this error's text the detail.
    pub fn into_rejection(self, fallback: &str) -> ErrorPayload {
        match self {
            ApiError::Status {
                payload: Some(payload),
                ..
            } => payload,
            other => ErrorPayload::with_detail(fallback, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_message_and_error() {
        let payload =
            ErrorPayload::from_body(br#"{"message":"Album not found","error":"CastError"}"#)
                .expect("payload");
        assert_eq!(payload.message, "Album not found");
        assert_eq!(payload.error.as_deref(), Some("CastError"));
    }

    #[test]
    fn error_only_body_becomes_message() {
        let payload = ErrorPayload::from_body(br#"{"error":"Unauthorized"}"#).expect("payload");
        assert_eq!(payload, ErrorPayload::new("Unauthorized"));
    }

    #[test]
    fn non_json_body_has_no_payload() {
        assert!(ErrorPayload::from_body(b"<html>502</html>").is_none());
        assert!(ErrorPayload::from_body(b"").is_none());
        assert!(ErrorPayload::from_body(br#"{"ok":false}"#).is_none());
    }

    #[test]
    fn status_rejection_passes_payload_through() {
        let err = ApiError::Status {
            status: 400,
            payload: Some(ErrorPayload::new("Name is required")),
        };
        assert_eq!(
            err.into_rejection("Failed to create album"),
            ErrorPayload::new("Name is required")
        );
    }

    #[test]
    fn status_without_payload_synthesizes() {
        let err = ApiError::Status {
            status: 502,
            payload: None,
        };
        let payload = err.into_rejection("Failed to fetch albums");
        assert_eq!(payload.message, "Failed to fetch albums");
        assert_eq!(payload.error.as_deref(), Some("Server responded 502"));
    }

    #[test]
    fn auth_errors() {
        let err = ApiError::Status {
            status: 401,
            payload: None,
        };
        assert!(err.is_auth_error());
        assert!(!ApiError::InvalidPath("a/b".to_string()).is_auth_error());
    }
}
