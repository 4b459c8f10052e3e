//! Error taxonomy for API calls.
//!
//! Every call through [`crate::ApiClient`] resolves to `Ok(data)` or one of the
//! variants below. None of them is fatal: callers degrade to stale data,
//! roll back optimistic state, or fall back to the signed-out state.

use thiserror::Error;

use crate::auth::TokenError;
use crate::transport::TransportError;

/// Error returned by every API operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Sign-up or sign-in was rejected by the server.
    #[error("{0}")]
    Auth(String),

    /// An authenticated request came back with 401. If it carried the
    /// current token, the session has already been cleared by the time the
    /// caller sees this.
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    /// The request did not complete (offline, DNS, CORS, aborted).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status other than 401.
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The server issued a token that cannot be used.
    #[error("invalid token: {0}")]
    Token(#[from] TokenError),
}

impl ApiError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Extract a human-readable message from an error response body.
///
/// The API answers errors with `{"message": "..."}` or `{"error": "..."}`;
/// anything else is passed through as plain text.
pub(crate) fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for field in ["message", "error", "msg"] {
            if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"message":"Invalid credentials"}"#), "Invalid credentials");
        assert_eq!(error_message(r#"{"error":"User exists"}"#), "User exists");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("  "), "no response body");
    }

    #[test]
    fn test_transport_error_maps_to_network() {
        let err: ApiError = TransportError("connection refused".into()).into();
        assert!(err.is_network());
        assert!(!err.is_session_expired());
    }
}
