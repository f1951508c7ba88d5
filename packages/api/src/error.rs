//! Error types for talking to the school backend.

use serde::Deserialize;
use thiserror::Error;

/// Message shown when the server gives no usable `detail`.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

/// Everything that can go wrong with a backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE))]
    Status { status: u16, detail: Option<String> },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The bearer token could not be decoded.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// A call that needs a token was made without one.
    #[error("not signed in")]
    MissingToken,
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

impl ApiError {
    /// Build a status error from a raw response body.
    ///
    /// Accepts `detail` as a string or as FastAPI's validation array (the first
    /// entry's `msg` is used) and falls back to a `message` field.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| match b.detail {
                Some(serde_json::Value::String(s)) => Some(s),
                Some(serde_json::Value::Array(items)) => items
                    .first()
                    .and_then(|i| i.get("msg"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string),
                _ => b.message,
            })
            .filter(|d| !d.trim().is_empty());
        ApiError::Status { status, detail }
    }

    /// Text suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                detail: Some(d), ..
            } => d.clone(),
            ApiError::MissingToken => "Your session is missing. Please sign in again.".to_string(),
            ApiError::InvalidToken(_) => "Could not read the sign-in token.".to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error means the session is no longer valid.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ApiError::MissingToken
                | ApiError::InvalidToken(_)
                | ApiError::Status {
                    status: 401 | 403,
                    ..
                }
        )
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Client-side form validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Phone number must be exactly {expected} digits")]
    PhoneLength { expected: usize },

    #[error("Phone number may only contain digits")]
    PhoneDigits,

    #[error("Please enter a valid email")]
    Email,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please choose at least one {what}")]
    EmptySelection { what: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_used() {
        let err = ApiError::from_status(401, r#"{"detail":"Wrong username or password"}"#);
        assert_eq!(err.user_message(), "Wrong username or password");
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_validation_array_uses_first_msg() {
        let err = ApiError::from_status(
            422,
            r#"{"detail":[{"loc":["body","sdt_gv"],"msg":"field required","type":"value_error"}]}"#,
        );
        assert_eq!(err.user_message(), "field required");
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_message_field_fallback() {
        let err = ApiError::from_status(400, r#"{"message":"Already confirmed"}"#);
        assert_eq!(err.user_message(), "Already confirmed");
    }

    #[test]
    fn test_non_json_body_gets_generic_text() {
        let err = ApiError::from_status(500, "<html>Internal Server Error</html>");
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_blank_detail_gets_generic_text() {
        let err = ApiError::from_status(404, r#"{"detail":"  "}"#);
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_transport_is_not_auth_failure() {
        let err = ApiError::Transport("connection refused".into());
        assert!(!err.is_auth_failure());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }
}
