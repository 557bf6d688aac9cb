//! API error types

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

/// Machine-readable error body returned by the backend.
///
/// The backend answers failed requests with a structured body that can
/// carry a human-readable message, a stable error code, and per-field
/// validation messages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable error message.
    pub message: Option<String>,
    /// Stable, machine-readable error code.
    pub code: Option<String>,
    /// Per-field validation messages.
    #[serde(default)]
    pub field_errors: HashMap<String, String>,
}

impl ErrorBody {
    /// Parses an error body from raw response text, if it is one.
    pub fn from_text(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Returns `true` if the body carries per-field validation messages.
    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }
}

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Structured error body, if the backend sent one.
        detail: Option<ErrorBody>,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the backend error code if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Http { detail, .. } => detail.as_ref().and_then(|d| d.code.as_deref()),
            _ => None,
        }
    }

    /// Returns `true` if this error means the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_parses_backend_shape() {
        let body = ErrorBody::from_text(
            r#"{"message": "Validation failed", "code": "VALIDATION", "fieldErrors": {"email": "must be a valid address"}}"#,
        )
        .unwrap();

        assert_eq!(body.message.as_deref(), Some("Validation failed"));
        assert_eq!(body.code.as_deref(), Some("VALIDATION"));
        assert!(body.has_field_errors());
        assert_eq!(
            body.field_errors.get("email").map(String::as_str),
            Some("must be a valid address")
        );
    }

    #[test]
    fn error_body_tolerates_partial_payloads() {
        let body = ErrorBody::from_text(r#"{"message": "boom"}"#).unwrap();
        assert!(!body.has_field_errors());
        assert!(body.code.is_none());

        assert!(ErrorBody::from_text("<html>gateway error</html>").is_none());
    }

    #[test]
    fn retryable_statuses() {
        assert!(ApiError::http(503, "unavailable").is_retryable());
        assert!(ApiError::http(429, "slow down").is_retryable());
        assert!(!ApiError::http(404, "missing").is_retryable());
        assert!(!ApiError::http(401, "unauthorized").is_retryable());
        assert!(ApiError::http(401, "unauthorized").is_unauthorized());
    }

    #[test]
    fn error_code_comes_from_the_detail() {
        let err = ApiError::Http {
            status: 400,
            message: "Validation failed".to_string(),
            detail: Some(ErrorBody {
                code: Some("VALIDATION".to_string()),
                ..Default::default()
            }),
        };
        assert_eq!(err.error_code(), Some("VALIDATION"));
        assert_eq!(err.status_code(), Some(400));
        assert!(ApiError::http(400, "bare").error_code().is_none());
    }
}
