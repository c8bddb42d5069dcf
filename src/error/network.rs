//! Network-related error types.
//!
//! This module defines errors that occur while talking to the service:
//! transport failures, non-2xx statuses and undecodable bodies.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String },

    /// HTTP status error (non-2xx response other than auth failures).
    HttpStatus { status: u16, message: String },

    /// Invalid response format.
    InvalidResponse { message: String },

    /// Request was cancelled.
    Cancelled,

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            NetworkError::Timeout { operation } => {
                format!("The {} operation timed out. The server may be slow or unreachable.", operation)
            }
            NetworkError::HttpStatus { status, message } => match *status {
                400 => format!("The request was invalid: {}", message),
                404 => "The requested resource was not found.".to_string(),
                409 => format!("Conflict: {}", message),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The server is experiencing issues. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {}). Please try again.", status),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation } => write!(f, "{} timed out", operation),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a transport error for the request to `url`.
pub fn classify_http_error(err: &HttpError, url: &str) -> NetworkError {
    match err {
        HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: message.clone(),
        },
        HttpError::Timeout(_) => NetworkError::Timeout {
            operation: "HTTP request".to_string(),
        },
        HttpError::Cancelled => NetworkError::Cancelled,
        HttpError::InvalidUrl(message) | HttpError::Other(message) => NetworkError::Other {
            message: message.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        let status = |status| NetworkError::HttpStatus {
            status,
            message: String::new(),
        };
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(404).is_retryable());
    }

    #[test]
    fn test_connection_failed_is_retryable() {
        let err = NetworkError::ConnectionFailed {
            url: "http://localhost".to_string(),
            message: "refused".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_NET_CONN");
        assert!(err.user_message().contains("connect"));
    }

    #[test]
    fn test_classify_http_error() {
        let conn = classify_http_error(
            &HttpError::ConnectionFailed("refused".to_string()),
            "http://h/x",
        );
        assert_eq!(
            conn,
            NetworkError::ConnectionFailed {
                url: "http://h/x".to_string(),
                message: "refused".to_string()
            }
        );

        let timeout = classify_http_error(&HttpError::Timeout("30s".to_string()), "http://h/x");
        assert!(matches!(timeout, NetworkError::Timeout { .. }));

        let cancelled = classify_http_error(&HttpError::Cancelled, "http://h/x");
        assert_eq!(cancelled, NetworkError::Cancelled);
    }

    #[test]
    fn test_display() {
        let err = NetworkError::HttpStatus {
            status: 404,
            message: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 error: missing");
    }
}
