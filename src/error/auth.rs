//! Authentication-related error types.
//!
//! These double as the outcome taxonomy of 401 recovery: every variant the
//! authenticator returns means "do not retry", and the caller sees the
//! original 401 response.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No access token stored (user not logged in).
    NotAuthenticated,

    /// A 401 arrived but no refresh token is stored.
    RefreshTokenMissing,

    /// The refresh exchange failed (transport, status or payload).
    RefreshFailed { message: String },

    /// The request already failed authentication too many times in a row.
    RetryBudgetExhausted { depth: u32 },

    /// Credentials could not be loaded.
    CredentialsLoadFailed { message: String },

    /// Credentials could not be saved.
    CredentialsSaveFailed { message: String },

    /// API returned an authentication error.
    ApiError { status: u16, message: String },
}

impl AuthError {
    /// Check if this error means the session is gone and the user must log in.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated
                | AuthError::RefreshTokenMissing
                | AuthError::RefreshFailed { .. }
                | AuthError::RetryBudgetExhausted { .. }
                | AuthError::ApiError { status: 401, .. }
        )
    }

    /// Check if this error is recoverable (can retry or re-auth).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AuthError::ApiError { status: 403, .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            AuthError::RefreshTokenMissing
            | AuthError::RetryBudgetExhausted { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::RefreshFailed { .. } => {
                "Failed to renew your session. Please sign in again.".to_string()
            }
            AuthError::CredentialsLoadFailed { .. } => {
                "Could not load your credentials. Please sign in again.".to_string()
            }
            AuthError::CredentialsSaveFailed { .. } => {
                "Could not save your credentials. Please check file permissions.".to_string()
            }
            AuthError::ApiError { status, message } => match *status {
                401 => "Your session has expired. Please sign in again.".to_string(),
                403 => "Access denied. You don't have permission for this action.".to_string(),
                _ => format!("Authentication error: {}", message),
            },
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
            AuthError::RefreshTokenMissing => "E_AUTH_NO_REFRESH",
            AuthError::RefreshFailed { .. } => "E_AUTH_REFRESH_FAIL",
            AuthError::RetryBudgetExhausted { .. } => "E_AUTH_RETRY_LIMIT",
            AuthError::CredentialsLoadFailed { .. } => "E_AUTH_CRED_LOAD",
            AuthError::CredentialsSaveFailed { .. } => "E_AUTH_CRED_SAVE",
            AuthError::ApiError { .. } => "E_AUTH_API",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::RefreshTokenMissing => write!(f, "No refresh token stored"),
            AuthError::RefreshFailed { message } => {
                write!(f, "Token refresh failed: {}", message)
            }
            AuthError::RetryBudgetExhausted { depth } => {
                write!(f, "Gave up after {} chained authentication failures", depth)
            }
            AuthError::CredentialsLoadFailed { message } => {
                write!(f, "Failed to load credentials: {}", message)
            }
            AuthError::CredentialsSaveFailed { message } => {
                write!(f, "Failed to save credentials: {}", message)
            }
            AuthError::ApiError { status, message } => {
                write!(f, "Authentication API error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_authenticated_requires_reauth() {
        let err = AuthError::NotAuthenticated;
        assert!(err.requires_reauth());
        assert!(err.is_recoverable());
        assert_eq!(err.error_code(), "E_AUTH_NOT_AUTH");
    }

    #[test]
    fn test_refresh_outcomes_require_reauth() {
        for err in [
            AuthError::RefreshTokenMissing,
            AuthError::RefreshFailed {
                message: "rejected".to_string(),
            },
            AuthError::RetryBudgetExhausted { depth: 3 },
        ] {
            assert!(err.requires_reauth(), "{:?}", err);
            assert!(err.user_message().contains("sign in"));
        }
    }

    #[test]
    fn test_credential_io_errors_do_not_require_reauth() {
        let err = AuthError::CredentialsSaveFailed {
            message: "disk full".to_string(),
        };
        assert!(!err.requires_reauth());
        assert_eq!(err.error_code(), "E_AUTH_CRED_SAVE");
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_api_error_401_requires_reauth() {
        let err = AuthError::ApiError {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.requires_reauth());
        assert!(err.user_message().contains("expired"));
    }

    #[test]
    fn test_api_error_403_not_recoverable() {
        let err = AuthError::ApiError {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert!(!err.requires_reauth());
        assert!(!err.is_recoverable());
        assert!(err.user_message().contains("Access denied"));
    }

    #[test]
    fn test_retry_budget_display() {
        let err = AuthError::RetryBudgetExhausted { depth: 3 };
        assert_eq!(
            err.to_string(),
            "Gave up after 3 chained authentication failures"
        );
    }
}
