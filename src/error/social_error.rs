//! Unified error type for the SecureSocial client.

use std::fmt;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use crate::traits::CredentialsError;

/// Unified error type for API calls.
///
/// `SocialError` consolidates the domain errors into a single enum, enabling
/// uniform categorization, user messaging and context attachment.
#[derive(Debug)]
pub enum SocialError {
    /// Transport failures, non-2xx statuses, undecodable bodies.
    Network(NetworkError),

    /// Session and authorization errors.
    Auth(AuthError),

    /// Local credential storage failures.
    Storage(CredentialsError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<SocialError>,
        context: ErrorContext,
    },
}

impl SocialError {
    /// Map a non-2xx response to an error.
    ///
    /// 401 and 403 are authentication errors; everything else is a status
    /// error carrying the response body as its message.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => SocialError::Auth(AuthError::ApiError { status, message }),
            _ => SocialError::Network(NetworkError::HttpStatus { status, message }),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SocialError::Network(NetworkError::HttpStatus { status, .. }) => {
                if *status >= 500 {
                    ErrorCategory::Server
                } else {
                    ErrorCategory::User
                }
            }
            SocialError::Network(NetworkError::InvalidResponse { .. }) => ErrorCategory::Server,
            SocialError::Network(_) => ErrorCategory::Network,
            SocialError::Auth(err) => {
                if err.requires_reauth() {
                    ErrorCategory::Auth
                } else if matches!(
                    err,
                    AuthError::CredentialsLoadFailed { .. } | AuthError::CredentialsSaveFailed { .. }
                ) {
                    ErrorCategory::System
                } else {
                    ErrorCategory::User
                }
            }
            SocialError::Storage(_) => ErrorCategory::System,
            SocialError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            SocialError::Network(err) => err.is_retryable(),
            SocialError::Auth(_) => false,
            SocialError::Storage(_) => false,
            SocialError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SocialError::Network(err) => err.user_message(),
            SocialError::Auth(err) => err.user_message(),
            SocialError::Storage(err) => format!("Local credential storage failed: {}", err),
            SocialError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SocialError::Network(err) => err.error_code(),
            SocialError::Auth(err) => err.error_code(),
            SocialError::Storage(_) => "E_STORAGE",
            SocialError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        SocialError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            SocialError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &SocialError {
        match self {
            SocialError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// Check if this error means the session is invalid and the user must
    /// log in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            SocialError::Auth(err) => err.requires_reauth(),
            SocialError::WithContext { error, .. } => error.requires_reauth(),
            _ => false,
        }
    }
}

impl fmt::Display for SocialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocialError::Network(err) => write!(f, "{}", err),
            SocialError::Auth(err) => write!(f, "{}", err),
            SocialError::Storage(err) => write!(f, "{}", err),
            SocialError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for SocialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SocialError::Network(err) => Some(err),
            SocialError::Auth(err) => Some(err),
            SocialError::Storage(err) => Some(err),
            SocialError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<NetworkError> for SocialError {
    fn from(err: NetworkError) -> Self {
        SocialError::Network(err)
    }
}

impl From<AuthError> for SocialError {
    fn from(err: AuthError) -> Self {
        SocialError::Auth(err)
    }
}

impl From<CredentialsError> for SocialError {
    fn from(err: CredentialsError) -> Self {
        SocialError::Storage(err)
    }
}

impl From<serde_json::Error> for SocialError {
    fn from(err: serde_json::Error) -> Self {
        SocialError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}
