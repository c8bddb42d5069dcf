//! Token refresher trait abstraction.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::TokenPair;

/// Why a refresh exchange failed. Every variant is a hard failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshError {
    /// The request never produced a response.
    #[error("refresh request failed: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("refresh rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The body was not a usable token pair.
    #[error("invalid refresh response: {0}")]
    InvalidPayload(String),
}

/// Exchanges a refresh token for a new token pair.
///
/// Implementations must not route through the authenticated pipeline: a
/// refresh call that itself got a 401 would otherwise try to refresh again.
/// No retries happen here; the caller owns retry policy.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, RefreshError>;
}
