//! Credential store trait abstraction.
//!
//! The store is the single owner of persisted tokens and profile fields. The
//! interceptor and authenticator read and write through it on every request
//! and never keep tokens of their own.

use async_trait::async_trait;

use crate::auth::{Credentials, TokenPair, UserInfo};

/// Credential store operation errors.
#[derive(Debug, Clone)]
pub enum CredentialsError {
    /// Failed to load credentials
    LoadFailed(String),
    /// Failed to save credentials
    SaveFailed(String),
    /// Failed to clear credentials
    ClearFailed(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::LoadFailed(msg) => write!(f, "Failed to load credentials: {}", msg),
            CredentialsError::SaveFailed(msg) => write!(f, "Failed to save credentials: {}", msg),
            CredentialsError::ClearFailed(msg) => {
                write!(f, "Failed to clear credentials: {}", msg)
            }
            CredentialsError::Other(msg) => write!(f, "Credentials error: {}", msg),
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Asynchronous key-value store for the session's credentials.
///
/// Every operation is safe to call concurrently from any task. Writes are
/// last-writer-wins; `save_tokens` replaces both tokens together so a reader
/// never pairs a new access token with a stale refresh token.
///
/// # Example
///
/// ```ignore
/// use securesocial::traits::CredentialStore;
/// use securesocial::auth::TokenPair;
///
/// async fn rotate<S: CredentialStore>(store: &S, pair: &TokenPair) -> Result<(), CredentialsError> {
///     store.save_tokens(pair).await?;
///     assert_eq!(store.get_access_token().await?, Some(pair.access_token.clone()));
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the full credential snapshot (empty when nothing is stored).
    async fn load(&self) -> Result<Credentials, CredentialsError>;

    /// The stored access token, if any.
    async fn get_access_token(&self) -> Result<Option<String>, CredentialsError> {
        Ok(self.load().await?.access_token)
    }

    /// The stored refresh token, if any.
    async fn get_refresh_token(&self) -> Result<Option<String>, CredentialsError> {
        Ok(self.load().await?.refresh_token)
    }

    /// The stored user profile, when id, username and email are all present.
    async fn get_user_info(&self) -> Result<Option<UserInfo>, CredentialsError> {
        Ok(self.load().await?.user_info())
    }

    /// Overwrite both tokens with `pair`. Profile fields are kept.
    async fn save_tokens(&self, pair: &TokenPair) -> Result<(), CredentialsError>;

    /// Overwrite the profile fields. Tokens are kept.
    async fn save_user(&self, user: &UserInfo) -> Result<(), CredentialsError>;

    /// Remove everything.
    async fn clear(&self) -> Result<(), CredentialsError>;
}
