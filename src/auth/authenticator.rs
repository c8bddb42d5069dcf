//! Recovery from authentication failures (HTTP 401).
//!
//! When the service rejects a request, the authenticator exchanges the
//! stored refresh token for a new pair, persists it and hands back the failed
//! request re-authorized with the new access token. The caller retries that
//! request exactly once. `Err` means "do not retry": the caller returns the
//! original 401 response.
//!
//! Refresh and persist run on a spawned task so a rotation that has started
//! is always persisted, even if the request that triggered it is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn, Instrument};

use super::interceptor::DEFAULT_READ_TIMEOUT;
use crate::error::AuthError;
use crate::traits::{CredentialStore, Request, TokenRefresher};

/// Number of prior responses after which a 401 is final.
///
/// Depth counts the 401s already handled on the chain, not the current one,
/// so depth 2 still refreshes and a logical request refreshes at most three
/// times. Counting the current response too would stop after two.
pub const MAX_CHAIN_DEPTH: u32 = 3;

/// Handles 401 responses by rotating the token pair.
#[derive(Clone)]
pub struct TokenAuthenticator {
    store: Arc<dyn CredentialStore>,
    refresher: Arc<dyn TokenRefresher>,
    read_timeout: Duration,
    refresh_gate: Option<Arc<Mutex<()>>>,
}

impl TokenAuthenticator {
    pub fn new(store: Arc<dyn CredentialStore>, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self {
            store,
            refresher,
            read_timeout: DEFAULT_READ_TIMEOUT,
            refresh_gate: None,
        }
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Serialize refreshes across all clones of this authenticator.
    ///
    /// A request that waited for a sibling's rotation is retried with the
    /// stored token instead of refreshing a second time.
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.refresh_gate = enabled.then(|| Arc::new(Mutex::new(())));
        self
    }

    pub fn is_single_flight(&self) -> bool {
        self.refresh_gate.is_some()
    }

    /// Decide how to recover from a 401 received by `request`.
    ///
    /// `depth` is the number of responses already chained to the request
    /// (0 for the first attempt). Returns the request to retry, or why no
    /// retry should happen.
    pub async fn authenticate(&self, request: &Request, depth: u32) -> Result<Request, AuthError> {
        if depth >= MAX_CHAIN_DEPTH {
            warn!(depth, url = %request.url, "giving up on 401: retry budget exhausted");
            return Err(AuthError::RetryBudgetExhausted { depth });
        }

        let guard = match &self.refresh_gate {
            Some(gate) => Some(gate.clone().lock_owned().await),
            None => None,
        };

        if guard.is_some() {
            if let Some(token) = self.rotated_by_sibling(request).await {
                debug!(depth, "token already rotated, retrying with stored token");
                return Ok(request.clone().with_bearer(&token));
            }
        }

        let refresh_token = self.read_refresh_token().await.map_err(|e| {
            warn!(depth, error = %e, "cannot refresh after 401");
            e
        })?;

        let store = Arc::clone(&self.store);
        let refresher = Arc::clone(&self.refresher);
        let rotation = tokio::spawn(
            async move {
                let _guard = guard;

                let pair = refresher.refresh(&refresh_token).await.map_err(|e| {
                    warn!("token refresh failed: {}", e);
                    AuthError::RefreshFailed {
                        message: e.to_string(),
                    }
                })?;

                store.save_tokens(&pair).await.map_err(|e| {
                    warn!("refreshed tokens could not be saved: {}", e);
                    AuthError::CredentialsSaveFailed {
                        message: e.to_string(),
                    }
                })?;

                info!("token pair rotated");
                Ok::<String, AuthError>(pair.access_token)
            }
            .in_current_span(),
        );

        let access_token = rotation.await.map_err(|e| AuthError::RefreshFailed {
            message: format!("refresh task failed: {}", e),
        })??;

        debug!(depth, url = %request.url, "retrying with rotated token");
        Ok(request.clone().with_bearer(&access_token))
    }

    /// The stored access token, if it is usable and differs from the one
    /// `request` was sent with.
    async fn rotated_by_sibling(&self, request: &Request) -> Option<String> {
        let read = tokio::time::timeout(self.read_timeout, self.store.get_access_token()).await;
        let stored = match read {
            Ok(Ok(Some(token))) if !token.trim().is_empty() => token,
            Ok(Ok(_)) => return None,
            Ok(Err(e)) => {
                debug!("could not re-read access token: {}", e);
                return None;
            }
            Err(_) => {
                debug!("re-reading access token timed out");
                return None;
            }
        };

        (request.bearer_token() != Some(stored.as_str())).then_some(stored)
    }

    async fn read_refresh_token(&self) -> Result<String, AuthError> {
        let token = tokio::time::timeout(self.read_timeout, self.store.get_refresh_token())
            .await
            .map_err(|_| AuthError::CredentialsLoadFailed {
                message: format!(
                    "refresh token read timed out after {}ms",
                    self.read_timeout.as_millis()
                ),
            })?
            .map_err(|e| AuthError::CredentialsLoadFailed {
                message: e.to_string(),
            })?;

        match token {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(AuthError::RefreshTokenMissing),
        }
    }
}

impl std::fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("read_timeout", &self.read_timeout)
            .field("single_flight", &self.is_single_flight())
            .finish_non_exhaustive()
    }
}
