//! Outbound bearer-token attachment.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::traits::{CredentialStore, Request};

/// Default bound on how long a credential read may take.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Attaches the stored access token to every outgoing request.
///
/// The interceptor only reads the store. When no usable token can be read
/// the request goes out unauthenticated and the service decides.
#[derive(Clone)]
pub struct AuthInterceptor {
    store: Arc<dyn CredentialStore>,
    read_timeout: Duration,
}

impl AuthInterceptor {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Return `request` with `Authorization: Bearer <token>` set when a
    /// non-blank access token is stored, otherwise return it unchanged.
    ///
    /// Any existing authorization header is replaced, so intercepting twice
    /// still leaves exactly one.
    pub async fn intercept(&self, request: Request) -> Request {
        match tokio::time::timeout(self.read_timeout, self.store.get_access_token()).await {
            Ok(Ok(Some(token))) if !token.trim().is_empty() => {
                debug!(url = %request.url, "attaching bearer token");
                request.with_bearer(&token)
            }
            Ok(Ok(_)) => {
                debug!(url = %request.url, "no access token stored, sending unauthenticated");
                request
            }
            Ok(Err(e)) => {
                warn!(url = %request.url, error = %e, "failed to read access token, sending unauthenticated");
                request
            }
            Err(_) => {
                warn!(
                    url = %request.url,
                    timeout_ms = self.read_timeout.as_millis() as u64,
                    "access token read timed out, sending unauthenticated"
                );
                request
            }
        }
    }
}

impl std::fmt::Debug for AuthInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthInterceptor")
            .field("read_timeout", &self.read_timeout)
            .finish_non_exhaustive()
    }
}
