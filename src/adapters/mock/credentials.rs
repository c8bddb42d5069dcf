//! In-memory credential store for testing.
//!
//! Provides a store that keeps credentials in memory, with switches to make
//! individual operations fail or stall.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::auth::credentials::{Credentials, TokenPair, UserInfo};
use crate::traits::{CredentialStore, CredentialsError};

#[derive(Debug, Default)]
struct State {
    credentials: Credentials,
    load_should_fail: bool,
    save_should_fail: bool,
    clear_should_fail: bool,
    read_delay: Option<Duration>,
    save_count: usize,
}

/// In-memory credential store for testing.
///
/// # Example
///
/// ```ignore
/// use securesocial::adapters::mock::InMemoryCredentials;
/// use securesocial::traits::CredentialStore;
/// use securesocial::auth::TokenPair;
///
/// let store = InMemoryCredentials::new();
/// store.save_tokens(&TokenPair::new("a", "r")).await?;
/// assert_eq!(store.get_access_token().await?, Some("a".to_string()));
///
/// store.clear().await?;
/// assert!(store.get_access_token().await?.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    state: Arc<Mutex<State>>,
}

impl InMemoryCredentials {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `creds`.
    pub fn with_credentials(creds: Credentials) -> Self {
        let store = Self::new();
        store.set_credentials(creds);
        store
    }

    /// Create a store holding just a token pair.
    pub fn with_tokens(access_token: &str, refresh_token: &str) -> Self {
        let mut creds = Credentials::new();
        creds.set_tokens(&TokenPair::new(access_token, refresh_token));
        Self::with_credentials(creds)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Configure whether reads should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        self.state().load_should_fail = should_fail;
    }

    /// Configure whether saves should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        self.state().save_should_fail = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        self.state().clear_should_fail = should_fail;
    }

    /// Make every read wait `delay` before answering.
    pub fn set_read_delay(&self, delay: Option<Duration>) {
        self.state().read_delay = delay;
    }

    /// Get the current credentials synchronously.
    pub fn get_credentials(&self) -> Credentials {
        self.state().credentials.clone()
    }

    /// Set credentials synchronously.
    pub fn set_credentials(&self, creds: Credentials) {
        self.state().credentials = creds;
    }

    /// Number of successful `save_tokens`/`save_user` calls.
    pub fn save_count(&self) -> usize {
        self.state().save_count
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentials {
    async fn load(&self) -> Result<Credentials, CredentialsError> {
        let delay = self.state().read_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state();
        if state.load_should_fail {
            return Err(CredentialsError::LoadFailed("Mock load failure".to_string()));
        }
        Ok(state.credentials.clone())
    }

    async fn save_tokens(&self, pair: &TokenPair) -> Result<(), CredentialsError> {
        let mut state = self.state();
        if state.save_should_fail {
            return Err(CredentialsError::SaveFailed("Mock save failure".to_string()));
        }
        state.credentials.set_tokens(pair);
        state.save_count += 1;
        Ok(())
    }

    async fn save_user(&self, user: &UserInfo) -> Result<(), CredentialsError> {
        let mut state = self.state();
        if state.save_should_fail {
            return Err(CredentialsError::SaveFailed("Mock save failure".to_string()));
        }
        state.credentials.set_user(user);
        state.save_count += 1;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        let mut state = self.state();
        if state.clear_should_fail {
            return Err(CredentialsError::ClearFailed("Mock clear failure".to_string()));
        }
        state.credentials = Credentials::default();
        Ok(())
    }
}
