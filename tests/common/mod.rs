//! Common test utilities for integration tests.
//!
//! Builds the production stack (reqwest transport, file credential store,
//! refresh client) against a wiremock server.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use securesocial::adapters::{FileCredentialStore, ReqwestHttpClient};
use securesocial::api::AuthenticatedClient;
use securesocial::auth::{RefreshClient, TokenPair};
use securesocial::config::ClientConfig;
use securesocial::traits::CredentialStore;
use tempfile::TempDir;

/// A client wired to `base_url` with credentials in a temporary directory.
pub struct TestStack {
    pub client: AuthenticatedClient,
    pub store: FileCredentialStore,
    /// Keeps the credentials directory alive for the test.
    pub dir: TempDir,
}

impl TestStack {
    pub fn credentials_path(&self) -> PathBuf {
        self.store.credentials_path().to_path_buf()
    }

    pub async fn tokens(&self) -> (Option<String>, Option<String>) {
        (
            self.store.get_access_token().await.unwrap(),
            self.store.get_refresh_token().await.unwrap(),
        )
    }
}

/// Build a stack through [`AuthenticatedClient::from_config`].
pub fn stack(base_url: &str, single_flight: bool) -> TestStack {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");
    let config = ClientConfig::new()
        .with_base_url(base_url)
        .with_request_timeout(Duration::from_secs(5))
        .with_credentials_path(&path)
        .with_single_flight(single_flight);

    let client = AuthenticatedClient::from_config(&config).unwrap();
    TestStack {
        client,
        store: FileCredentialStore::with_path(&path),
        dir,
    }
}

/// Build a stack by hand, for tests that need the parts.
pub fn manual_stack(base_url: &str) -> TestStack {
    let dir = TempDir::new().unwrap();
    let store = FileCredentialStore::with_path(dir.path().join("credentials.json"));
    let client = AuthenticatedClient::new(
        base_url,
        Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(5)).unwrap()),
        Arc::new(store.clone()),
        Arc::new(RefreshClient::new(base_url, Duration::from_secs(5)).unwrap()),
    );
    TestStack { client, store, dir }
}

/// Store a token pair the way a previous login would have.
pub async fn seed_tokens(stack: &TestStack, access: &str, refresh: &str) {
    stack
        .store
        .save_tokens(&TokenPair::new(access, refresh))
        .await
        .unwrap();
}
