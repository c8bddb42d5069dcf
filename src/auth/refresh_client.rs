//! Refresh client for exchanging a refresh token against the service.
//!
//! Owns its own `reqwest::Client` and never goes through the interceptor or
//! authenticator.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::credentials::TokenPair;
use crate::traits::{RefreshError, TokenRefresher};

/// Body of `POST /auth/refresh`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// HTTP client for the refresh endpoint.
#[derive(Debug, Clone)]
pub struct RefreshClient {
    client: Client,
    base_url: String,
}

impl RefreshClient {
    /// Create a refresh client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RefreshError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        Ok(Self::with_client(base_url, client))
    }

    /// Create a refresh client around an existing `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange `refresh_token` for a new token pair.
    ///
    /// POST /auth/refresh
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, RefreshError> {
        let url = format!("{}/auth/refresh", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RefreshError::Rejected { status, message });
        }

        let text = response
            .text()
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        let pair: TokenPair = serde_json::from_str(&text)
            .map_err(|e| RefreshError::InvalidPayload(e.to_string()))?;

        if pair.access_token.trim().is_empty() || pair.refresh_token.trim().is_empty() {
            return Err(RefreshError::InvalidPayload(
                "token pair contains an empty token".to_string(),
            ));
        }

        Ok(pair)
    }
}

#[async_trait]
impl TokenRefresher for RefreshClient {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, RefreshError> {
        self.refresh_token(refresh_token).await
    }
}
