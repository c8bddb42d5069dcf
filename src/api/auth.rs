//! Account endpoints: registration, login, email verification.

use std::collections::HashMap;

use tracing::info;

use super::client::AuthenticatedClient;
use crate::auth::UserInfo;
use crate::error::SocialResult;
use crate::models::{AuthResponse, LoginRequest, OtpRequest, RegisterRequest};
use crate::traits::{CredentialStore, Request};

/// Account operations. Obtain through [`AuthenticatedClient::auth`].
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a AuthenticatedClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a AuthenticatedClient) -> Self {
        Self { client }
    }

    /// POST auth/register. Returns the server's message.
    pub async fn register(&self, request: &RegisterRequest) -> SocialResult<String> {
        let http = Request::post(self.client.url("auth/register")).with_json(request)?;
        self.client.send_text("auth.register", http).await
    }

    /// POST auth/login, then persist the returned tokens and profile.
    pub async fn login(&self, request: &LoginRequest) -> SocialResult<AuthResponse> {
        let response: AuthResponse = self
            .client
            .post_json("auth.login", "auth/login", request)
            .await?;

        let store = self.client.store();
        store.save_tokens(&response.tokens()).await?;
        store.save_user(&response.user()).await?;

        info!("Logged in as {}", response.username);
        Ok(response)
    }

    /// GET auth/check-username. True when the name is free.
    pub async fn check_username(&self, username: &str) -> SocialResult<bool> {
        let path = format!(
            "auth/check-username?username={}",
            urlencoding::encode(username)
        );
        let result: HashMap<String, bool> =
            self.client.get_json("auth.check_username", &path).await?;
        Ok(result.get("available").copied().unwrap_or(false))
    }

    /// POST auth/verify-otp. Returns the server's message.
    pub async fn verify_otp(&self, request: &OtpRequest) -> SocialResult<String> {
        let http = Request::post(self.client.url("auth/verify-otp")).with_json(request)?;
        self.client.send_text("auth.verify_otp", http).await
    }

    /// POST auth/resend-otp. Returns the server's message.
    pub async fn resend_otp(&self, email: &str) -> SocialResult<String> {
        let url = self
            .client
            .url(&format!("auth/resend-otp?email={}", urlencoding::encode(email)));
        self.client.send_text("auth.resend_otp", Request::post(url)).await
    }

    /// Forget the session. Purely local.
    pub async fn logout(&self) -> SocialResult<()> {
        self.client.store().clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// The stored profile, if a user is logged in.
    pub async fn current_user(&self) -> SocialResult<Option<UserInfo>> {
        Ok(self.client.store().get_user_info().await?)
    }
}
