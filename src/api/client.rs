//! The authenticated request pipeline.
//!
//! Every API call flows through [`AuthenticatedClient::execute`]:
//!
//! 1. the interceptor attaches the stored access token (once per call)
//! 2. the transport sends the request
//! 3. a 401 goes to the authenticator, which either hands back a request to
//!    retry (the chain depth grows by one) or gives up, in which case the
//!    401 itself is returned

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn, Instrument};
use uuid::Uuid;

use crate::adapters::{FileCredentialStore, ReqwestHttpClient};
use crate::auth::{AuthInterceptor, RefreshClient, TokenAuthenticator};
use crate::config::ClientConfig;
use crate::error::{
    classify_http_error, AuthError, ErrorContext, NetworkError, ResultExt, SocialError,
    SocialResult,
};
use crate::traits::{CredentialStore, HttpClient, HttpError, Request, Response, TokenRefresher};

/// Longest response body quoted in an error message.
const MAX_ERROR_BODY: usize = 200;

/// HTTP client that authenticates requests and recovers from expired tokens.
#[derive(Clone)]
pub struct AuthenticatedClient {
    base_url: String,
    transport: Arc<dyn HttpClient>,
    store: Arc<dyn CredentialStore>,
    interceptor: AuthInterceptor,
    authenticator: TokenAuthenticator,
}

impl AuthenticatedClient {
    /// Assemble a client from its parts.
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpClient>,
        store: Arc<dyn CredentialStore>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            interceptor: AuthInterceptor::new(Arc::clone(&store)),
            authenticator: TokenAuthenticator::new(Arc::clone(&store), refresher),
            store,
        }
    }

    /// Build the production stack: reqwest transport, file-backed
    /// credentials and a standalone refresh client.
    pub fn from_config(config: &ClientConfig) -> SocialResult<Self> {
        let transport = ReqwestHttpClient::with_timeout(config.request_timeout)
            .map_err(|e| SocialError::from(classify_http_error(&e, &config.base_url)))?;

        let store = match &config.credentials_path {
            Some(path) => FileCredentialStore::with_path(path),
            None => FileCredentialStore::new()?,
        };

        let refresher = RefreshClient::new(config.base_url.clone(), config.request_timeout)
            .map_err(|e| AuthError::RefreshFailed {
                message: e.to_string(),
            })?;

        Ok(Self::new(
            config.base_url.clone(),
            Arc::new(transport),
            Arc::new(store),
            Arc::new(refresher),
        )
        .with_read_timeout(config.credential_read_timeout)
        .with_single_flight(config.single_flight))
    }

    /// Bound every credential read the pipeline makes.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.interceptor = self.interceptor.with_read_timeout(timeout);
        self.authenticator = self.authenticator.with_read_timeout(timeout);
        self
    }

    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.authenticator = self.authenticator.with_single_flight(enabled);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Absolute URL for a service-relative path such as `api/posts`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Run `request` through the pipeline and return the final response.
    ///
    /// Only transport failures are errors. A 401 the authenticator could
    /// not recover from is returned as a normal response.
    pub async fn execute(&self, request: Request) -> Result<Response, HttpError> {
        let span = tracing::debug_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method,
            url = %request.url
        );
        self.run_chain(request)
            .instrument(span)
            .await
            .map(|(response, _)| response)
            .map_err(|(err, _)| err)
    }

    /// Returns the final response, or the transport error, together with the
    /// number of refresh retries issued before it.
    async fn run_chain(&self, request: Request) -> Result<(Response, u32), (HttpError, u32)> {
        let mut attempt = self.interceptor.intercept(request).await;
        let mut depth = 0;

        loop {
            let response = self
                .transport
                .execute(&attempt)
                .await
                .map_err(|err| (err, depth))?;
            if !response.requires_authentication() {
                return Ok((response, depth));
            }

            match self.authenticator.authenticate(&attempt, depth).await {
                Ok(retry) => {
                    attempt = retry;
                    depth += 1;
                }
                Err(reason) => {
                    debug!(depth, reason = %reason, "returning 401 to caller");
                    return Ok((response, depth));
                }
            }
        }
    }

    /// Execute `request` and turn anything but a 2xx into a [`SocialError`]
    /// tagged with `operation`.
    pub(crate) async fn send(&self, operation: &str, request: Request) -> SocialResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let url = request.url.clone();
        let span = tracing::debug_span!(
            "request",
            operation,
            request_id = %request_id,
            method = %request.method,
            url = %url
        );

        let context = |retry_count: u32| {
            ErrorContext::new(operation)
                .with_url(url.clone())
                .with_request_id(request_id.clone())
                .with_retry_count(retry_count)
        };

        let err = match self.run_chain(request).instrument(span).await {
            Ok((response, _)) if response.is_success() => return Ok(response),
            Ok((response, depth)) => {
                SocialError::from_status(response.status, error_body(&response))
                    .with_context(context(depth))
            }
            Err((err, depth)) => {
                SocialError::from(classify_http_error(&err, &url)).with_context(context(depth))
            }
        };

        if let Some(ctx) = err.context() {
            warn!(code = err.error_code(), "{} {}", err.inner(), ctx.to_log_string());
        }
        Err(err)
    }

    /// GET `path` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
    ) -> SocialResult<T> {
        let response = self.send(operation, Request::get(self.url(path))).await?;
        decode(operation, &response)
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    pub(crate) async fn post_json<B, T>(&self, operation: &str, path: &str, body: &B) -> SocialResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = Request::post(self.url(path)).with_json(body)?;
        let response = self.send(operation, request).await?;
        decode(operation, &response)
    }

    /// Send `request` and return the response body as text.
    pub(crate) async fn send_text(&self, operation: &str, request: Request) -> SocialResult<String> {
        let response = self.send(operation, request).await?;
        response
            .text()
            .map_err(|e| {
                SocialError::from(NetworkError::InvalidResponse {
                    message: e.to_string(),
                })
            })
            .context(ErrorContext::new(operation))
    }
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("base_url", &self.base_url)
            .field("interceptor", &self.interceptor)
            .field("authenticator", &self.authenticator)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(operation: &str, response: &Response) -> SocialResult<T> {
    response.json().context(ErrorContext::new(operation))
}

fn error_body(response: &Response) -> String {
    let text = String::from_utf8_lossy(&response.body);
    let text = text.trim();
    if text.is_empty() {
        return format!("HTTP {}", response.status);
    }
    text.chars().take(MAX_ERROR_BODY).collect()
}
