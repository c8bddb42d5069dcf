//! Client configuration.
//!
//! Values come from defaults, then environment variables, then builder
//! calls.

use std::path::PathBuf;
use std::time::Duration;

use crate::auth::{CredentialsManager, DEFAULT_READ_TIMEOUT};

/// Default URL for the SecureSocial service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default timeout for a single HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_URL: &str = "SECURESOCIAL_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "SECURESOCIAL_TIMEOUT_SECS";
pub const ENV_SINGLE_FLIGHT: &str = "SECURESOCIAL_SINGLE_FLIGHT";
pub const ENV_CREDENTIALS: &str = "SECURESOCIAL_CREDENTIALS";

/// Configuration for [`crate::api::AuthenticatedClient`].
///
/// # Example
///
/// ```ignore
/// use securesocial::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_base_url("http://10.0.2.2:8080")
///     .with_single_flight(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Service root, without trailing slash.
    pub base_url: String,
    /// Timeout applied to every HTTP request, refresh included.
    pub request_timeout: Duration,
    /// Bound on each credential store read made by the pipeline.
    pub credential_read_timeout: Duration,
    /// Deduplicate concurrent refreshes.
    pub single_flight: bool,
    /// Credentials file. `None` when no home directory could be found.
    pub credentials_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            credential_read_timeout: DEFAULT_READ_TIMEOUT,
            single_flight: false,
            credentials_path: CredentialsManager::new()
                .map(|m| m.credentials_path().to_path_buf()),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_credential_read_timeout(mut self, timeout: Duration) -> Self {
        self.credential_read_timeout = timeout;
        self
    }

    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled;
        self
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Create config from the `SECURESOCIAL_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    config.request_timeout = Duration::from_secs(secs);
                }
                _ => tracing::warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT_SECS, raw),
            }
        }

        if let Some(raw) = lookup(ENV_SINGLE_FLIGHT) {
            config.single_flight = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(path) = lookup(ENV_CREDENTIALS).filter(|v| !v.trim().is_empty()) {
            config.credentials_path = Some(PathBuf::from(path));
        }

        config
    }
}
