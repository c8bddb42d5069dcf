//! Authentication for the SecureSocial client.
//!
//! This module provides:
//! - Credential snapshot types and the file-backed credentials manager
//! - The refresh client for `POST /auth/refresh`
//! - Bearer-token attachment for outgoing requests
//! - 401 recovery through token rotation

pub mod authenticator;
pub mod credentials;
pub mod interceptor;
pub mod refresh_client;

pub use authenticator::{TokenAuthenticator, MAX_CHAIN_DEPTH};
pub use credentials::{Credentials, CredentialsManager, TokenPair, UserInfo};
pub use interceptor::{AuthInterceptor, DEFAULT_READ_TIMEOUT};
pub use refresh_client::RefreshClient;
