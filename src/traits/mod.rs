//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - Executes a single HTTP request
//! - [`CredentialStore`] - Credential storage and retrieval
//! - [`TokenRefresher`] - Exchanges a refresh token for a new pair

pub mod credentials;
pub mod http;
pub mod refresh;

pub use credentials::{CredentialStore, CredentialsError};
pub use http::{
    Headers, HttpClient, HttpError, Method, Request, Response, AUTHORIZATION, STATUS_UNAUTHORIZED,
};
pub use refresh::{RefreshError, TokenRefresher};
