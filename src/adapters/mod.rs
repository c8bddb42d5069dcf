//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`FileCredentialStore`] - File-based credential storage
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Scripted HTTP responses
//! - [`mock::InMemoryCredentials`] - In-memory credential storage
//! - [`mock::MockTokenRefresher`] - Scripted refresh outcomes

pub mod file_credentials;
pub mod mock;
pub mod reqwest_http;

pub use file_credentials::FileCredentialStore;
pub use mock::{InMemoryCredentials, MockHttpClient, MockResponse, MockTokenRefresher};
pub use reqwest_http::ReqwestHttpClient;
