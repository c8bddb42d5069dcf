//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - Transport with scripted responses
//! - [`InMemoryCredentials`] - In-memory credential storage
//! - [`MockTokenRefresher`] - Refresher with scripted outcomes

pub mod credentials;
pub mod http;
pub mod refresh;

pub use credentials::InMemoryCredentials;
pub use http::{MockHttpClient, MockResponse};
pub use refresh::MockTokenRefresher;
