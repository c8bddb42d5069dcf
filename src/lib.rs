//! SecureSocial client.
//!
//! Typed access to the SecureSocial posting service. Requests carry the
//! stored access token; when the service answers 401 the token pair is
//! rotated through `POST /auth/refresh` and the request is retried, so
//! callers only see an authentication error once the session is really gone.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod traits;
