//! Typed client for the SecureSocial service.
//!
//! All endpoints share one [`AuthenticatedClient`]; the endpoint groups are
//! thin borrowed views over it.
//!
//! ```ignore
//! use securesocial::api::AuthenticatedClient;
//! use securesocial::config::ClientConfig;
//!
//! let client = AuthenticatedClient::from_config(&ClientConfig::from_env())?;
//! for post in client.posts().all_posts().await? {
//!     println!("{}: {}", post.id, post.title);
//! }
//! ```

mod activity;
mod auth;
mod client;
mod posts;

pub use activity::ActivityApi;
pub use auth::AuthApi;
pub use client::AuthenticatedClient;
pub use posts::PostsApi;

impl AuthenticatedClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi::new(self)
    }

    pub fn activity(&self) -> ActivityApi<'_> {
        ActivityApi::new(self)
    }
}
