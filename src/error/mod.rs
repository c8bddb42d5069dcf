//! Unified error handling for the SecureSocial client.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain-specific Errors**: [`NetworkError`] and [`AuthError`]
//! - **Unified Error Type**: [`SocialError`] consolidates them
//! - **Error Context**: operation, URL and retry count attached to errors
//! - **Result Type Alias**: [`SocialResult<T>`]
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Auth | Session invalid, sign in again | No |
//! | Server | Backend errors (5xx), bad payloads | Yes |
//! | User | Rejected requests (4xx) | No |
//! | System | Local credential storage | No |

mod auth;
mod category;
mod context;
mod network;
mod result;
mod social_error;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use network::{classify_http_error, NetworkError};
pub use result::{ResultExt, SocialResult};
pub use social_error::SocialError;
