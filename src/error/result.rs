//! Result type alias for SecureSocial operations.

use super::context::ErrorContext;
use super::social_error::SocialError;

/// Type alias for Results using SocialError.
pub type SocialResult<T> = Result<T, SocialError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use securesocial::error::{ErrorContext, ResultExt};
    ///
    /// let posts = api.all_posts().await.context(ErrorContext::new("posts.list"))?;
    /// ```
    fn context(self, ctx: ErrorContext) -> SocialResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> SocialResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<SocialError>,
{
    fn context(self, ctx: ErrorContext) -> SocialResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> SocialResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
