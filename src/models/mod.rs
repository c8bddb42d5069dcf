//! Request and response bodies of the SecureSocial service.
//!
//! Field names follow the service's camelCase JSON. Timestamps are epoch
//! milliseconds.

mod activity;
mod auth;
mod post;

pub use activity::{ActivityAction, ActivityLogEntry};
pub use auth::{AuthResponse, LoginRequest, OtpRequest, RegisterRequest};
pub use post::{Comment, CommentRequest, Post, PostLike, PostRequest, PostSummary};

use chrono::{DateTime, Utc};

/// Convert an epoch-millisecond timestamp to UTC.
pub fn millis_to_utc(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_utc() {
        let ts = millis_to_utc(1_700_000_000_000).unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }
}
