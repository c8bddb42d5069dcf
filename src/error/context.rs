//! Error context for enriched error information.

use chrono::{DateTime, Utc};

/// Context information attached to errors for debugging.
///
/// Records which API operation failed, for which request, and how many
/// authentication retries the request went through first.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Name of the API operation that failed (e.g. `posts.like`).
    pub operation: String,

    /// Request URL, when known.
    pub url: Option<String>,

    /// Per-call id also recorded on the request's tracing span.
    pub request_id: Option<String>,

    /// Number of authentication retries made before this error.
    pub retry_count: u32,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            url: None,
            request_id: None,
            retry_count: 0,
            timestamp: Utc::now(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref url) = self.url {
            parts.push(format!("url={}", url));
        }
        if let Some(ref request_id) = self.request_id {
            parts.push(format!("request_id={}", request_id));
        }
        if self.retry_count > 0 {
            parts.push(format!("retry_count={}", self.retry_count));
        }
        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref url) = self.url {
            write!(f, " url={}", url)?;
        }
        if self.retry_count > 0 {
            write!(f, " retry={}", self.retry_count)?;
        }

        Ok(())
    }
}
