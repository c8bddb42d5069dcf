//! Mock HTTP client for testing.
//!
//! Provides a scripted transport that returns queued responses or errors per
//! URL and records every request it sees.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{HttpClient, HttpError, Request, Response};

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// A response with `status` and a plain body.
    pub fn status(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(body.to_string())))
    }

    /// A response with `status` and a JSON body.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(body.to_string())))
    }
}

#[derive(Debug, Default)]
struct State {
    /// Queued responses by URL. The last entry of a queue is sticky.
    responses: HashMap<String, VecDeque<MockResponse>>,
    default_response: Option<MockResponse>,
    requests: Vec<Request>,
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use securesocial::adapters::mock::{MockHttpClient, MockResponse};
/// use securesocial::traits::{HttpClient, Request};
///
/// let client = MockHttpClient::new();
/// client.push_response("https://api.example.com/data", MockResponse::status(401, ""));
/// client.push_response("https://api.example.com/data", MockResponse::status(200, "ok"));
///
/// let first = client.execute(&Request::get("https://api.example.com/data")).await?;
/// assert_eq!(first.status, 401);
/// let second = client.execute(&Request::get("https://api.example.com/data")).await?;
/// assert_eq!(second.status, 200);
/// assert_eq!(client.get_requests().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<State>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a response for a URL. URLs match exactly first, then by prefix.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        self.state()
            .responses
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    /// Replace any queued responses for a URL with a single sticky one.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.state()
            .responses
            .insert(url.to_string(), VecDeque::from([response]));
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        self.state().default_response = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<Request> {
        self.state().requests.clone()
    }

    /// Recorded requests whose URL starts with `url`.
    pub fn requests_to(&self, url: &str) -> Vec<Request> {
        self.state()
            .requests
            .iter()
            .filter(|r| r.url.starts_with(url))
            .cloned()
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    fn next_response(state: &mut State, url: &str) -> Option<MockResponse> {
        let key = if state.responses.contains_key(url) {
            Some(url.to_string())
        } else {
            state
                .responses
                .keys()
                .filter(|pattern| url.starts_with(pattern.as_str()))
                .max_by_key(|pattern| pattern.len())
                .cloned()
        };

        if let Some(queue) = key.and_then(|k| state.responses.get_mut(&k)) {
            if queue.len() > 1 {
                return queue.pop_front();
            }
            return queue.front().cloned();
        }

        state.default_response.clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: &Request) -> Result<Response, HttpError> {
        let mut state = self.state();
        state.requests.push(request.clone());

        match Self::next_response(&mut state, &request.url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for URL: {}",
                request.url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_responses_then_sticky() {
        let client = MockHttpClient::new();
        client.push_response("https://x/a", MockResponse::status(401, ""));
        client.push_response("https://x/a", MockResponse::status(200, "ok"));

        let statuses = [
            client.execute(&Request::get("https://x/a")).await.unwrap().status,
            client.execute(&Request::get("https://x/a")).await.unwrap().status,
            client.execute(&Request::get("https://x/a")).await.unwrap().status,
        ];

        assert_eq!(statuses, [401, 200, 200]);
        assert_eq!(client.get_requests().len(), 3);
    }

    #[tokio::test]
    async fn test_prefix_match_prefers_longest() {
        let client = MockHttpClient::new();
        client.set_response("https://x/", MockResponse::status(404, ""));
        client.set_response("https://x/api", MockResponse::status(200, ""));

        let response = client.execute(&Request::get("https://x/api/posts")).await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_default_and_missing() {
        let client = MockHttpClient::new();
        assert!(client.execute(&Request::get("https://x/none")).await.is_err());

        client.set_default_response(MockResponse::status(204, ""));
        let response = client.execute(&Request::get("https://x/none")).await.unwrap();
        assert_eq!(response.status, 204);
    }

    #[tokio::test]
    async fn test_error_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://x/a",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let err = client.execute(&Request::get("https://x/a")).await.unwrap_err();
        assert!(matches!(err, HttpError::ConnectionFailed(_)));
    }
}
