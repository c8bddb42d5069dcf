//! Scripted token refresher for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::auth::TokenPair;
use crate::traits::{RefreshError, TokenRefresher};

#[derive(Debug, Default)]
struct State {
    outcomes: VecDeque<Result<TokenPair, RefreshError>>,
    calls: Vec<String>,
    delay: Option<Duration>,
}

/// Token refresher that replays queued outcomes and records every refresh
/// token it was asked to exchange.
///
/// The last queued outcome is sticky. With nothing queued every call fails
/// with [`RefreshError::Transport`].
#[derive(Debug, Clone, Default)]
pub struct MockTokenRefresher {
    state: Arc<Mutex<State>>,
}

impl MockTokenRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A refresher that always succeeds with `pair`.
    pub fn succeeding(pair: TokenPair) -> Self {
        let refresher = Self::new();
        refresher.push_outcome(Ok(pair));
        refresher
    }

    /// A refresher that always fails with `err`.
    pub fn failing(err: RefreshError) -> Self {
        let refresher = Self::new();
        refresher.push_outcome(Err(err));
        refresher
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push_outcome(&self, outcome: Result<TokenPair, RefreshError>) {
        self.state().outcomes.push_back(outcome);
    }

    /// Make every call take `delay` before answering.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.state().delay = delay;
    }

    /// Refresh tokens passed to each call, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }
}

#[async_trait]
impl TokenRefresher for MockTokenRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, RefreshError> {
        let delay = {
            let mut state = self.state();
            state.calls.push(refresh_token.to_string());
            state.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state();
        let outcome = if state.outcomes.len() > 1 {
            state.outcomes.pop_front()
        } else {
            state.outcomes.front().cloned()
        };
        outcome.unwrap_or_else(|| Err(RefreshError::Transport("no mock outcome".to_string())))
    }
}
