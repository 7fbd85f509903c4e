// Search Provider Port
// Abstraction over the data-fetch capability polled by every job round

use crate::domain::{Item, SortMode};
use async_trait::async_trait;
use thiserror::Error;

/// Search errors (all treated as transient by the worker)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Search Provider trait
///
/// Implementations:
/// - RedditSearchProvider: Reddit search listing over HTTPS
/// - mocks::ScriptedSearchProvider: canned batches for tests
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch one batch for `query`, newest item first
    ///
    /// # Errors
    /// Any `SearchError` makes the calling round behave as if the batch was empty
    async fn search(
        &self,
        query: &str,
        sort_mode: SortMode,
        window_size: u32,
    ) -> Result<Vec<Item>, SearchError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// One scripted response
    #[derive(Debug, Clone)]
    pub enum MockResponse {
        Batch(Vec<Item>),
        Fail(SearchError),
    }

    #[derive(Default)]
    struct QueryState {
        script: VecDeque<MockResponse>,
        last: Option<MockResponse>,
        calls: usize,
        running: usize,
        max_running: usize,
    }

    /// Mock Search Provider for testing
    ///
    /// Each query replays its script in order; once exhausted the last
    /// response repeats (an empty batch if nothing was scripted). Tracks the
    /// peak number of concurrent calls per query.
    #[derive(Clone, Default)]
    pub struct ScriptedSearchProvider {
        queries: Arc<Mutex<HashMap<String, QueryState>>>,
        delay: Duration,
    }

    impl ScriptedSearchProvider {
        pub fn new() -> Self {
            Self::default()
        }

        /// Hold every call for `delay` before answering
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn push_batch(&self, query: &str, ids: &[&str]) {
            let items = ids
                .iter()
                .map(|id| Item::new(*id, format!("{} {}", query, id)))
                .collect();
            self.push(query, MockResponse::Batch(items));
        }

        pub fn push_failure(&self, query: &str, error: SearchError) {
            self.push(query, MockResponse::Fail(error));
        }

        pub fn push(&self, query: &str, response: MockResponse) {
            self.queries
                .lock()
                .unwrap()
                .entry(query.to_string())
                .or_default()
                .script
                .push_back(response);
        }

        pub fn call_count(&self, query: &str) -> usize {
            self.queries
                .lock()
                .unwrap()
                .get(query)
                .map(|state| state.calls)
                .unwrap_or(0)
        }

        /// Highest number of overlapping calls observed for `query`
        pub fn max_concurrent(&self, query: &str) -> usize {
            self.queries
                .lock()
                .unwrap()
                .get(query)
                .map(|state| state.max_running)
                .unwrap_or(0)
        }

        fn next_response(&self, query: &str) -> MockResponse {
            let mut queries = self.queries.lock().unwrap();
            let state = queries.entry(query.to_string()).or_default();
            state.calls += 1;
            state.running += 1;
            state.max_running = state.max_running.max(state.running);

            if let Some(response) = state.script.pop_front() {
                state.last = Some(response.clone());
                response
            } else {
                state
                    .last
                    .clone()
                    .unwrap_or(MockResponse::Batch(Vec::new()))
            }
        }

        fn finish(&self, query: &str) {
            if let Some(state) = self.queries.lock().unwrap().get_mut(query) {
                state.running -= 1;
            }
        }
    }

    #[async_trait]
    impl SearchProvider for ScriptedSearchProvider {
        async fn search(
            &self,
            query: &str,
            _sort_mode: SortMode,
            window_size: u32,
        ) -> Result<Vec<Item>, SearchError> {
            let response = self.next_response(query);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.finish(query);

            match response {
                MockResponse::Batch(mut items) => {
                    items.truncate(window_size as usize);
                    Ok(items)
                }
                MockResponse::Fail(err) => Err(err),
            }
        }
    }
}
