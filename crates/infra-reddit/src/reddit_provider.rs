// Reddit search provider

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

use pollwatch_core::domain::{Item, SortMode};
use pollwatch_core::port::{SearchError, SearchProvider};

use crate::listing::Listing;

const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_USER_AGENT: &str = concat!("pollwatch/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

/// Reddit adapter configuration
#[derive(Debug, Clone)]
pub struct RedditConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Minimum spacing between two requests, shared by all lanes
    pub min_request_interval: Duration,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            min_request_interval: DEFAULT_MIN_REQUEST_INTERVAL,
        }
    }
}

/// SearchProvider backed by Reddit's public search listing
pub struct RedditSearchProvider {
    client: reqwest::Client,
    config: RedditConfig,
    last_request: Mutex<Option<Instant>>,
}

impl RedditSearchProvider {
    /// Create a new provider
    ///
    /// # Errors
    /// `SearchError::Unavailable` if the HTTP client cannot be built
    pub fn new(config: RedditConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            config,
            last_request: Mutex::new(None),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search.json", self.config.base_url.trim_end_matches('/'))
    }

    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.config.min_request_interval {
                sleep(self.config.min_request_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl SearchProvider for RedditSearchProvider {
    async fn search(
        &self,
        query: &str,
        sort_mode: SortMode,
        window_size: u32,
    ) -> Result<Vec<Item>, SearchError> {
        self.throttle().await;

        let limit = window_size.to_string();
        debug!(query = %query, sort = %sort_mode, limit = window_size, "Searching reddit");

        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("q", query),
                ("sort", sort_mode.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(listing.into_items())
    }
}
