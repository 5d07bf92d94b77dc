//! Configuration types for the FeedSearchClient.

use std::time::Duration;

/// Default search service URL.
pub const DEFAULT_SEARCH_URL: &str = "http://localhost:9200";

/// Default target for id lookups: every index in the cluster.
pub const DEFAULT_SEARCH_TARGET: &str = "_all";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the search client and its OpenSearch store.
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Search service URL (e.g., "http://localhost:9200").
    pub url: String,
    /// Index pattern used by `search_by_ids`.
    pub search_target: String,
    /// Timeout applied by the transport to every request.
    pub request_timeout: Duration,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SEARCH_URL.to_string(),
            search_target: DEFAULT_SEARCH_TARGET.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SearchClientConfig {
    /// Create a config for the given URL with default settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Restrict `search_by_ids` to the given index or pattern.
    pub fn with_search_target(mut self, search_target: impl Into<String>) -> Self {
        self.search_target = search_target.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}
