//! Dependency initialization and wiring for the feed search indexer.

use std::sync::Arc;
use tracing::info;

use super::IndexerConfig;
use crate::IndexerError;
use feed_search_repository::FeedSearchClient;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The search client, backed by OpenSearch and logging through tracing.
    pub client: Arc<FeedSearchClient>,
}

impl Dependencies {
    /// Initialize all dependencies from the given configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexerError)` - If the client cannot be created or the
    ///   search service is unreachable or unhealthy
    pub async fn new(config: &IndexerConfig) -> Result<Self, IndexerError> {
        info!(
            search_url = %config.search.url,
            search_target = %config.search.search_target,
            "Initializing dependencies"
        );

        let client = FeedSearchClient::connect(config.search.clone())
            .map_err(|e| IndexerError::config(format!("Failed to create search client: {}", e)))?;

        // Verify the search service is reachable
        let healthy = client
            .health_check()
            .await
            .map_err(|e| IndexerError::config(format!("Search health check failed: {}", e)))?;

        if !healthy {
            return Err(IndexerError::config("Search cluster is unhealthy"));
        }

        info!("Search connection verified");

        Ok(Self {
            client: Arc::new(client),
        })
    }
}
