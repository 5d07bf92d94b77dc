//! Feed search client implementation.
//!
//! This module provides the main client for interacting with the search
//! store. Application code uses it to create, update, delete, fetch and
//! look up feed documents, and to merge-upsert feed items so their group and
//! feed memberships accumulate across publications.

use std::sync::Arc;

use crate::config::SearchClientConfig;
use crate::errors::SearchError;
use crate::interfaces::{DocumentStore, OperationLogger, TracingLogger};
use crate::merge::merge_with_stored;
use crate::opensearch::OpenSearchStore;
use crate::types::{
    CandidateDocument, ScriptUpdate, SearchByIdsRequest, SearchHits, StoredDocument,
    UpsertOutcome, WriteResponse,
};

/// The main client for interacting with the search store.
///
/// Every store interaction that fails is reported through the injected
/// `OperationLogger` before the error is returned.
pub struct FeedSearchClient {
    store: Arc<dyn DocumentStore>,
    logger: Arc<dyn OperationLogger>,
    config: SearchClientConfig,
}

impl FeedSearchClient {
    /// Create a new FeedSearchClient with default configuration.
    pub fn new(store: Arc<dyn DocumentStore>, logger: Arc<dyn OperationLogger>) -> Self {
        Self {
            store,
            logger,
            config: SearchClientConfig::default(),
        }
    }

    /// Create a new FeedSearchClient with custom configuration.
    pub fn with_config(
        store: Arc<dyn DocumentStore>,
        logger: Arc<dyn OperationLogger>,
        config: SearchClientConfig,
    ) -> Self {
        Self {
            store,
            logger,
            config,
        }
    }

    /// Create a client backed by an `OpenSearchStore` that logs through `tracing`.
    pub fn connect(config: SearchClientConfig) -> Result<Self, SearchError> {
        let store = OpenSearchStore::new(&config)?;
        Ok(Self::with_config(
            Arc::new(store),
            Arc::new(TracingLogger),
            config,
        ))
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &SearchClientConfig {
        &self.config
    }

    /// Check the document address before sending anything to the store.
    fn validate_address(index: &str, uuid: &str) -> Result<(), SearchError> {
        if index.is_empty() {
            return Err(SearchError::validation("index is required"));
        }
        if uuid.is_empty() {
            return Err(SearchError::validation("uuid is required"));
        }
        Ok(())
    }

    /// Look up documents by id across the configured search target.
    /// Input: SearchByIdsRequest (ids, optional source field filter)
    /// Output: Result<SearchHits, SearchError>
    pub async fn search_by_ids(
        &self,
        request: &SearchByIdsRequest,
    ) -> Result<SearchHits, SearchError> {
        if request.ids.is_empty() {
            return Ok(SearchHits::default());
        }

        self.store
            .search_by_ids(&self.config.search_target, request)
            .await
            .inspect_err(|e| self.logger.error(&format!("Search by ids failed: {}", e)))
    }

    /// Fetch a document.
    /// Input: index, uuid
    /// Output: Result<Option<StoredDocument>, SearchError> (None when absent)
    pub async fn get(&self, index: &str, uuid: &str) -> Result<Option<StoredDocument>, SearchError> {
        Self::validate_address(index, uuid)?;

        self.store
            .get(index, uuid)
            .await
            .inspect_err(|e| self.logger.error(&format!("Get failed: {}", e)))
    }

    /// Index a document under the given uuid, replacing any existing one.
    /// Input: index, uuid, CandidateDocument (`version` is dropped)
    /// Output: Result<WriteResponse, SearchError>
    pub async fn create(
        &self,
        index: &str,
        uuid: &str,
        body: &CandidateDocument,
    ) -> Result<WriteResponse, SearchError> {
        Self::validate_address(index, uuid)?;

        self.store
            .create(index, uuid, &body.to_document())
            .await
            .inspect_err(|e| self.logger.error(&format!("Create failed: {}", e)))
    }

    /// Delete a document.
    /// Input: index, uuid
    /// Output: Result<WriteResponse, SearchError> (`not_found` result when absent)
    pub async fn delete(&self, index: &str, uuid: &str) -> Result<WriteResponse, SearchError> {
        Self::validate_address(index, uuid)?;

        self.store
            .delete(index, uuid)
            .await
            .inspect_err(|e| self.logger.error(&format!("Delete failed: {}", e)))
    }

    /// Apply a partial update, falling back to a full create if the update fails.
    /// Input: index, uuid, CandidateDocument (`version` is dropped)
    /// Output: Result<WriteResponse, SearchError> (the create error when both fail)
    pub async fn update(
        &self,
        index: &str,
        uuid: &str,
        body: &CandidateDocument,
    ) -> Result<WriteResponse, SearchError> {
        Self::validate_address(index, uuid)?;

        let document = body.to_document();
        match self.store.update(index, uuid, &document).await {
            Ok(response) => Ok(response),
            Err(update_err) => {
                self.logger.error(&format!(
                    "Update failed: {}. Trying to create",
                    update_err
                ));
                self.store
                    .create(index, uuid, &document)
                    .await
                    .inspect_err(|e| {
                        self.logger
                            .error(&format!("Trying to create failed too: {}", e))
                    })
            }
        }
    }

    /// Run a script against an existing document.
    /// Input: index, uuid, ScriptUpdate (painless by default)
    /// Output: Result<WriteResponse, SearchError>
    pub async fn update_script(
        &self,
        index: &str,
        uuid: &str,
        script: &ScriptUpdate,
    ) -> Result<WriteResponse, SearchError> {
        Self::validate_address(index, uuid)?;
        if script.source.is_empty() {
            return Err(SearchError::validation("script source is required"));
        }

        self.store
            .update_script(index, uuid, script)
            .await
            .inspect_err(|e| self.logger.error(&format!("Update failed: {}", e)))
    }

    /// Write a feed item, merging its memberships with the stored copy.
    /// Input: index, uuid, CandidateDocument
    /// Output: Result<UpsertOutcome, SearchError>
    ///
    /// If a document exists and differs from the candidate, `groups` and
    /// `news_feed_uuids` become the union of both sides and every other field
    /// takes the candidate's value. A document that is identical to the
    /// candidate, or already holds the merged result, is left untouched.
    /// A failed update is retried once as a create; only a failure of the
    /// last attempted write is returned.
    ///
    /// The read and the write are separate requests, so concurrent upserts of
    /// the same uuid can lose memberships.
    pub async fn upsert(
        &self,
        index: &str,
        uuid: &str,
        body: CandidateDocument,
    ) -> Result<UpsertOutcome, SearchError> {
        Self::validate_address(index, uuid)?;

        let current = match self.store.get(index, uuid).await {
            Ok(Some(current)) => Some(current),
            Ok(None) => {
                self.logger.info(&format!("Upsert. Not in store: {}", uuid));
                None
            }
            // Any fetch failure is handled the same way as a missing document
            Err(e) => {
                self.logger.warn(&format!(
                    "Upsert. Fetch failed for {}, writing as new: {}",
                    uuid, e
                ));
                None
            }
        };

        let Some(current) = current else {
            return self
                .store
                .create(index, uuid, &body.to_document())
                .await
                .map(UpsertOutcome::Created)
                .inspect_err(|e| {
                    self.logger
                        .error(&format!("Upsert failed with strategy create: {}", e))
                });
        };

        if current.source == body.to_document() {
            self.logger.info(&format!("Document not changed: {}", uuid));
            return Ok(UpsertOutcome::Unchanged);
        }

        let merged = merge_with_stored(&body, &current.source);

        // Stored memberships the candidate lacks already went in on an earlier write
        if current.source.covers(&merged) {
            self.logger.info(&format!("Document not changed: {}", uuid));
            return Ok(UpsertOutcome::Unchanged);
        }

        match self.store.update(index, uuid, &merged).await {
            Ok(response) => Ok(UpsertOutcome::Updated(response)),
            Err(update_err) => {
                self.logger.warn(&format!(
                    "Upsert with strategy update failed. Fallback create: {}",
                    update_err
                ));
                self.store
                    .create(index, uuid, &merged)
                    .await
                    .map(UpsertOutcome::Created)
                    .inspect_err(|e| {
                        self.logger.error(&format!(
                            "Upsert with strategy update fallbacking create failed: {}",
                            e
                        ))
                    })
            }
        }
    }

    /// Check if the underlying search service is healthy.
    pub async fn health_check(&self) -> Result<bool, SearchError> {
        self.store.health_check().await
    }
}
