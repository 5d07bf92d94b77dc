//! Document store trait definition.
//!
//! This module defines the abstract interface for the primitive document
//! operations the client builds on, allowing for different backend
//! implementations (OpenSearch, Elasticsearch, in-memory mocks, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::types::{
    Document, ScriptUpdate, SearchByIdsRequest, SearchHits, StoredDocument, WriteResponse,
};

/// Abstract interface for document store operations.
///
/// Documents are addressed by index name and id. Absence of a document on
/// fetch is reported as `Ok(None)` so callers can tell it apart from
/// transport or server failures.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(StoredDocument))` - The document and its metadata
    /// * `Ok(None)` - If no document exists at the address
    /// * `Err(SearchError)` - If the fetch fails for any other reason
    async fn get(&self, index: &str, id: &str) -> Result<Option<StoredDocument>, SearchError>;

    /// Index a document under the given id, replacing any existing document.
    ///
    /// # Returns
    ///
    /// * `Ok(WriteResponse)` - The store's acknowledgement
    /// * `Err(SearchError::CreateError)` - If indexing fails
    async fn create(
        &self,
        index: &str,
        id: &str,
        document: &Document,
    ) -> Result<WriteResponse, SearchError>;

    /// Apply a partial document to an existing document.
    ///
    /// Top-level fields in `document` overwrite the stored ones; fields not
    /// mentioned are left unchanged.
    ///
    /// # Returns
    ///
    /// * `Ok(WriteResponse)` - The store's acknowledgement
    /// * `Err(SearchError::NotFound)` - If the document doesn't exist
    /// * `Err(SearchError::UpdateError)` - If the update fails
    async fn update(
        &self,
        index: &str,
        id: &str,
        document: &Document,
    ) -> Result<WriteResponse, SearchError>;

    /// Delete a document.
    ///
    /// # Returns
    ///
    /// * `Ok(WriteResponse)` - With `result` set to `deleted` or `not_found`
    /// * `Err(SearchError::DeleteError)` - If the deletion fails
    async fn delete(&self, index: &str, id: &str) -> Result<WriteResponse, SearchError>;

    /// Run a script against an existing document.
    ///
    /// # Returns
    ///
    /// * `Ok(WriteResponse)` - The store's acknowledgement
    /// * `Err(SearchError)` - If the document doesn't exist or the script fails
    async fn update_script(
        &self,
        index: &str,
        id: &str,
        script: &ScriptUpdate,
    ) -> Result<WriteResponse, SearchError>;

    /// Fetch documents by id from every index matching `target`.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchHits)` - The matching documents
    /// * `Err(SearchError::QueryError)` - If the search fails
    async fn search_by_ids(
        &self,
        target: &str,
        request: &SearchByIdsRequest,
    ) -> Result<SearchHits, SearchError>;

    /// Check if the search service is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the service is healthy
    /// * `Ok(false)` - If the service is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
