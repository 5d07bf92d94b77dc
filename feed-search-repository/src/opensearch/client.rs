//! OpenSearch document store implementation.
//!
//! This module provides the concrete implementation of `DocumentStore`
//! using the OpenSearch Rust client. The same HTTP API is served by
//! Elasticsearch 7.x, so the store works against either.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
        StatusCode,
    },
    DeleteParts, GetParts, IndexParts, OpenSearch, SearchParts, UpdateParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::SearchClientConfig;
use crate::errors::SearchError;
use crate::interfaces::DocumentStore;
use crate::opensearch::queries::{
    build_ids_query, build_partial_update, build_script_update, failure_message,
    parse_get_response, parse_hits,
};
use crate::types::{
    Document, ScriptUpdate, SearchByIdsRequest, SearchHits, StoredDocument, WriteResponse,
};

/// OpenSearch-backed document store.
///
/// # Example
///
/// ```ignore
/// let config = SearchClientConfig::new("http://localhost:9200");
/// let store = OpenSearchStore::new(&config)?;
///
/// if let Some(stored) = store.get("newsfeed", "item-1").await? {
///     println!("{:?}", stored.source);
/// }
/// ```
pub struct OpenSearchStore {
    client: OpenSearch,
}

impl OpenSearchStore {
    /// Create a new store connected to the configured URL.
    ///
    /// No request is sent; use `health_check` to verify the service is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchStore)` - A new store instance
    /// * `Err(SearchError)` - If the URL is invalid or transport setup fails
    pub fn new(config: &SearchClientConfig) -> Result<Self, SearchError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            timeout_secs = config.request_timeout.as_secs(),
            "Connecting to search service"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Read a failed response into a single message.
    async fn read_failure(response: Response) -> String {
        let status = response.status_code();
        let body = response.text().await.unwrap_or_default();
        failure_message(status, &body)
    }

    /// Parse a successful write acknowledgement.
    async fn write_response(response: Response) -> Result<WriteResponse, SearchError> {
        response
            .json::<WriteResponse>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for OpenSearchStore {
    #[instrument(skip(self))]
    async fn get(&self, index: &str, id: &str) -> Result<Option<StoredDocument>, SearchError> {
        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| SearchError::get(e.to_string()))?;

        let status = response.status_code();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::get(e.to_string()))?;

        let stored = parse_get_response(status, &body)
            .inspect_err(|e| error!(status = %status, error = %e, "Get request failed"))?;
        if stored.is_none() {
            debug!("Document not found");
        }
        Ok(stored)
    }

    #[instrument(skip(self, document), fields(field_count = document.len()))]
    async fn create(
        &self,
        index: &str,
        id: &str,
        document: &Document,
    ) -> Result<WriteResponse, SearchError> {
        let response = self
            .client
            .index(IndexParts::IndexId(index, id))
            .body(document)
            .send()
            .await
            .map_err(|e| SearchError::create(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let message = Self::read_failure(response).await;
            error!(status = %status, message = %message, "Index request failed");
            return Err(SearchError::create(format!("Create failed with {}", message)));
        }

        let acknowledged = Self::write_response(response).await?;
        debug!(result = %acknowledged.result, "Document indexed");
        Ok(acknowledged)
    }

    #[instrument(skip(self, document), fields(field_count = document.len()))]
    async fn update(
        &self,
        index: &str,
        id: &str,
        document: &Document,
    ) -> Result<WriteResponse, SearchError> {
        let response = self
            .client
            .update(UpdateParts::IndexId(index, id))
            .body(build_partial_update(document))
            .send()
            .await
            .map_err(|e| SearchError::update(e.to_string()))?;

        let status = response.status_code();
        if status == StatusCode::NOT_FOUND {
            warn!("Update target does not exist");
            return Err(SearchError::not_found(index, id));
        }
        if !status.is_success() {
            let message = Self::read_failure(response).await;
            error!(status = %status, message = %message, "Update request failed");
            return Err(SearchError::update(format!("Update failed with {}", message)));
        }

        let acknowledged = Self::write_response(response).await?;
        debug!(result = %acknowledged.result, "Document updated");
        Ok(acknowledged)
    }

    #[instrument(skip(self))]
    async fn delete(&self, index: &str, id: &str) -> Result<WriteResponse, SearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if status == StatusCode::NOT_FOUND {
            debug!("Document already absent");
            return Ok(WriteResponse::new(index, id, "not_found"));
        }
        if !status.is_success() {
            let message = Self::read_failure(response).await;
            error!(status = %status, message = %message, "Delete request failed");
            return Err(SearchError::delete(format!("Delete failed with {}", message)));
        }

        let acknowledged = Self::write_response(response).await?;
        debug!(result = %acknowledged.result, "Document deleted");
        Ok(acknowledged)
    }

    #[instrument(skip(self, script), fields(lang = %script.lang))]
    async fn update_script(
        &self,
        index: &str,
        id: &str,
        script: &ScriptUpdate,
    ) -> Result<WriteResponse, SearchError> {
        let response = self
            .client
            .update(UpdateParts::IndexId(index, id))
            .body(build_script_update(script))
            .send()
            .await
            .map_err(|e| SearchError::update(e.to_string()))?;

        let status = response.status_code();
        if status == StatusCode::NOT_FOUND {
            return Err(SearchError::not_found(index, id));
        }
        if !status.is_success() {
            let message = Self::read_failure(response).await;
            error!(status = %status, message = %message, "Script update request failed");
            return Err(SearchError::update(format!(
                "Script update failed with {}",
                message
            )));
        }

        Self::write_response(response).await
    }

    #[instrument(skip(self, request), fields(ids = request.ids.len()))]
    async fn search_by_ids(
        &self,
        target: &str,
        request: &SearchByIdsRequest,
    ) -> Result<SearchHits, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[target]))
            .body(build_ids_query(request))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let message = Self::read_failure(response).await;
            error!(status = %status, message = %message, "Search request failed");
            return Err(SearchError::query(format!("Search failed with {}", message)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let hits = parse_hits(&body);
        debug!(total = hits.total, returned = hits.hits.len(), "Search by ids completed");
        Ok(hits)
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let cluster_status = body["status"].as_str().unwrap_or("red");
        debug!(status = %cluster_status, "Cluster health");
        Ok(cluster_status != "red")
    }
}
