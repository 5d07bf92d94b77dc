//! Commands accepted by the runner, one JSON object per line.

use serde::Deserialize;
use serde_json::{json, Value};

use feed_search_repository::{
    CandidateDocument, FeedSearchClient, ScriptUpdate, SearchByIdsRequest, SearchError,
};

use crate::IndexerError;

/// A single document operation, tagged by `op`.
///
/// ```text
/// {"op":"upsert","index":"newsfeed","uuid":"item-1","body":{"groups":["g1"],"news_feed_uuids":["f1"]}}
/// {"op":"delete","index":"newsfeed","uuid":"item-1"}
/// {"op":"search_by_ids","ids":["item-1"],"source":["title"]}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Merge-upsert a feed item.
    Upsert {
        index: String,
        uuid: String,
        body: CandidateDocument,
    },
    /// Index a document, replacing any existing one.
    Create {
        index: String,
        uuid: String,
        body: CandidateDocument,
    },
    /// Partial update with create fallback.
    Update {
        index: String,
        uuid: String,
        body: CandidateDocument,
    },
    /// Scripted update.
    UpdateScript {
        index: String,
        uuid: String,
        script: ScriptUpdate,
    },
    /// Delete a document.
    Delete { index: String, uuid: String },
    /// Fetch a document.
    Get { index: String, uuid: String },
    /// Look up documents by id.
    SearchByIds(SearchByIdsRequest),
}

impl Command {
    /// Parse one command line.
    pub fn parse(line: &str) -> Result<Self, IndexerError> {
        serde_json::from_str(line).map_err(|e| IndexerError::command(e.to_string()))
    }

    /// Name of the operation, for logging.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Upsert { .. } => "upsert",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::UpdateScript { .. } => "update_script",
            Self::Delete { .. } => "delete",
            Self::Get { .. } => "get",
            Self::SearchByIds(_) => "search_by_ids",
        }
    }

    /// Run the command against the client and render its result as JSON.
    pub async fn execute(self, client: &FeedSearchClient) -> Result<Value, SearchError> {
        let result = match self {
            Self::Upsert { index, uuid, body } => {
                serde_json::to_value(client.upsert(&index, &uuid, body).await?)
            }
            Self::Create { index, uuid, body } => {
                serde_json::to_value(client.create(&index, &uuid, &body).await?)
            }
            Self::Update { index, uuid, body } => {
                serde_json::to_value(client.update(&index, &uuid, &body).await?)
            }
            Self::UpdateScript {
                index,
                uuid,
                script,
            } => serde_json::to_value(client.update_script(&index, &uuid, &script).await?),
            Self::Delete { index, uuid } => {
                serde_json::to_value(client.delete(&index, &uuid).await?)
            }
            Self::Get { index, uuid } => {
                let found = client.get(&index, &uuid).await?;
                Ok(match found {
                    Some(stored) => json!({
                        "found": true,
                        "_index": stored.index,
                        "_id": stored.id,
                        "_version": stored.version,
                        "_source": stored.source,
                    }),
                    None => json!({ "found": false, "_index": index, "_id": uuid }),
                })
            }
            Self::SearchByIds(request) => serde_json::to_value(client.search_by_ids(&request).await?),
        };

        result.map_err(|e| SearchError::serialization(e.to_string()))
    }
}
