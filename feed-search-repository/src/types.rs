//! Document, request and response types for search store operations.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::SearchError;

/// Field holding the group identifiers a feed item is visible to.
pub const GROUPS_FIELD: &str = "groups";

/// Field holding the uuids of the news feeds a feed item belongs to.
pub const NEWS_FEED_UUIDS_FIELD: &str = "news_feed_uuids";

/// A document as held by the search store: an untyped map of fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the document and return the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Entries of an array field. A missing or non-array field has none.
    pub fn entries(&self, field: &str) -> &[Value] {
        self.0
            .get(field)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether every field of `other` is present here with an equal value.
    ///
    /// A partial update with `other` would leave this document as it is.
    pub fn covers(&self, other: &Document) -> bool {
        other
            .0
            .iter()
            .all(|(field, value)| self.0.get(field) == Some(value))
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Value::Object(document.0)
    }
}

impl TryFrom<Value> for Document {
    type Error = SearchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(SearchError::validation(format!(
                "Document must be a JSON object, got {}",
                other
            ))),
        }
    }
}

/// A document body supplied by a caller for writing.
///
/// `groups` and `news_feed_uuids` are typed because upsert merges them; all
/// other fields pass through opaquely. `version` is accepted on input but is
/// never written to the store and never takes part in comparisons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateDocument {
    /// Caller-side version marker, ignored by every store operation.
    #[serde(default, skip_serializing)]
    pub version: Option<Value>,
    /// Group identifiers.
    #[serde(default, deserialize_with = "nullable_ids")]
    pub groups: Vec<String>,
    /// News feed uuids.
    #[serde(default, deserialize_with = "nullable_ids")]
    pub news_feed_uuids: Vec<String>,
    /// Every other field.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CandidateDocument {
    /// Create an empty candidate with no groups and no feeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the group identifiers.
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Set the news feed uuids.
    pub fn with_news_feed_uuids<I, S>(mut self, news_feed_uuids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.news_feed_uuids = news_feed_uuids.into_iter().map(Into::into).collect();
        self
    }

    /// Set an opaque field.
    ///
    /// The merge fields and `version` are routed to their typed slots so the
    /// candidate always serializes the same way it deserializes.
    pub fn with_field(mut self, field: impl Into<String>, value: Value) -> Self {
        let field = field.into();
        if field == GROUPS_FIELD {
            self.groups = ids_from(&value);
        } else if field == NEWS_FEED_UUIDS_FIELD {
            self.news_feed_uuids = ids_from(&value);
        } else if field == "version" {
            self.version = Some(value);
        } else {
            self.fields.insert(field, value);
        }
        self
    }

    /// Set the ignored version marker.
    pub fn with_version(mut self, version: Value) -> Self {
        self.version = Some(version);
        self
    }

    /// The document that gets written for this candidate: every field except
    /// `version`, with the merge fields as arrays.
    pub fn to_document(&self) -> Document {
        let mut map = self.fields.clone();
        map.insert(GROUPS_FIELD.to_string(), ids_value(&self.groups));
        map.insert(
            NEWS_FEED_UUIDS_FIELD.to_string(),
            ids_value(&self.news_feed_uuids),
        );
        Document(map)
    }
}

impl TryFrom<Value> for CandidateDocument {
    type Error = SearchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if !value.is_object() {
            return Err(SearchError::validation(format!(
                "Document must be a JSON object, got {}",
                value
            )));
        }
        serde_json::from_value(value)
            .map_err(|e| SearchError::validation(format!("Invalid document body: {}", e)))
    }
}

fn ids_from(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn ids_value(ids: &[String]) -> Value {
    Value::Array(ids.iter().cloned().map(Value::String).collect())
}

fn nullable_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A document fetched from the store along with its metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredDocument {
    /// Index holding the document.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Store-side version counter.
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    /// The stored fields.
    #[serde(rename = "_source", default)]
    pub source: Document,
}

/// Acknowledgement returned by the store for a write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteResponse {
    /// Index the write landed in.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Store-side version after the write.
    #[serde(rename = "_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    /// `created`, `updated`, `noop`, `deleted` or `not_found`.
    #[serde(default)]
    pub result: String,
}

impl WriteResponse {
    /// Build a response for the given address and result.
    pub fn new(index: impl Into<String>, id: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            id: id.into(),
            version: None,
            result: result.into(),
        }
    }

    /// Whether the write created a new document.
    pub fn is_created(&self) -> bool {
        self.result == "created"
    }
}

/// Result of a merge-upsert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "response", rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// No document existed, or the update failed and the create fallback succeeded.
    Created(WriteResponse),
    /// An existing document was updated with the merged body.
    Updated(WriteResponse),
    /// The stored document already matched the candidate; nothing was written.
    Unchanged,
}

impl UpsertOutcome {
    /// Whether a write was performed.
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Scripted update of a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptUpdate {
    /// Script source.
    pub source: String,
    /// Script language.
    #[serde(default = "default_script_lang")]
    pub lang: String,
    /// Script parameters.
    #[serde(default)]
    pub params: Map<String, Value>,
}

fn default_script_lang() -> String {
    "painless".to_string()
}

impl ScriptUpdate {
    /// Create a painless script update.
    pub fn painless(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            lang: default_script_lang(),
            params: Map::new(),
        }
    }

    /// Add a script parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

/// Lookup of documents by id across indices.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchByIdsRequest {
    /// Document ids to fetch.
    #[serde(default)]
    pub ids: Vec<String>,
    /// Source fields to return; empty returns the whole source.
    #[serde(default, rename = "source")]
    pub source_fields: Vec<String>,
}

impl SearchByIdsRequest {
    /// Create a request for the given ids.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            source_fields: Vec::new(),
        }
    }

    /// Restrict the returned source fields.
    pub fn with_source_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Index holding the document.
    pub index: String,
    /// Document id.
    pub id: String,
    /// Relevance score, if the query produced one.
    pub score: Option<f64>,
    /// Returned source fields.
    pub source: Document,
}

/// Hits returned by a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchHits {
    /// Total number of matching documents.
    pub total: u64,
    /// The returned hits.
    pub hits: Vec<SearchHit>,
}
