//! OpenSearch request body builders.
//!
//! This module provides functions to build request bodies for the document
//! operations and to read the parts of search responses the store needs.

use opensearch::http::StatusCode;
use serde_json::{json, Value};

use crate::errors::SearchError;
use crate::types::{
    Document, ScriptUpdate, SearchByIdsRequest, SearchHit, SearchHits, StoredDocument,
};

/// Build an `ids` query restricted to the requested source fields.
///
/// An empty `source_fields` list omits `_source` filtering so the whole
/// source is returned.
pub fn build_ids_query(request: &SearchByIdsRequest) -> Value {
    let mut body = json!({
        "query": {
            "ids": {
                "values": request.ids
            }
        },
        "size": request.ids.len()
    });

    if !request.source_fields.is_empty() {
        body["_source"] = json!(request.source_fields);
    }

    body
}

/// Build a partial update body.
pub fn build_partial_update(document: &Document) -> Value {
    json!({ "doc": document })
}

/// Build a scripted update body.
pub fn build_script_update(script: &ScriptUpdate) -> Value {
    json!({
        "script": {
            "source": script.source,
            "lang": script.lang,
            "params": script.params
        }
    })
}

/// Extract the `error.reason` from a failed response body.
pub fn error_reason(body: &Value) -> Option<&str> {
    body.get("error").and_then(|error| {
        error
            .get("reason")
            .and_then(Value::as_str)
            .or_else(|| error.as_str())
    })
}

/// Describe a failed response as `status <code>: <reason>`.
///
/// Falls back to the raw body when it carries no `error` reason.
pub fn failure_message(status: StatusCode, body: &str) -> String {
    let reason = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|parsed| error_reason(&parsed).map(str::to_string))
        .unwrap_or_else(|| body.to_string());

    format!("status {}: {}", status, reason)
}

/// Interpret the response to a single-document get.
///
/// A 404 or a `"found": false` body means the document is absent. Any other
/// non-success status is a `GetError`.
pub fn parse_get_response(
    status: StatusCode,
    body: &str,
) -> Result<Option<StoredDocument>, SearchError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(SearchError::get(format!(
            "Get failed with {}",
            failure_message(status, body)
        )));
    }

    let parsed: Value =
        serde_json::from_str(body).map_err(|e| SearchError::parse(e.to_string()))?;
    if !parsed["found"].as_bool().unwrap_or(true) {
        return Ok(None);
    }

    Ok(Some(serde_json::from_value(parsed)?))
}

/// Parse the hits section of a search response.
///
/// Hits without an `_id` are skipped. The total accepts both the
/// `{"value": n}` object form and the legacy plain number.
pub fn parse_hits(response: &Value) -> SearchHits {
    let hits_section = &response["hits"];

    let hits: Vec<SearchHit> = hits_section["hits"]
        .as_array()
        .map(|hits| hits.iter().filter_map(parse_hit).collect())
        .unwrap_or_default();

    let total = hits_section["total"]["value"]
        .as_u64()
        .or_else(|| hits_section["total"].as_u64())
        .unwrap_or(hits.len() as u64);

    SearchHits { total, hits }
}

fn parse_hit(hit: &Value) -> Option<SearchHit> {
    let id = hit["_id"].as_str()?.to_string();
    let index = hit["_index"].as_str().unwrap_or_default().to_string();
    let source = hit
        .get("_source")
        .and_then(Value::as_object)
        .cloned()
        .map(Document::from)
        .unwrap_or_default();

    Some(SearchHit {
        index,
        id,
        score: hit["_score"].as_f64(),
        source,
    })
}
