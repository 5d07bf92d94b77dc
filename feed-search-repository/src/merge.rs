//! Set-union merge of the feed membership fields.
//!
//! When a feed item is re-published, its `groups` and `news_feed_uuids` are
//! merged with whatever the stored copy already lists instead of being
//! replaced.

use serde_json::Value;

use crate::types::{CandidateDocument, Document, GROUPS_FIELD, NEWS_FEED_UUIDS_FIELD};

/// Union of two entry lists with duplicates removed.
///
/// Order follows first occurrence: `primary` entries first, then entries only
/// present in `secondary`. Entries are compared by JSON value, so `7` and
/// `"7"` are distinct.
pub fn union_values(primary: &[Value], secondary: &[Value]) -> Vec<Value> {
    let mut merged: Vec<Value> = Vec::with_capacity(primary.len() + secondary.len());
    for entry in primary.iter().chain(secondary) {
        if !merged.contains(entry) {
            merged.push(entry.clone());
        }
    }
    merged
}

/// The document written for a candidate that replaces `stored`.
///
/// Non-merge fields keep the candidate's values. Stored merge entries are
/// kept whatever their type; a missing or non-array merge field on the
/// stored side counts as empty.
pub fn merge_with_stored(candidate: &CandidateDocument, stored: &Document) -> Document {
    let mut merged = candidate.to_document();
    for (field, ids) in [
        (GROUPS_FIELD, &candidate.groups),
        (NEWS_FEED_UUIDS_FIELD, &candidate.news_feed_uuids),
    ] {
        let own: Vec<Value> = ids.iter().cloned().map(Value::String).collect();
        merged.insert(field, Value::Array(union_values(&own, stored.entries(field))));
    }
    merged
}
