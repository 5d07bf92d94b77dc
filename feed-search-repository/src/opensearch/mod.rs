//! OpenSearch implementation of the document store.
//!
//! This module provides a concrete implementation of `DocumentStore`
//! using OpenSearch (or a compatible Elasticsearch cluster) as the backend.

mod client;
mod queries;

pub use client::OpenSearchStore;
