//! # Feed Search Repository
//!
//! This crate provides the document store interface for the newsfeed search
//! index, a concrete implementation for OpenSearch, and the client facade
//! that applies the merge-upsert policy on top of it.

pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod merge;
pub mod opensearch;
pub mod types;

pub use client::FeedSearchClient;
pub use config::SearchClientConfig;
pub use errors::SearchError;
pub use interfaces::{DocumentStore, OperationLogger, TracingLogger};
pub use opensearch::OpenSearchStore;
pub use types::{
    CandidateDocument, Document, ScriptUpdate, SearchByIdsRequest, SearchHit, SearchHits,
    StoredDocument, UpsertOutcome, WriteResponse,
};
