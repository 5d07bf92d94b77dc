//! Search error types.
//!
//! This module defines the error types that can occur during document store
//! operations. A missing document on fetch is not an error: stores report it
//! as `Ok(None)`.

use thiserror::Error;

/// Errors that can occur during search store operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Failed to establish connection to the search service.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request was rejected before reaching the store.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The targeted document does not exist.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Fetching a document failed for a reason other than absence.
    #[error("Get error: {0}")]
    GetError(String),

    /// Failed to create (index) a document.
    #[error("Create error: {0}")]
    CreateError(String),

    /// Failed to update a document.
    #[error("Update error: {0}")]
    UpdateError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to parse response from the search service.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search service.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a not found error for a document address.
    pub fn not_found(index: &str, id: &str) -> Self {
        Self::NotFound(format!("index={}, id={}", index, id))
    }

    /// Create a get error.
    pub fn get(msg: impl Into<String>) -> Self {
        Self::GetError(msg.into())
    }

    /// Create a create error.
    pub fn create(msg: impl Into<String>) -> Self {
        Self::CreateError(msg.into())
    }

    /// Create an update error.
    pub fn update(msg: impl Into<String>) -> Self {
        Self::UpdateError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Whether this error means the document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
