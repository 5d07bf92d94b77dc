//! Interface definitions for the feed search client.
//!
//! This module defines the abstract `DocumentStore` trait that allows for
//! swappable search backends, and the `OperationLogger` capability injected into
//! the client for human-readable operation logs.

mod document_store;
mod operation_logger;

pub use document_store::DocumentStore;
pub use operation_logger::{OperationLogger, TracingLogger};
