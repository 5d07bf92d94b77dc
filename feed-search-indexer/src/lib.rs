//! # Feed Search Indexer
//!
//! Entry point library for applying newsfeed document operations to the
//! search store.
//!
//! This crate provides the configuration, dependency wiring and the NDJSON
//! command runner used by the `feed-search-indexer` binary.

pub mod commands;
pub mod config;
pub mod runner;

pub use commands::Command;
pub use config::{Dependencies, IndexerConfig};
pub use runner::{run_commands, RunSummary};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A command line could not be parsed.
    #[error("Command error: {0}")]
    CommandError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] feed_search_repository::SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a command error.
    pub fn command(msg: impl Into<String>) -> Self {
        Self::CommandError(msg.into())
    }
}
