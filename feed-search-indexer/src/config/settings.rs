//! Environment-driven settings.

use std::env;
use std::time::Duration;

use feed_search_repository::config::{
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SEARCH_TARGET, DEFAULT_SEARCH_URL,
};
use feed_search_repository::SearchClientConfig;

use super::LogFormat;
use crate::IndexerError;

/// Settings for the indexer binary.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Search client settings.
    pub search: SearchClientConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

impl IndexerConfig {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_URL`: search service URL (default: http://localhost:9200)
    /// - `SEARCH_TARGET`: index pattern for id lookups (default: _all)
    /// - `SEARCH_TIMEOUT_SECS`: per-request timeout in seconds (default: 30)
    /// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
    pub fn from_env() -> Result<Self, IndexerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string());
        let search_target =
            lookup("SEARCH_TARGET").unwrap_or_else(|| DEFAULT_SEARCH_TARGET.to_string());

        let request_timeout = match lookup("SEARCH_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    IndexerError::config(format!("SEARCH_TIMEOUT_SECS must be an integer, got {}", raw))
                })?;
                if secs == 0 {
                    return Err(IndexerError::config("SEARCH_TIMEOUT_SECS must be positive"));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            search: SearchClientConfig::new(url)
                .with_search_target(search_target)
                .with_request_timeout(request_timeout),
            log_format,
        })
    }
}
