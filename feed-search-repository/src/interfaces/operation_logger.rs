//! Logging capability used by the client to report each store interaction.

/// Leveled plain-text logger injected into `FeedSearchClient`.
///
/// Messages describe the action taken and its outcome. Nothing is returned
/// and nothing in the client's control flow depends on the logger.
pub trait OperationLogger: Send + Sync {
    /// Log an expected, non-failure event (document missing, unchanged).
    fn info(&self, message: &str);

    /// Log a recoverable failure.
    fn warn(&self, message: &str);

    /// Log a failure that is about to be returned to the caller.
    fn error(&self, message: &str);
}

/// `OperationLogger` that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl OperationLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "feed_search", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "feed_search", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "feed_search", "{}", message);
    }
}
