//! Configuration and dependency wiring for the feed search indexer.

mod dependencies;
mod logging;
mod settings;

pub use dependencies::Dependencies;
pub use logging::{init_tracing, LogFormat};
pub use settings::IndexerConfig;
