//! Feed Search Indexer
//!
//! Reads newsfeed document commands as NDJSON from stdin, applies them to the
//! search store and prints one JSON result per line on stdout.

use std::process::ExitCode;

use tokio::io::{stdin, stdout, BufReader};
use tracing::{error, info};

use feed_search_indexer::config::init_tracing;
use feed_search_indexer::{run_commands, Dependencies, IndexerConfig, IndexerError};

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine; variables may come from the real environment
    dotenv::dotenv().ok();

    let config = match IndexerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_format);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Indexer failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: IndexerConfig) -> Result<(), IndexerError> {
    let dependencies = Dependencies::new(&config).await?;

    info!("Reading commands from stdin");

    tokio::select! {
        summary = run_commands(&dependencies.client, BufReader::new(stdin()), stdout()) => {
            let summary = summary?;
            if summary.failed > 0 {
                info!(failed = summary.failed, total = summary.total(), "Some commands failed");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping");
        }
    }

    Ok(())
}
