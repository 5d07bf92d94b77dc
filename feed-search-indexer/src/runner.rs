//! NDJSON command runner.
//!
//! Reads one command per line, applies it through the client and writes one
//! JSON result per line. A failing command is reported on its own output line
//! and does not stop the run.

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, instrument};

use feed_search_repository::FeedSearchClient;

use crate::commands::Command;
use crate::IndexerError;

/// Counts of processed command lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines that produced a result.
    pub succeeded: usize,
    /// Lines that could not be parsed or whose operation failed.
    pub failed: usize,
}

impl RunSummary {
    /// Total number of non-blank lines seen.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Apply every command read from `reader`, writing results to `writer`.
///
/// Blank lines are skipped. Only I/O failures on the reader or writer abort
/// the run.
#[instrument(skip_all)]
pub async fn run_commands<R, W>(
    client: &FeedSearchClient,
    reader: R,
    mut writer: W,
) -> Result<RunSummary, IndexerError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = RunSummary::default();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = match run_line(client, line).await {
            Ok(result) => {
                summary.succeeded += 1;
                result
            }
            Err(e) => {
                summary.failed += 1;
                error!(line = line_number, error = %e, "Command failed");
                json!({ "line": line_number, "error": e.to_string() })
            }
        };

        writer.write_all(output.to_string().as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Finished processing commands"
    );

    Ok(summary)
}

async fn run_line(client: &FeedSearchClient, line: &str) -> Result<Value, IndexerError> {
    let command = Command::parse(line)?;
    debug!(op = command.op(), "Executing command");
    Ok(command.execute(client).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use feed_search_repository::{
        Document, DocumentStore, ScriptUpdate, SearchByIdsRequest, SearchError, SearchHits,
        StoredDocument, TracingLogger, WriteResponse,
    };
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::io::BufReader;
    use tokio::sync::Mutex;

    /// In-memory store keyed by (index, id)
    #[derive(Default)]
    struct MemoryStore {
        documents: Mutex<HashMap<(String, String), Document>>,
    }

    #[async_trait]
    impl DocumentStore for MemoryStore {
        async fn get(&self, index: &str, id: &str) -> Result<Option<StoredDocument>, SearchError> {
            Ok(self
                .documents
                .lock()
                .await
                .get(&(index.to_string(), id.to_string()))
                .map(|source| StoredDocument {
                    index: index.to_string(),
                    id: id.to_string(),
                    version: None,
                    source: source.clone(),
                }))
        }

        async fn create(
            &self,
            index: &str,
            id: &str,
            document: &Document,
        ) -> Result<WriteResponse, SearchError> {
            self.documents
                .lock()
                .await
                .insert((index.to_string(), id.to_string()), document.clone());
            Ok(WriteResponse::new(index, id, "created"))
        }

        async fn update(
            &self,
            index: &str,
            id: &str,
            document: &Document,
        ) -> Result<WriteResponse, SearchError> {
            let mut documents = self.documents.lock().await;
            let Some(existing) = documents.get_mut(&(index.to_string(), id.to_string())) else {
                return Err(SearchError::not_found(index, id));
            };
            for (field, value) in document.as_map() {
                existing.insert(field.clone(), value.clone());
            }
            Ok(WriteResponse::new(index, id, "updated"))
        }

        async fn delete(&self, index: &str, id: &str) -> Result<WriteResponse, SearchError> {
            let removed = self
                .documents
                .lock()
                .await
                .remove(&(index.to_string(), id.to_string()));
            let result = if removed.is_some() { "deleted" } else { "not_found" };
            Ok(WriteResponse::new(index, id, result))
        }

        async fn update_script(
            &self,
            index: &str,
            id: &str,
            _script: &ScriptUpdate,
        ) -> Result<WriteResponse, SearchError> {
            Err(SearchError::not_found(index, id))
        }

        async fn search_by_ids(
            &self,
            _target: &str,
            _request: &SearchByIdsRequest,
        ) -> Result<SearchHits, SearchError> {
            Ok(SearchHits::default())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    async fn run(input: &str) -> (RunSummary, Vec<Value>) {
        let client = FeedSearchClient::new(Arc::new(MemoryStore::default()), Arc::new(TracingLogger));
        let mut output = Vec::new();

        let summary = run_commands(&client, BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();

        let results = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (summary, results)
    }

    #[tokio::test]
    async fn test_run_upsert_sequence() {
        let input = concat!(
            r#"{"op":"upsert","index":"newsfeed","uuid":"a","body":{"groups":["g1"],"news_feed_uuids":["f1"],"title":"x"}}"#,
            "\n",
            r#"{"op":"upsert","index":"newsfeed","uuid":"a","body":{"groups":["g2"],"news_feed_uuids":["f1"],"title":"y"}}"#,
            "\n",
            r#"{"op":"upsert","index":"newsfeed","uuid":"a","body":{"groups":["g2","g1"],"news_feed_uuids":["f1"],"title":"y"}}"#,
            "\n",
            r#"{"op":"get","index":"newsfeed","uuid":"a"}"#,
            "\n",
        );

        let (summary, results) = run(input).await;

        assert_eq!(summary, RunSummary { succeeded: 4, failed: 0 });
        assert_eq!(results[0]["outcome"], "created");
        assert_eq!(results[1]["outcome"], "updated");
        assert_eq!(results[2]["outcome"], "unchanged");
        assert_eq!(results[3]["found"], true);
        assert_eq!(results[3]["_source"]["groups"], json!(["g2", "g1"]));
        assert_eq!(results[3]["_source"]["title"], "y");
    }

    #[tokio::test]
    async fn test_run_reports_failures_and_continues() {
        let input = concat!(
            "not json\n",
            "\n",
            r#"{"op":"update_script","index":"newsfeed","uuid":"missing","script":{"source":"ctx._source.n = 1"}}"#,
            "\n",
            r#"{"op":"delete","index":"newsfeed","uuid":"missing"}"#,
            "\n",
        );

        let (summary, results) = run(input).await;

        assert_eq!(summary, RunSummary { succeeded: 1, failed: 2 });
        assert_eq!(summary.total(), 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["line"], 1);
        assert!(results[0]["error"].as_str().unwrap().starts_with("Command error"));
        assert_eq!(results[1]["line"], 3);
        assert!(results[1]["error"].as_str().unwrap().contains("Document not found"));
        assert_eq!(results[2]["result"], "not_found");
    }

    #[tokio::test]
    async fn test_run_empty_input() {
        let (summary, results) = run("").await;

        assert_eq!(summary, RunSummary::default());
        assert!(results.is_empty());
    }
}
