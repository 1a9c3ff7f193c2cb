//! Async task management for non-blocking API operations.
//!
//! Searches run in background tasks while the UI keeps rendering and
//! handling keys. Results come back to the main loop over a tokio channel.
//!
//! # Architecture
//!
//! 1. A settled query makes the app queue a [`LoadRequest`]
//! 2. The main loop takes it and spawns a task via [`TaskSpawner`]
//! 3. The main loop continues rendering and handling events
//! 4. When the task completes, it sends an [`ApiMessage`] through the channel
//! 5. The main loop polls the channel with `try_recv()` and hands the message
//!    to the app, which drops responses to superseded requests

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{IssueSearch, SearchResult};
use crate::search::LoadRequest;

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Issue search results for a tagged request.
    IssuesFetched {
        /// Sequence number of the request.
        seq: u64,
        /// The query that was searched.
        query: String,
        /// Result, with failures already turned into display text.
        result: Result<SearchResult, String>,
    },
}

/// Spawns background tasks for async operations.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task to run a search request.
    pub fn spawn_search<S: IssueSearch>(&self, source: &S, request: LoadRequest) {
        let tx = self.tx.clone();
        let source = source.clone();
        tokio::spawn(async move {
            let LoadRequest { seq, query } = request;
            let result = source.search(&query).await.map_err(|e| e.to_string());
            debug!(seq, ok = result.is_ok(), "Search task finished");
            let _ = tx.send(ApiMessage::IssuesFetched { seq, query, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::api::{error::Result as ApiResult, ApiError};

    #[derive(Clone, Default)]
    struct FakeSource {
        calls: Arc<Mutex<Vec<String>>>,
        fail_with: Option<String>,
    }

    impl IssueSearch for FakeSource {
        fn search(&self, query: &str) -> impl Future<Output = ApiResult<SearchResult>> + Send {
            self.calls.lock().unwrap().push(query.to_string());
            let outcome = match &self.fail_with {
                Some(message) => Err(ApiError::InvalidResponse(message.clone())),
                None => Ok(SearchResult::default()),
            };
            async move { outcome }
        }
    }

    #[tokio::test]
    async fn test_spawn_search_sends_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spawner = TaskSpawner::new(tx);
        let source = FakeSource::default();

        spawner.spawn_search(
            &source,
            LoadRequest {
                seq: 4,
                query: "test".to_string(),
            },
        );

        match rx.recv().await.unwrap() {
            ApiMessage::IssuesFetched { seq, query, result } => {
                assert_eq!(seq, 4);
                assert_eq!(query, "test");
                assert_eq!(result, Ok(SearchResult::default()));
            }
        }
        assert_eq!(*source.calls.lock().unwrap(), vec!["test".to_string()]);
    }

    #[tokio::test]
    async fn test_spawn_search_converts_error_to_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spawner = TaskSpawner::new(tx);
        let source = FakeSource {
            fail_with: Some("bad json".to_string()),
            ..Default::default()
        };

        spawner.spawn_search(
            &source,
            LoadRequest {
                seq: 1,
                query: "x".to_string(),
            },
        );

        let ApiMessage::IssuesFetched { result, .. } = rx.recv().await.unwrap();
        assert_eq!(result, Err("Invalid API response: bad json".to_string()));
    }

    #[test]
    fn test_fake_source_records_queries() {
        let source = FakeSource::default();
        let result = tokio_test::block_on(source.search("hooks"));
        assert_eq!(result.unwrap(), SearchResult::default());
        assert_eq!(*source.calls.lock().unwrap(), vec!["hooks".to_string()]);
    }
}
