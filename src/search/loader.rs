//! Search request bookkeeping.
//!
//! The loader tracks `{ issues, loading, error }` for the settled query and
//! tags every request with a sequence number. Only the response to the most
//! recently issued request is applied; anything older is dropped, so a slow
//! earlier search can never overwrite a newer one.

use tracing::{debug, info};

use crate::api::{Issue, SearchResult};

/// A search the caller should execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Sequence number to hand back to [`IssueLoader::complete`].
    pub seq: u64,
    /// The settled query text.
    pub query: String,
}

/// Snapshot of the loader's observable state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadState {
    /// The last accepted result, if any.
    pub issues: Option<SearchResult>,
    /// Whether the latest request is still in flight.
    pub loading: bool,
    /// Message of the latest failure.
    pub error: Option<String>,
}

/// Tracks search results for the current query.
#[derive(Debug, Default)]
pub struct IssueLoader {
    /// Observable state.
    state: LoadState,
    /// Sequence number of the most recently issued request (0 = none).
    latest_seq: u64,
}

impl IssueLoader {
    /// Create an idle loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading issues for a query.
    ///
    /// A `None` query does nothing and returns `None`. Otherwise the loader
    /// enters the loading state and returns the request to execute.
    pub fn load(&mut self, query: Option<&str>) -> Option<LoadRequest> {
        let query = query?;

        self.latest_seq += 1;
        self.state.loading = true;
        self.state.error = None;

        info!(seq = self.latest_seq, query = %query, "Issuing search");
        Some(LoadRequest {
            seq: self.latest_seq,
            query: query.to_string(),
        })
    }

    /// Apply the outcome of a request.
    ///
    /// Returns `true` if the response was for the latest request and was
    /// applied, `false` if it was stale and ignored.
    pub fn complete(&mut self, seq: u64, result: Result<SearchResult, String>) -> bool {
        if seq != self.latest_seq {
            debug!(
                seq,
                latest = self.latest_seq,
                "Discarding stale search response"
            );
            return false;
        }

        self.state.loading = false;
        match result {
            Ok(issues) => {
                debug!(seq, count = issues.items.len(), "Search succeeded");
                self.state.issues = Some(issues);
                self.state.error = None;
            }
            Err(message) => {
                debug!(seq, error = %message, "Search failed");
                self.state.error = Some(message);
            }
        }
        true
    }

    /// The last accepted result.
    pub fn issues(&self) -> Option<&SearchResult> {
        self.state.issues.as_ref()
    }

    /// The issues of the last accepted result, or an empty slice.
    pub fn items(&self) -> &[Issue] {
        self.state
            .issues
            .as_ref()
            .map(|r| r.items.as_slice())
            .unwrap_or(&[])
    }

    /// Check if the latest request is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// The latest failure message.
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Get a snapshot of the observable state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Sequence number of the most recently issued request.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }
}
