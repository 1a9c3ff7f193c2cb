//! GitHub API client and types.
//!
//! This module provides the interface for querying the GitHub issue search API.

mod client;
pub mod error;
pub mod types;

pub use client::{GitHubClient, IssueSearch};
pub use error::ApiError;
pub use types::{Issue, Label, SearchResult};
