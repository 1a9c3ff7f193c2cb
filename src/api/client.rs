//! GitHub API client implementation.
//!
//! This module provides the client used by the autocomplete to query the
//! GitHub issue search endpoint for a single, fixed repository.

use std::future::Future;
use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{ErrorBody, SearchResult};
use crate::config::Config;

/// Media type recommended by the GitHub REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// A source of issue search results.
///
/// Background search tasks are generic over this trait so the event loop can
/// be exercised without a network.
pub trait IssueSearch: Clone + Send + Sync + 'static {
    /// Run an exact-phrase search for `query`.
    fn search(&self, query: &str) -> impl Future<Output = Result<SearchResult>> + Send;
}

/// The GitHub API client.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The HTTP client.
    client: Client,
    /// The API base URL, without a trailing slash.
    base_url: String,
    /// Repository searched, as `owner/name`.
    repo: String,
    /// Page size requested from the API.
    per_page: u32,
    /// Optional bearer token.
    token: Option<String>,
}

impl GitHubClient {
    /// Create a new client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Self::build_http_client(config.timeout_secs)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.api_url),
            repo: config.repo.clone(),
            per_page: config.per_page,
            token: config.resolve_token(),
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client(timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("lazyissues/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)
    }

    /// Build the search URL for a query.
    ///
    /// The query is wrapped in double quotes before percent-encoding so
    /// GitHub treats it as an exact phrase.
    pub fn search_url(&self, query: &str) -> String {
        let phrase = format!("\"{}\"", query);
        format!(
            "{}/search/issues?q={}+repo:{}&per_page={}",
            self.base_url,
            urlencoding::encode(&phrase),
            self.repo,
            self.per_page
        )
    }

    /// Search issues in the configured repository.
    ///
    /// Calls `GET /search/issues` once. Failures are not retried.
    #[instrument(skip(self), fields(repo = %self.repo))]
    pub async fn search_issues(&self, query: &str) -> Result<SearchResult> {
        let url = self.search_url(query);
        debug!(url = %url, "Searching issues");

        let mut request = self.client.get(&url).header(header::ACCEPT, GITHUB_ACCEPT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let result: SearchResult = self.handle_response(response).await?;

        debug!(
            "Found {} issues (total: {})",
            result.items.len(),
            result.total_count
        );
        Ok(result)
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);
            warn!(status = status.as_u16(), "Search request failed");

            Err(Self::error_from_response(status, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response body.
    fn error_from_response(status: StatusCode, body: &str) -> ApiError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_default();
        ApiError::from_status(status, &message)
    }

    /// Get the searched repository.
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl IssueSearch for GitHubClient {
    fn search(&self, query: &str) -> impl Future<Output = Result<SearchResult>> + Send {
        self.search_issues(query)
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}", url);
    }

    url.to_string()
}
