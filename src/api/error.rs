//! API error types for the GitHub client.

use thiserror::Error;

/// Errors that can occur when interacting with the GitHub search API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status.
    ///
    /// The display text is the server's own message so it can be shown as-is.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message taken from the error body, or a generic description.
        message: String,
    },

    /// Rate limited by the GitHub API.
    #[error("{0}")]
    RateLimited(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code and the server's message.
    pub fn from_status(status: reqwest::StatusCode, message: &str) -> Self {
        let message = if message.is_empty() {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        } else {
            message.to_string()
        };

        match status.as_u16() {
            // GitHub reports an exhausted rate limit as 403 with a message
            403 if message.to_lowercase().contains("rate limit") => {
                ApiError::RateLimited(message)
            }
            429 => ApiError::RateLimited(message),
            code => ApiError::Api {
                status: code,
                message,
            },
        }
    }
}
