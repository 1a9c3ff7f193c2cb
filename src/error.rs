//! Centralized error types for LazyIssues.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror`.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(ConfigError::NoConfigDir) => {
                "Could not find configuration directory. Please check your system settings."
                    .to_string()
            }
            AppError::Config(e) => format!("Configuration problem: {}", e),
            AppError::Api(ApiError::RateLimited(msg)) => {
                format!("{} Set GITHUB_TOKEN to raise the limit.", msg)
            }
            AppError::Api(ApiError::Network(_)) => {
                "Could not reach GitHub. Check your internet connection.".to_string()
            }
            AppError::Api(e) => e.to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }
}
