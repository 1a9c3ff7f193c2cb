//! Configuration management for LazyIssues.
//!
//! This module handles loading and validating the user configuration file.
//! Command-line flags are layered on top by the binary.

mod settings;

use thiserror::Error;

pub use settings::{Config, TOKEN_ENV_VAR};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[source] toml::de::Error),

    /// The configuration values are invalid.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
