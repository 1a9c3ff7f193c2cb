//! Application settings configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConfigError, Result};

/// Environment variable consulted when no token is configured.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Largest page size accepted by the GitHub search API.
const MAX_PER_PAGE: u32 = 100;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository searched, as `owner/name`.
    pub repo: String,
    /// Number of issues requested per search.
    pub per_page: u32,
    /// Quiet interval before a typed query is searched, in milliseconds.
    pub debounce_ms: u64,
    /// Base URL of the GitHub REST API.
    pub api_url: String,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
    /// Optional personal access token for higher rate limits.
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: "facebook/react".to_string(),
            per_page: 10,
            debounce_ms: 300,
            api_url: "https://api.github.com".to_string(),
            timeout_secs: 30,
            token: None,
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    ///
    /// Returns `<config_dir>/lazyissues/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("lazyissues").join("config.toml"))
    }

    /// Load the configuration from the default path.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents).map_err(ConfigError::ParseError)?;
        config.validate()?;

        debug!(path = %path.display(), repo = %config.repo, "Loaded config");
        Ok(config)
    }

    /// Validate this configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        let mut parts = self.repo.split('/');
        let valid_repo = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
        );
        if !valid_repo || self.repo.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "repo '{}' must have the form owner/name",
                self.repo
            )));
        }

        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ConfigError::ValidationError(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, self.per_page
            )));
        }

        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(
                "api_url must start with http:// or https://".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// The token to authenticate with, if any.
    ///
    /// A configured token wins over the `GITHUB_TOKEN` environment variable.
    /// Empty values are treated as absent.
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
            .filter(|t| !t.trim().is_empty())
    }
}
