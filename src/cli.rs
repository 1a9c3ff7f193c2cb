//! Command-line interface.
//!
//! Flags override values from the configuration file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};

/// Search a GitHub repository's issues from the terminal.
#[derive(Debug, Parser)]
#[command(name = "lazyissues", version, about)]
pub struct Cli {
    /// Repository to search, as owner/name.
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Quiet interval before a typed query is searched, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Number of issues to request per search.
    #[arg(long, value_name = "N")]
    pub per_page: Option<u32>,

    /// Base URL of the GitHub REST API.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Start with this query already searched.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Read configuration from this file instead of the default location.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write logs to this directory.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Load the configuration file and apply flag overrides.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(config)
    }

    /// Apply flag overrides to `config` and validate the result.
    pub fn apply(&self, mut config: Config) -> Result<Config, ConfigError> {
        if let Some(repo) = &self.repo {
            config.repo = repo.clone();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        if let Some(per_page) = self.per_page {
            config.per_page = per_page;
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
