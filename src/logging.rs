//! Logging setup on top of `tracing`.
//!
//! The terminal belongs to the TUI, so every record goes to a daily-rotated
//! file instead. `RUST_LOG` picks the level; `lazyissues=debug` shows each
//! search request and `lazyissues=trace` shows individual keys.

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "lazyissues=info,warn";

/// Prefix of the rotated log files.
const LOG_FILE_NAME: &str = "lazyissues.log";

/// Directory chosen by [`init`].
static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Install the global subscriber, writing into `log_dir` or the default
/// directory under the platform's local data dir.
///
/// # Errors
///
/// Fails if the directory cannot be created or a subscriber is already set.
pub fn init(log_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let log_dir = resolve_log_dir(log_dir)?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = %log_dir.display(),
        "lazyissues starting"
    );
    let _ = LOG_DIR.set(log_dir);

    Ok(())
}

/// Where logs are written, once [`init`] has run.
pub fn log_directory() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}

/// Record a clean exit.
pub fn shutdown() {
    tracing::info!("lazyissues shutting down");
}

fn resolve_log_dir(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let base = dirs::data_local_dir().context("could not determine local data directory")?;
    Ok(base.join("lazyissues").join("logs"))
}
