//! File logging setup
//!
//! The TUI owns the terminal, so log output goes to a file only.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "grid_snake.log";

/// Platform cache directory for logs, e.g. `~/.cache/grid_snake/logs` on Linux
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "grid_snake")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("grid_snake").join("logs"))
}

/// Install the global subscriber. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG overrides the default level
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(log_file = %log_dir.join(LOG_FILE).display(), "logging initialized");

    Ok(guard)
}
