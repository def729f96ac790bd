//! Log subscriber setup
//!
//! `RUST_LOG` controls the filter (default `info`). CLI runs log to stderr;
//! the TUI owns the terminal, so it logs to a file instead.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// `{cache_dir}/flicktui/flicktui.log`
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("flicktui").join("flicktui.log"))
}

/// Log to stderr (`quiet` keeps only warnings and errors)
pub fn init_cli(quiet: bool) {
    let filter = env_filter(if quiet { "warn" } else { "info" });
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to the TUI log file; returns its path
pub fn init_tui() -> Result<Option<PathBuf>> {
    let Some(path) = log_path() else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let _ = fmt()
        .with_env_filter(env_filter("info"))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(Some(path))
}
