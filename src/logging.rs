//! File logging
//!
//! The TUI owns the terminal, so log records go to
//! ~/.cache/iocview/iocview.log instead of stderr.
//! `RUST_LOG` wins over the configured level.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

pub fn log_path() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .context("Could not determine cache directory")?
        .join("iocview");
    Ok(dir.join("iocview.log"))
}

/// Install the global logger. Returns the log file path.
pub fn init(default_level: &str) -> Result<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    Builder::from_env(Env::default().default_filter_or(default_level.to_string()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()
        .context("Logger already initialized")?;

    log::debug!("Logging to {:?}", path);
    Ok(path)
}
