//! Logging setup for the `pageroute` binary and embedders.
//!
//! Events go to `~/.local/state/pageroute/pageroute.log`. When that file
//! cannot be opened the caller falls back to [`init_logging_stderr`].
//! `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Engine crate and binary at debug, everything else at info.
const DEFAULT_FILTER: &str = "info,pageroute_core=debug,pageroute=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Path of the log file under the XDG state directory.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pageroute")?;
    Ok(xdg_dirs.get_state_home().join("pageroute").join("pageroute.log"))
}

fn open_log(path: &PathBuf) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Route `tracing` output to the log file.
///
/// Errors when the file cannot be opened or a global subscriber is already
/// installed; nothing is installed in that case.
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = open_log(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;

    tracing::info!("logging to {}", path.display());
    Ok(())
}

/// Stderr-only logging. Silently keeps an already installed subscriber.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_in_pageroute_state_dir() {
        let path = log_path().unwrap();
        assert!(path.ends_with("pageroute/pageroute.log"));
    }

    #[test]
    fn open_log_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pageroute.log");
        open_log(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn default_filter_parses() {
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
    }
}
