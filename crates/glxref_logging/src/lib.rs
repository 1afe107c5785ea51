//! Shared logging setup for glxref binaries.
//!
//! Logs go to stderr (stdout carries command output) and optionally to an
//! appended log file. `RUST_LOG` overrides both filters.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter for the log file when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "glxref=info,glxref_index=info";
const VERBOSE_CONSOLE_FILTER: &str = "glxref=debug,glxref_index=debug";
const QUIET_CONSOLE_FILTER: &str = "warn";

/// Logging configuration shared by glxref binaries.
pub struct LogConfig<'a> {
    pub verbose: bool,
    pub log_file: Option<&'a Path>,
}

/// Initialize tracing with a stderr layer and an optional file layer.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();

    let file_layer = match config.log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_filter(EnvFilter::new(file_directives(rust_log.as_deref()))),
            )
        }
        None => None,
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(console_directives(
            config.verbose,
            rust_log.as_deref(),
        )));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

fn console_directives(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives.to_string(),
        _ if verbose => VERBOSE_CONSOLE_FILTER.to_string(),
        _ => QUIET_CONSOLE_FILTER.to_string(),
    }
}

fn file_directives(rust_log: Option<&str>) -> String {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives.to_string(),
        _ => DEFAULT_LOG_FILTER.to_string(),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create log directory: {}", parent.display())
            })?;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}
