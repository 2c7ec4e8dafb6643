//! Logging infrastructure for mouse-resize
//!
//! Provides unified logging setup using the tracing ecosystem.

use std::path::PathBuf;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{paths, ResizeError, Result};

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "MOUSE_RESIZE_LOG";

const DEFAULT_LOG_FILE: &str = "mouse-resize.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter (e.g., "info", "mouse_resize=debug")
    pub filter: String,
    /// Include file/line in logs
    pub file_line: bool,
    /// Directory for the log file, defaults to [`paths::log_dir`]
    pub log_dir: Option<PathBuf>,
    /// Optional custom log file name (defaults to "mouse-resize.log")
    pub file_name: Option<String>,
}

impl LogConfig {
    /// Config for the interactive resize session (file logging)
    pub fn interactive() -> Self {
        Self {
            filter: std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| "warn".into()),
            file_line: false,
            log_dir: None,
            file_name: None,
        }
    }

    /// Full path of the log file this config writes to
    pub fn log_path(&self) -> PathBuf {
        let dir = self.log_dir.clone().unwrap_or_else(paths::log_dir);
        dir.join(self.file_name.as_deref().unwrap_or(DEFAULT_LOG_FILE))
    }
}

/// Initialize file logging with `config`
pub fn init_logging_with_config(config: LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| ResizeError::config(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(config.file_line)
        .with_line_number(config.file_line);

    let log_path = config.log_path();
    if let Some(dir) = log_path.parent() {
        paths::ensure_dir(dir).map_err(|e| ResizeError::FileWrite {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| ResizeError::FileWrite {
            path: log_path,
            source: e,
        })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer.with_writer(file).with_ansi(false))
        .try_init()
        .map_err(|e| ResizeError::internal(format!("Failed to init logging: {}", e)))?;

    Ok(())
}
