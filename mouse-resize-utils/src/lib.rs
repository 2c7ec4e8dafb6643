//! mouse-resize-utils: Common utilities shared across mouse-resize crates
//!
//! This crate provides:
//! - Unified error types ([`ResizeError`], [`Result`])
//! - Logging infrastructure ([`init_logging_with_config`], [`LogConfig`])
//! - XDG-compliant path utilities ([`paths`] module)

pub mod error;
pub mod logging;
pub mod paths;

pub use error::{ResizeError, Result};
pub use logging::{init_logging_with_config, LogConfig, LOG_ENV_VAR};
pub use paths::{log_dir, state_dir};
