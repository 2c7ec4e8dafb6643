//! Error types for mouse-resize
//!
//! Provides a unified error type used across the mouse-resize crates.

use std::path::PathBuf;

/// Main error type for mouse-resize operations
#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Remote Control Errors ===

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Invalid remote command: {0}")]
    InvalidCommand(String),

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResizeError {
    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create an invalid command error
    pub fn invalid_command(msg: impl Into<String>) -> Self {
        Self::InvalidCommand(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using ResizeError
pub type Result<T> = std::result::Result<T, ResizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = ResizeError::Io(io_err);
        assert!(err.to_string().contains("IO error"));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_error_display_file_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = ResizeError::FileWrite {
            path: PathBuf::from("/root/mouse-resize.log"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to write file"));
        assert!(msg.contains("/root/mouse-resize.log"));
    }

    #[test]
    fn test_error_display_protocol() {
        let err = ResizeError::protocol("frame too large");
        assert_eq!(err.to_string(), "Protocol error: frame too large");
    }

    #[test]
    fn test_error_display_invalid_command() {
        let err = ResizeError::invalid_command("unknown command: resize-tab");
        assert_eq!(
            err.to_string(),
            "Invalid remote command: unknown command: resize-tab"
        );
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(ResizeError::config("x"), ResizeError::Config(_)));
        assert!(matches!(ResizeError::internal("x"), ResizeError::Internal(_)));
        assert!(matches!(ResizeError::protocol("x"), ResizeError::Protocol(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))?;
            Ok(())
        }

        assert!(matches!(fails(), Err(ResizeError::Io(_))));
    }
}
