//! Error types for wr operations.
//!
//! This module defines [`WrError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Expected setup failures are not errors: steps report them through
//!   [`StepExecution::Failed`](crate::steps::StepExecution::Failed)
//! - Use `WrError` for conditions the caller has to handle distinctly
//! - Use `anyhow::Error` (via `WrError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for wr operations.
#[derive(Debug, Error)]
pub enum WrError {
    /// Configuration file not found at expected location.
    #[error("Config file '{}' not found.", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {}: {message}", .path.display())]
    ConfigParseError { path: PathBuf, message: String },

    /// Named command is not defined in the configuration.
    #[error("Command '{name}' not found. Available commands: {}", .available.join(", "))]
    UnknownCommand {
        name: String,
        available: Vec<String>,
    },

    /// A setup step hit a condition it does not model as a failure.
    #[error("Step '{step}' hit an unexpected defect: {message}")]
    StepDefect { step: String, message: String },

    /// Process could not be spawned or waited on.
    #[error("Failed to start '{command}': {reason}")]
    CommandFailed {
        command: String,
        reason: std::io::Error,
    },

    /// Prompt could not be answered.
    #[error("Cannot prompt for '{key}': {message}")]
    Prompt { key: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for wr operations.
pub type Result<T> = std::result::Result<T, WrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = WrError::ConfigNotFound {
            path: PathBuf::from("wr.yml"),
        };
        assert_eq!(err.to_string(), "Config file 'wr.yml' not found.");
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = WrError::ConfigParseError {
            path: PathBuf::from("/project/wr.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/project/wr.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn unknown_command_lists_available() {
        let err = WrError::UnknownCommand {
            name: "deploy".into(),
            available: vec!["test".into(), "lint".into()],
        };
        assert_eq!(
            err.to_string(),
            "Command 'deploy' not found. Available commands: test, lint"
        );
    }

    #[test]
    fn step_defect_displays_step_and_message() {
        let err = WrError::StepDefect {
            step: "Install uv".into(),
            message: "home directory unknown".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Install uv"));
        assert!(msg.contains("home directory unknown"));
    }

    #[test]
    fn command_failed_keeps_the_io_reason() {
        let err = WrError::CommandFailed {
            command: "uv sync".into(),
            reason: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to start 'uv sync': denied");
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: WrError = io_err.into();
        assert!(matches!(err, WrError::Io(_)));
    }

    #[test]
    fn anyhow_error_is_transparent() {
        let err: WrError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
