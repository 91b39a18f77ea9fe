//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from mayar-core library
    #[error("{0}")]
    Core(#[from] mayar_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: expected {} format", path.display(), expected)]
    InvalidFormat { path: PathBuf, expected: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Get the exit code for this error
    ///
    /// Code 1 is reserved for an unsuccessful response envelope.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(mayar_core::Error::InvalidArgument { .. }) => 6,
            Self::Core(mayar_core::Error::Configuration { .. }) => 5,
            Self::Core(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::Io(_) => 7,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other(_) => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgs(_) | Self::Core(mayar_core::Error::InvalidArgument { .. })
        )
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_skip_envelope_failure_code() {
        let errors = [
            Error::config("missing token"),
            Error::invalid_args("bad data"),
            Error::Core(mayar_core::Error::invalid_argument("Unsupported HTTP method: TRACE")),
            Error::FileNotFound { path: PathBuf::from("payload.json") },
            Error::Other(anyhow::anyhow!("boom")),
        ];
        for error in errors {
            assert_ne!(error.exit_code(), 0);
            assert_ne!(error.exit_code(), 1);
        }
    }

    #[test]
    fn test_invalid_verb_shows_help() {
        let error = Error::Core(mayar_core::Error::invalid_argument("Unsupported HTTP method: TRACE"));
        assert!(error.should_show_help());
        assert_eq!(format_error(&error, false), "Error: Invalid argument: Unsupported HTTP method: TRACE");
    }

    #[test]
    fn test_other_error_keeps_context_chain() {
        let error: Error = anyhow::anyhow!("no such file")
            .context("Failed to read payload")
            .into();
        assert_eq!(error.to_string(), "Failed to read payload: no such file");
    }
}
