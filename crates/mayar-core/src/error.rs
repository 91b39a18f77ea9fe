//! Error types for the Mayar core library
//!
//! This module defines the crate-level error used by the non-envelope
//! surfaces (provider setup, registry lookup, verb parsing). Failures that
//! happen inside a resource service call never surface as `Error`; they are
//! converted into an [`ApiResponse`](crate::ApiResponse) by the normalizer.

use thiserror::Error;

use crate::http::TransportError;
use crate::validation::ValidationError;

/// Main error type for Mayar operations
#[derive(Error, Debug)]
pub enum Error {
    /// Request payload rejected before dispatch
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unsupported HTTP verb or configuration value
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Network or HTTP status failure reported by the adapter
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Resource name that is not registered for the active API version
    #[error("Service {name} not found in version {version}")]
    UnknownResource { name: String, version: String },

    /// HTTP client construction errors
    #[error("HTTP client error: {message}")]
    Http {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error without a source
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Status code this error maps to when rendered as an envelope
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(err) => err.code(),
            Error::InvalidArgument { .. } => 400,
            Error::Transport(err) => err.status.unwrap_or(500),
            Error::UnknownResource { .. } => 404,
            _ => 500,
        }
    }
}
