//! Transport error representation
//!
//! A [`TransportError`] is what the adapter reports when an exchange did not
//! produce a 2xx response: either a network failure (no status, no body) or
//! an HTTP status with whatever body the server sent.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Network or HTTP-status failure of a single exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct TransportError {
    /// HTTP status code if a response was received
    pub status: Option<u16>,
    /// Raw response body if a response was received
    pub body: Option<String>,
    /// Human-readable error message
    pub message: String,
}

impl TransportError {
    /// Failure with no response attached
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            message: message.into(),
        }
    }

    /// Failure carrying a response status and body
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: Some(body.into()),
            message: format!("HTTP request returned status code {}", status),
        }
    }

    /// Response status arrived but its body could not be read
    pub fn unreadable_body(status: u16, error: impl fmt::Display) -> Self {
        Self {
            status: Some(status),
            body: None,
            message: format!("HTTP request returned status code {} (body unreadable: {})", status, error),
        }
    }

    /// Create from a reqwest request error
    pub fn from_request_error(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("Request timed out: {}", error)
        } else if error.is_connect() {
            format!("Connection failed: {}", error)
        } else {
            error.to_string()
        };

        Self {
            status: error.status().map(|status| status.as_u16()),
            body: None,
            message,
        }
    }

    /// True when no response was received at all
    pub fn is_network_failure(&self) -> bool {
        self.status.is_none() && self.body.is_none()
    }

    /// Attached body, ignoring empty strings
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.trim().is_empty())
    }
}
