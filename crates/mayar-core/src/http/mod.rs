//! HTTP layer for Mayar API communication
//!
//! This module provides:
//! - Authentication headers for bearer tokens
//! - A pluggable adapter trait with a reqwest implementation
//! - Request building with form, JSON and multipart encodings
//! - Normalization of every outcome into an [`ApiResponse`](crate::ApiResponse)

pub mod adapter;
pub mod auth;
pub mod builder;
pub mod client;
pub mod error;
pub mod normalizer;

pub use adapter::{AdapterResult, Headers, HttpAdapter, HttpMethod, RawResponse, RequestPayload};
pub use auth::{create_auth_handler, ApiToken, AuthHandler, NoAuth};
pub use builder::{endpoint_path, flatten_params, RequestBuilder};
pub use client::{Environment, HttpClientConfig, ReqwestAdapter, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
pub use error::TransportError;
pub use normalizer::ResponseNormalizer;

// Re-export commonly used types
pub use reqwest::{Method, StatusCode};
