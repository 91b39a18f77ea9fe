//! Pluggable HTTP adapter abstraction
//!
//! An [`HttpAdapter`] turns `(method, path, payload, headers)` into exactly
//! one HTTP exchange. Implementations return the raw status and body for 2xx
//! responses and a [`TransportError`] for everything else; interpreting the
//! body is left to the normalizer.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::TransportError;
use crate::{Error, Result};

/// Extra per-request headers
pub type Headers = HashMap<String, String>;

/// Outcome of a single adapter exchange
pub type AdapterResult = std::result::Result<RawResponse, TransportError>;

/// Verbs accepted by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "patch" => Ok(HttpMethod::Patch),
            "delete" => Ok(HttpMethod::Delete),
            _ => Err(Error::invalid_argument(format!("Unsupported HTTP method: {}", s))),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request body, tagged with its wire encoding
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestPayload {
    /// URL-encoded form fields; a query string for GET
    Form(Map<String, Value>),
    /// JSON document body
    Json(Value),
    /// One text part per entry
    Multipart(Map<String, Value>),
    #[default]
    Empty,
}

impl RequestPayload {
    /// Form payload from a JSON value; non-objects become an empty payload
    pub fn form(value: Value) -> Self {
        match value {
            Value::Object(map) => RequestPayload::Form(map),
            _ => RequestPayload::Empty,
        }
    }

    pub fn json(value: Value) -> Self {
        RequestPayload::Json(value)
    }

    /// Pick the encoding from a tagged payload
    ///
    /// An object holding a `json` key sends that entry as JSON, one holding
    /// a `multipart` key sends it as multipart; any other object is sent as
    /// form fields.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return RequestPayload::Empty;
        };

        if let Some(body) = map.remove("json") {
            return RequestPayload::Json(body);
        }
        if let Some(parts) = map.remove("multipart") {
            return match parts {
                Value::Object(parts) => RequestPayload::Multipart(parts),
                _ => RequestPayload::Multipart(Map::new()),
            };
        }
        if map.is_empty() {
            RequestPayload::Empty
        } else {
            RequestPayload::Form(map)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RequestPayload::Form(map) | RequestPayload::Multipart(map) => map.is_empty(),
            RequestPayload::Json(value) => value.is_null(),
            RequestPayload::Empty => true,
        }
    }

    /// Payload viewed as a JSON value, for query-string flattening
    pub fn as_value(&self) -> Value {
        match self {
            RequestPayload::Form(map) | RequestPayload::Multipart(map) => Value::Object(map.clone()),
            RequestPayload::Json(value) => value.clone(),
            RequestPayload::Empty => Value::Null,
        }
    }

    /// Short encoding name used in logs
    pub fn encoding(&self) -> &'static str {
        match self {
            RequestPayload::Form(_) => "form",
            RequestPayload::Json(_) => "json",
            RequestPayload::Multipart(_) => "multipart",
            RequestPayload::Empty => "empty",
        }
    }
}

/// Status and undecoded body of a 2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 response carrying a JSON document
    pub fn ok_json(body: &Value) -> Self {
        Self::new(200, body.to_string())
    }
}

/// One HTTP exchange per call
#[async_trait]
pub trait HttpAdapter: Send + Sync {
    /// Send a request and return the raw response or a transport error
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: RequestPayload,
        headers: &Headers,
    ) -> AdapterResult;

    async fn get(&self, path: &str, payload: RequestPayload, headers: &Headers) -> AdapterResult {
        self.request(HttpMethod::Get, path, payload, headers).await
    }

    async fn post(&self, path: &str, payload: RequestPayload, headers: &Headers) -> AdapterResult {
        self.request(HttpMethod::Post, path, payload, headers).await
    }

    async fn put(&self, path: &str, payload: RequestPayload, headers: &Headers) -> AdapterResult {
        self.request(HttpMethod::Put, path, payload, headers).await
    }

    async fn patch(&self, path: &str, payload: RequestPayload, headers: &Headers) -> AdapterResult {
        self.request(HttpMethod::Patch, path, payload, headers).await
    }

    async fn delete(&self, path: &str, payload: RequestPayload, headers: &Headers) -> AdapterResult {
        self.request(HttpMethod::Delete, path, payload, headers).await
    }

    /// Dispatch on a verb given as text
    ///
    /// Unsupported verbs fail with [`Error::InvalidArgument`] before any
    /// network activity; transport failures surface as [`Error::Transport`].
    async fn request_with_verb(
        &self,
        verb: &str,
        path: &str,
        payload: RequestPayload,
        headers: &Headers,
    ) -> Result<RawResponse> {
        let method = verb.parse::<HttpMethod>()?;
        Ok(self.request(method, path, payload, headers).await?)
    }
}
