//! reqwest-backed [`HttpAdapter`]
//!
//! Holds only configuration fixed at construction (base URL, auth headers,
//! timeout), so one instance can be shared behind an `Arc` by any number of
//! services and callers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::http::auth::{create_auth_handler, AuthHandler};
use crate::http::{
    AdapterResult, Headers, HttpAdapter, HttpMethod, RawResponse, RequestBuilder, RequestPayload, TransportError,
};
use crate::{Error, Result};

/// Production API host
pub const PRODUCTION_BASE_URL: &str = "https://api.mayar.id/";

/// Sandbox API host
pub const SANDBOX_BASE_URL: &str = "https://api.mayar.club/";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Target environment, selecting the API host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn from_production_flag(is_production: bool) -> Self {
        if is_production {
            Environment::Production
        } else {
            Environment::Sandbox
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Host selection when no override is given
    pub environment: Environment,
    /// Base URL override, mainly for mock servers
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientConfig {
    /// Base URL in effect: the override if set, else the environment host
    pub fn resolved_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or_else(|| self.environment.base_url())
    }
}

/// Default adapter sending requests with reqwest
#[derive(Debug, Clone)]
pub struct ReqwestAdapter {
    client: ReqwestClient,
    request_builder: RequestBuilder,
}

impl ReqwestAdapter {
    /// Create an adapter authenticating with `auth_handler`
    pub fn new(config: &HttpClientConfig, auth_handler: &dyn AuthHandler) -> Result<Self> {
        let mut headers = Headers::new();
        auth_handler.apply_auth(&mut headers);

        let mut default_headers = to_header_map(&headers)?;
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::Http {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        let request_builder = RequestBuilder::new(config.resolved_base_url())?;

        Ok(Self {
            client,
            request_builder,
        })
    }

    /// Create an adapter with an optional bearer token
    pub fn with_token(config: &HttpClientConfig, token: Option<&str>) -> Result<Self> {
        let auth = create_auth_handler(token);
        Self::new(config, auth.as_ref())
    }

    pub fn base_url(&self) -> &str {
        self.request_builder.base_url().as_str()
    }
}

#[async_trait]
impl HttpAdapter for ReqwestAdapter {
    #[instrument(skip(self, payload, headers), fields(encoding = payload.encoding()))]
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: RequestPayload,
        headers: &Headers,
    ) -> AdapterResult {
        let url = self
            .request_builder
            .build_url(path)
            .map_err(|e| TransportError::network(e.to_string()))?;
        let extra_headers = to_header_map(headers).map_err(|e| TransportError::network(e.to_string()))?;

        debug!(%method, %url, "Sending request");

        let request = self.client.request(method.into(), url).headers(extra_headers);
        let request = self.request_builder.apply_payload(request, method, payload);

        let response = request.send().await.map_err(TransportError::from_request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(|e| body_read_error(status, e))?;

        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        if !status.is_success() {
            return Err(TransportError::from_status(status.as_u16(), body));
        }

        Ok(RawResponse::new(status.as_u16(), body))
    }
}

/// Body read failure; error statuses are kept so the envelope reports them
fn body_read_error(status: StatusCode, error: reqwest::Error) -> TransportError {
    if status.is_success() {
        TransportError::from_request_error(error)
    } else {
        TransportError::unreadable_body(status.as_u16(), error)
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| Error::configuration(format!("Invalid header name: {}", key)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::configuration(format!("Invalid value for header {}", key)))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::auth::NoAuth;

    async fn refused_connection() -> reqwest::Error {
        ReqwestClient::new().get("http://127.0.0.1:1/").send().await.unwrap_err()
    }

    #[tokio::test]
    async fn test_body_read_error_keeps_error_status() {
        let err = body_read_error(StatusCode::BAD_GATEWAY, refused_connection().await);
        assert_eq!(err.status, Some(502));
        assert!(err.message.starts_with("HTTP request returned status code 502"));

        let err = body_read_error(StatusCode::OK, refused_connection().await);
        assert!(err.is_network_failure());
    }

    #[test]
    fn test_environment_hosts() {
        assert_eq!(Environment::from_production_flag(true).base_url(), "https://api.mayar.id/");
        assert_eq!(Environment::from_production_flag(false).base_url(), "https://api.mayar.club/");
    }

    #[test]
    fn test_base_url_override() {
        let config = HttpClientConfig {
            base_url: Some("http://127.0.0.1:9000".to_string()),
            ..Default::default()
        };
        let adapter = ReqwestAdapter::new(&config, &NoAuth).unwrap();
        assert_eq!(adapter.base_url(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn test_sandbox_adapter() {
        let config = HttpClientConfig {
            environment: Environment::Sandbox,
            ..Default::default()
        };
        let adapter = ReqwestAdapter::with_token(&config, Some("tok")).unwrap();
        assert_eq!(adapter.base_url(), SANDBOX_BASE_URL);
    }

    #[test]
    fn test_invalid_token_header_is_rejected() {
        let result = ReqwestAdapter::with_token(&HttpClientConfig::default(), Some("bad\ntoken"));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
