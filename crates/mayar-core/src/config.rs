//! Provider configuration
//!
//! [`ProviderConfig`] can be built in code, deserialized from a config
//! file, or read from `MAYAR_*` environment variables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::http::client::DEFAULT_TIMEOUT_SECS;
use crate::http::{Environment, HttpClientConfig};
use crate::{Error, Result};

pub const ENV_API_TOKEN: &str = "MAYAR_API_TOKEN";
pub const ENV_WEBHOOK_TOKEN: &str = "MAYAR_WEBHOOK_TOKEN";
pub const ENV_PRODUCTION: &str = "MAYAR_PRODUCTION";
pub const ENV_API_VERSION: &str = "MAYAR_API_VERSION";
pub const ENV_BASE_URL: &str = "MAYAR_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MAYAR_TIMEOUT_SECS";

/// API generation whose services are exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ApiVersion {
    #[default]
    #[serde(alias = "v1")]
    V1,
    #[serde(alias = "v2")]
    V2,
}

impl ApiVersion {
    pub const ALL: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "V1",
            ApiVersion::V2 => "V2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "V1" => Ok(ApiVersion::V1),
            "V2" => Ok(ApiVersion::V2),
            _ => Err(Error::invalid_argument(format!(
                "Invalid version: {}. Allowed values are V1 or V2.",
                s
            ))),
        }
    }
}

/// Settings used to build a [`MayarProvider`](crate::MayarProvider)
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Bearer token for API calls
    pub api_token: Option<String>,
    /// Token used to authenticate incoming webhooks
    pub webhook_token: Option<String>,
    /// Production host when true, sandbox host otherwise
    pub is_production: bool,
    pub version: ApiVersion,
    /// Base URL override
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            webhook_token: None,
            is_production: true,
            version: ApiVersion::V1,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |token: &Option<String>| token.as_ref().map(|_| "***");
        f.debug_struct("ProviderConfig")
            .field("api_token", &redact(&self.api_token))
            .field("webhook_token", &redact(&self.webhook_token))
            .field("is_production", &self.is_production)
            .field("version", &self.version)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_webhook_token(mut self, token: impl Into<String>) -> Self {
        self.webhook_token = Some(token.into());
        self
    }

    pub fn production(mut self, is_production: bool) -> Self {
        self.is_production = is_production;
        self
    }

    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Defaults overlaid with whatever `MAYAR_*` variables are set
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Load a `.env` file if present, then read the environment
    pub fn from_dotenv() -> Result<Self> {
        // A missing .env file is not an error
        let _ = dotenv::dotenv();
        Self::from_env()
    }

    /// Overlay set `MAYAR_*` variables on top of this configuration
    pub fn merge_env(self) -> Result<Self> {
        self.merge_with(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary lookup, keyed by variable name
    pub fn merge_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(token) = lookup(ENV_WEBHOOK_TOKEN) {
            self.webhook_token = Some(token);
        }
        if let Some(flag) = lookup(ENV_PRODUCTION) {
            self.is_production = parse_flag(ENV_PRODUCTION, &flag)?;
        }
        if let Some(version) = lookup(ENV_API_VERSION) {
            self.version = version.parse()?;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = Some(base_url);
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout.trim().parse().map_err(|e| Error::Configuration {
                message: format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, timeout),
                source: Some(anyhow::Error::new(e)),
            })?;
        }
        Ok(self)
    }

    /// Environment selected by `is_production`
    pub fn environment(&self) -> Environment {
        Environment::from_production_flag(self.is_production)
    }

    /// Transport settings derived from this configuration
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            environment: self.environment(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::configuration(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}
