//! Shared utilities for command handlers

use crate::cli::Encoding;
use crate::config::Config;
use crate::error::{Error, Result};
use anyhow::Context;
use mayar_core::{MayarProvider, RequestPayload};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read the `--data` argument: inline JSON, or `@path` to a JSON/YAML file
///
/// A missing argument yields `Value::Null`.
pub fn read_payload(data: Option<&str>) -> Result<Value> {
    let Some(data) = data else {
        return Ok(Value::Null);
    };

    if let Some(path) = data.strip_prefix('@') {
        return read_payload_file(Path::new(path));
    }

    serde_json::from_str(data).map_err(|e| Error::invalid_args(format!("--data is not valid JSON: {}", e)))
}

fn read_payload_file(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload from {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}

/// Tag a payload with the requested body encoding
pub fn encode_payload(value: Value, encoding: Encoding) -> Result<RequestPayload> {
    if value.is_null() {
        return Ok(RequestPayload::Empty);
    }

    match (encoding, value) {
        (Encoding::Json, value) => Ok(RequestPayload::Json(value)),
        (Encoding::Form, Value::Object(map)) => Ok(RequestPayload::Form(map)),
        (Encoding::Multipart, Value::Object(map)) => Ok(RequestPayload::Multipart(map)),
        (encoding, _) => Err(Error::invalid_args(format!(
            "{:?} payloads must be a JSON object",
            encoding
        ))),
    }
}

/// Build a provider from the loaded configuration
pub fn build_provider(config: &Config, sandbox: bool) -> Result<MayarProvider> {
    let mut provider_config = config.provider.clone();
    if sandbox {
        provider_config.is_production = false;
    }
    if provider_config.api_token.is_none() {
        return Err(Error::config(
            "No API token configured. Set MAYAR_API_TOKEN or provider.api_token in the config file",
        ));
    }

    tracing::debug!(config = ?provider_config, "Building provider");
    Ok(MayarProvider::new(provider_config)?)
}
