//! HTTP request builder for Mayar API requests
//!
//! Resolves endpoint paths against the configured base URL and encodes
//! [`RequestPayload`] values into reqwest request builders.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::multipart::Form;
use serde_json::{Map, Value};
use url::Url;

use crate::http::{HttpMethod, RequestPayload};
use crate::{Error, Result};

/// Builder for constructing requests against one base URL
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
}

impl RequestBuilder {
    /// Create a builder for a base URL; a trailing slash is implied
    pub fn new(base_url: &str) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| Error::Http {
            message: format!("Invalid base URL: {}", base_url),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL from the base URL and an endpoint path
    pub fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Http {
                message: format!("Failed to join path: {}", path),
                source: Some(Box::new(e)),
            })
    }

    /// Attach a payload to a request using the encoding it is tagged with
    ///
    /// GET requests always carry their payload as a query string.
    pub fn apply_payload(
        &self,
        request: reqwest::RequestBuilder,
        method: HttpMethod,
        payload: RequestPayload,
    ) -> reqwest::RequestBuilder {
        if method == HttpMethod::Get {
            let pairs = flatten_params(&payload.as_value());
            return if pairs.is_empty() { request } else { request.query(&pairs) };
        }

        match payload {
            RequestPayload::Form(map) => request.form(&flatten_params(&Value::Object(map))),
            RequestPayload::Json(body) => request.json(&body),
            RequestPayload::Multipart(map) => {
                let form = flatten_params(&Value::Object(map))
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                request.multipart(form)
            }
            RequestPayload::Empty => request,
        }
    }
}

/// Bytes escaped inside one path segment: everything but RFC 3986 unreserved
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Append caller-supplied values to an endpoint path, one segment each
///
/// Each value is percent-encoded so `/`, `?` and `#` stay inside its segment.
/// Dot segments (`.` and `..`) are not escaped and must be rejected by the
/// caller.
pub fn endpoint_path(base: &str, segments: &[&str]) -> String {
    segments.iter().fold(base.trim_end_matches('/').to_string(), |mut path, segment| {
        path.push('/');
        path.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        path
    })
}

/// Flatten a JSON value into `key=value` pairs using bracket notation
///
/// Nested objects and arrays become `parent[child]` / `items[0][name]`,
/// booleans are rendered as `1`/`0` and nulls are skipped. Non-object roots
/// produce no pairs.
pub fn flatten_params(value: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(map) = value {
        flatten_map(map, None, &mut pairs);
    }
    pairs
}

fn flatten_map(map: &Map<String, Value>, prefix: Option<&str>, pairs: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let name = match prefix {
            Some(prefix) => format!("{}[{}]", prefix, key),
            None => key.clone(),
        };
        flatten_value(value, name, pairs);
    }
}

fn flatten_value(value: &Value, name: String, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((name, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => pairs.push((name, number.to_string())),
        Value::String(text) => pairs.push((name, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(item, format!("{}[{}]", name, index), pairs);
            }
        }
        Value::Object(map) => flatten_map(map, Some(&name), pairs),
    }
}
