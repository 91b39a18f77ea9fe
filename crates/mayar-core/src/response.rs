//! Uniform result envelope returned by every public operation
//!
//! An [`ApiResponse`] always carries `success`, `message`, `data` and
//! `status_code`, plus whichever pagination keys the provider sent. The
//! envelope is immutable once built; serialization is a pure function of
//! its fields.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pagination keys copied verbatim from a raw response body
pub const PAGINATION_KEYS: [&str; 4] = ["hasMore", "pageCount", "pageSize", "page"];

/// Optional pagination metadata
///
/// Values keep the JSON type the provider used; nothing is coerced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    has_more: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_size: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<Value>,
}

impl Pagination {
    /// Pick the pagination keys present (and non-null) in a decoded body
    pub fn extract(body: &Map<String, Value>) -> Self {
        let pick = |key: &str| body.get(key).filter(|value| !value.is_null()).cloned();

        Self {
            has_more: pick("hasMore"),
            page_count: pick("pageCount"),
            page_size: pick("pageSize"),
            page: pick("page"),
        }
    }

    /// True when no pagination key was present
    pub fn is_empty(&self) -> bool {
        self.has_more.is_none() && self.page_count.is_none() && self.page_size.is_none() && self.page.is_none()
    }

    pub fn has_more(&self) -> Option<&Value> {
        self.has_more.as_ref()
    }

    pub fn page_count(&self) -> Option<&Value> {
        self.page_count.as_ref()
    }

    pub fn page_size(&self) -> Option<&Value> {
        self.page_size.as_ref()
    }

    pub fn page(&self) -> Option<&Value> {
        self.page.as_ref()
    }

    /// Present keys with their values, in wire order
    pub fn entries(&self) -> Vec<(&'static str, &Value)> {
        let values = [&self.has_more, &self.page_count, &self.page_size, &self.page];
        PAGINATION_KEYS
            .iter()
            .zip(values)
            .filter_map(|(key, value)| value.as_ref().map(|v| (*key, v)))
            .collect()
    }
}

/// Result envelope shared by success and failure outcomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    success: bool,
    message: String,
    #[serde(default)]
    data: Value,
    status_code: u16,
    #[serde(flatten)]
    pagination: Pagination,
}

impl ApiResponse {
    /// Build a success envelope
    pub fn success(message: impl Into<String>, data: Value, status_code: u16, pagination: Pagination) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            status_code,
            pagination,
        }
    }

    /// Build an error envelope; `data` is always null
    pub fn error(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Value::Null,
            status_code,
            pagination: Pagination::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Decoded payload; JSON null when the provider sent none
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Take ownership of the payload
    pub fn into_data(self) -> Value {
        self.data
    }

    /// Wire representation as a JSON value
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("success".to_string(), Value::Bool(self.success));
        map.insert("message".to_string(), Value::String(self.message.clone()));
        map.insert("data".to_string(), self.data.clone());
        map.insert("status_code".to_string(), Value::from(self.status_code));
        for (key, value) in self.pagination.entries() {
            map.insert(key.to_string(), value.clone());
        }
        Value::Object(map)
    }

    /// Compact JSON string
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Pretty-printed JSON string
    pub fn to_json_pretty(&self) -> String {
        // Serializing a Value into a String cannot fail
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_default()
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_envelope_shape() {
        let response = ApiResponse::error("not found", 404);
        assert_eq!(
            response.to_value(),
            json!({"success": false, "message": "not found", "data": null, "status_code": 404})
        );
    }

    #[test]
    fn test_pagination_extract_skips_absent_and_null() {
        let body = json!({"page": 2, "pageSize": null, "hasMore": true, "other": 1});
        let pagination = Pagination::extract(body.as_object().unwrap());

        assert_eq!(pagination.page(), Some(&json!(2)));
        assert_eq!(pagination.has_more(), Some(&json!(true)));
        assert!(pagination.page_size().is_none());
        assert!(pagination.page_count().is_none());
        assert_eq!(pagination.entries().len(), 2);
    }

    #[test]
    fn test_serde_matches_to_value() {
        let body = json!({"page": 1, "pageCount": 4});
        let response = ApiResponse::success(
            "ok",
            json!([{"id": 1}]),
            200,
            Pagination::extract(body.as_object().unwrap()),
        );

        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized, response.to_value());

        let back: ApiResponse = serde_json::from_value(serialized).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn test_display_is_pretty_json() {
        let response = ApiResponse::error("boom", 500);
        let rendered = response.to_string();
        assert!(rendered.contains("\"status_code\": 500"));
        assert!(rendered.contains('\n'));
    }
}
