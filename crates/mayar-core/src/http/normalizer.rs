//! Response normalization for Mayar API responses
//!
//! Every outcome of a service call (a 2xx body, an API-level error reported
//! inside the body, a transport failure or a validation failure) is
//! converted into one [`ApiResponse`]. The normalizer is stateless and never
//! fails: missing fields fall back to defaults.

use serde_json::{Map, Value};
use tracing::warn;

use crate::http::{AdapterResult, RawResponse, TransportError};
use crate::response::{ApiResponse, Pagination};
use crate::validation::ValidationError;
use crate::Error;

/// Message used when an error carries no usable text
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Message used when a success body and the caller supply none
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Request succeeded";

/// Status assumed when nothing better is known
pub const FALLBACK_STATUS: u16 = 500;

/// Converts raw outcomes into [`ApiResponse`] envelopes
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Normalize a 2xx response body
    ///
    /// A body whose `statusCode` is present and not 200 is an API-level
    /// error even though the transport succeeded.
    pub fn normalize_body(body: &str, default_message: Option<&str>) -> ApiResponse {
        let decoded = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => {
                warn!(error = %e, "Response body is not valid JSON");
                Map::new()
            }
        };

        if let Some(status) = decoded.get("statusCode") {
            match body_status(status) {
                Some(200) => {}
                Some(status) => return ApiResponse::error(error_message(&decoded), status),
                None => return ApiResponse::error(error_message(&decoded), FALLBACK_STATUS),
            }
        }

        let message = text_field(&decoded, "messages")
            .or_else(|| text_field(&decoded, "message"))
            .or_else(|| default_message.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
        let data = decoded.get("data").cloned().unwrap_or(Value::Null);

        ApiResponse::success(message, data, 200, Pagination::extract(&decoded))
    }

    /// Normalize a 2xx raw response
    pub fn normalize_raw(response: &RawResponse, default_message: Option<&str>) -> ApiResponse {
        Self::normalize_body(&response.body, default_message)
    }

    /// Normalize a transport failure
    ///
    /// The message comes from the attached body when it decodes to a JSON
    /// object, and from the transport error itself otherwise.
    pub fn normalize_transport_error(error: &TransportError) -> ApiResponse {
        let status = error.status.unwrap_or(FALLBACK_STATUS);

        let message = match error.body().map(serde_json::from_str::<Value>) {
            Some(Ok(Value::Object(decoded))) => error_message(&decoded),
            _ => non_empty(&error.message).unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
        };

        ApiResponse::error(message, status)
    }

    /// Normalize a pre-flight validation failure
    pub fn normalize_validation_error(error: &ValidationError) -> ApiResponse {
        ApiResponse::error(error.to_string(), error.code())
    }

    /// Normalize any crate error
    pub fn normalize_error(error: &Error) -> ApiResponse {
        match error {
            Error::Validation(err) => Self::normalize_validation_error(err),
            Error::Transport(err) => Self::normalize_transport_error(err),
            other => ApiResponse::error(other.to_string(), other.status_code()),
        }
    }

    /// Normalize the outcome of one adapter exchange
    pub fn normalize(result: &AdapterResult, default_message: Option<&str>) -> ApiResponse {
        match result {
            Ok(response) => Self::normalize_raw(response, default_message),
            Err(error) => Self::normalize_transport_error(error),
        }
    }
}

impl From<ValidationError> for ApiResponse {
    fn from(error: ValidationError) -> Self {
        ResponseNormalizer::normalize_validation_error(&error)
    }
}

impl From<TransportError> for ApiResponse {
    fn from(error: TransportError) -> Self {
        ResponseNormalizer::normalize_transport_error(&error)
    }
}

/// `messages`, then `message`, then the generic error text
fn error_message(decoded: &Map<String, Value>) -> String {
    text_field(decoded, "messages")
        .or_else(|| text_field(decoded, "message"))
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

/// Field rendered as text; null, empty strings and empty containers count as absent
fn text_field(decoded: &Map<String, Value>, key: &str) -> Option<String> {
    match decoded.get(key)? {
        Value::Null => None,
        Value::String(text) => non_empty(text),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Numeric status from a body field; numeric strings are accepted
fn body_status(value: &Value) -> Option<u16> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_with_defaults() {
        let response = ResponseNormalizer::normalize_body(r#"{"data": {"id": "p1"}}"#, None);
        assert!(response.is_success());
        assert_eq!(response.message(), DEFAULT_SUCCESS_MESSAGE);
        assert_eq!(response.data(), &json!({"id": "p1"}));
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn test_message_precedence() {
        let body = r#"{"messages": "from messages", "message": "from message"}"#;
        let response = ResponseNormalizer::normalize_body(body, Some("default"));
        assert_eq!(response.message(), "from messages");

        let response = ResponseNormalizer::normalize_body(r#"{"message": "from message"}"#, Some("default"));
        assert_eq!(response.message(), "from message");

        let response = ResponseNormalizer::normalize_body("{}", Some("Balance retrieved"));
        assert_eq!(response.message(), "Balance retrieved");
    }

    #[test]
    fn test_status_code_200_is_success() {
        let response = ResponseNormalizer::normalize_body(r#"{"statusCode": 200, "data": []}"#, None);
        assert!(response.is_success());

        let response = ResponseNormalizer::normalize_body(r#"{"statusCode": "200"}"#, None);
        assert!(response.is_success());
    }

    #[test]
    fn test_api_level_error() {
        let response = ResponseNormalizer::normalize_body(r#"{"statusCode": 404, "messages": "not found"}"#, None);
        assert!(!response.is_success());
        assert_eq!(response.message(), "not found");
        assert_eq!(response.status_code(), 404);
        assert!(response.data().is_null());
    }

    #[test]
    fn test_api_level_error_without_message() {
        let response = ResponseNormalizer::normalize_body(r#"{"statusCode": "422", "data": {"x": 1}}"#, None);
        assert_eq!(response.message(), DEFAULT_ERROR_MESSAGE);
        assert_eq!(response.status_code(), 422);
        assert!(response.data().is_null());
    }

    #[test]
    fn test_non_numeric_status_code() {
        let response = ResponseNormalizer::normalize_body(r#"{"statusCode": "oops"}"#, None);
        assert!(!response.is_success());
        assert_eq!(response.status_code(), 500);
    }

    #[test]
    fn test_undecodable_success_body() {
        let response = ResponseNormalizer::normalize_body("<html>ok</html>", Some("fine"));
        assert!(response.is_success());
        assert_eq!(response.message(), "fine");
        assert!(response.data().is_null());
    }

    #[test]
    fn test_transport_error_with_json_body() {
        let error = TransportError::from_status(401, r#"{"statusCode": 401, "messages": "Unauthorized"}"#);
        let response = ResponseNormalizer::normalize_transport_error(&error);
        assert_eq!(response.message(), "Unauthorized");
        assert_eq!(response.status_code(), 401);
    }

    #[test]
    fn test_transport_error_with_json_body_without_message() {
        let error = TransportError::from_status(400, r#"{"errors": []}"#);
        let response = ResponseNormalizer::normalize_transport_error(&error);
        assert_eq!(response.message(), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_transport_error_with_unparsable_body() {
        let error = TransportError::from_status(503, "<html>Service Unavailable</html>");
        let response = ResponseNormalizer::normalize_transport_error(&error);
        assert_eq!(response.message(), error.message);
        assert_eq!(response.status_code(), 503);
    }

    #[test]
    fn test_network_failure() {
        let response = ResponseNormalizer::normalize_transport_error(&TransportError::network("connection refused"));
        assert_eq!(response.message(), "connection refused");
        assert_eq!(response.status_code(), 500);
    }

    #[test]
    fn test_validation_error() {
        let response: ApiResponse = ValidationError::InvalidContentType.into();
        assert!(!response.is_success());
        assert_eq!(response.status_code(), 400);
        assert_eq!(response.message(), ValidationError::InvalidContentType.to_string());
    }

    #[test]
    fn test_normalize_error_uses_error_status() {
        let error = Error::invalid_argument("Unsupported HTTP method: trace");
        let response = ResponseNormalizer::normalize_error(&error);
        assert_eq!(response.status_code(), 400);
        assert!(response.message().contains("trace"));
    }
}
