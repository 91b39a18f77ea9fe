//! Product catalogue

use serde_json::{Map, Value};

use crate::http::{endpoint_path, RequestPayload};
use crate::response::ApiResponse;
use crate::services::ServiceClient;
use crate::validation::{validate_array, validate_inquiry, validate_path_segment, validate_required};

const PRODUCT_PATH: &str = "hl/v1/product";

#[derive(Debug, Clone)]
pub struct ProductService {
    client: ServiceClient,
}

impl ProductService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &Value) -> ApiResponse {
        match validate_array(query) {
            Ok(query) => self.client.get(PRODUCT_PATH, RequestPayload::Form(query.clone())).await,
            Err(err) => err.into(),
        }
    }

    /// List products of one type, named by `event`
    pub async fn list_by_type(&self, query: &Value) -> ApiResponse {
        let query = match validate_inquiry(query, &["event"]).and_then(|query| {
            validate_required(&query["event"], "event")?;
            validate_path_segment(&text(query, "event"), "event")?;
            Ok(query)
        }) {
            Ok(query) => query,
            Err(err) => return err.into(),
        };

        let path = endpoint_path(PRODUCT_PATH, &["type", &text(query, "event")]);
        self.client.get(&path, RequestPayload::Form(query.clone())).await
    }

    pub async fn detail(&self, product_id: &str) -> ApiResponse {
        if let Err(err) = validate_path_segment(product_id, "productId") {
            return err.into();
        }
        self.client
            .get(&endpoint_path(PRODUCT_PATH, &[product_id]), RequestPayload::Empty)
            .await
    }

    /// Open or close a product, from `{"id": .., "status": ..}`
    pub async fn change_status(&self, data: &Value) -> ApiResponse {
        let data = match validate_inquiry(data, &["id", "status"]) {
            Ok(data) => data,
            Err(err) => return err.into(),
        };
        let (status, id) = (text(data, "status"), text(data, "id"));
        if let Err(err) = validate_path_segment(&status, "status").and_then(|_| validate_path_segment(&id, "id")) {
            return err.into();
        }

        let path = endpoint_path(PRODUCT_PATH, &[&status, &id]);
        self.client.get(&path, RequestPayload::Empty).await
    }
}

/// Path segment for a field; non-string values use their JSON rendering
fn text(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(value)) => value.clone(),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingAdapter;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_by_type_uses_event_in_path() {
        let adapter = RecordingAdapter::replying(json!({"data": [], "page": 1, "pageSize": 10}));
        let service = ProductService::new(adapter.client());

        let response = service.list_by_type(&json!({"event": "webinar", "page": 1})).await;
        assert!(response.is_success());
        assert_eq!(response.pagination().page_size(), Some(&json!(10)));
        assert_eq!(adapter.recorded()[0].1, "hl/v1/product/type/webinar");
    }

    #[tokio::test]
    async fn test_change_status_path() {
        let adapter = RecordingAdapter::replying(json!({}));
        let service = ProductService::new(adapter.client());

        service.change_status(&json!({"id": "prod_1", "status": "close"})).await;
        assert_eq!(adapter.recorded()[0].1, "hl/v1/product/close/prod_1");

        let response = service.change_status(&json!({"status": "open"})).await;
        assert_eq!(response.message(), "Field id is missing");
    }

    #[tokio::test]
    async fn test_identifiers_stay_in_one_segment() {
        let adapter = RecordingAdapter::replying(json!({}));
        let service = ProductService::new(adapter.client());

        service.detail("prod/../../balance").await;
        service.list_by_type(&json!({"event": "webinar?x=1"})).await;
        service.change_status(&json!({"id": "p 1", "status": "open"})).await;
        service.change_status(&json!({"id": 42, "status": "close"})).await;

        let paths: Vec<String> = adapter.recorded().into_iter().map(|(_, path, _)| path).collect();
        assert_eq!(
            paths,
            vec![
                "hl/v1/product/prod%2F..%2F..%2Fbalance",
                "hl/v1/product/type/webinar%3Fx%3D1",
                "hl/v1/product/open/p%201",
                "hl/v1/product/close/42",
            ]
        );
    }

    #[tokio::test]
    async fn test_dot_segments_are_rejected() {
        let adapter = RecordingAdapter::replying(json!({}));
        let service = ProductService::new(adapter.client());

        let response = service.change_status(&json!({"id": "..", "status": "open"})).await;
        assert_eq!(response.message(), "Field 'id' must not be a relative path segment.");
        let response = service.list_by_type(&json!({"event": "."})).await;
        assert_eq!(response.message(), "Field 'event' must not be a relative path segment.");
        let response = service.detail("..").await;
        assert_eq!(response.status_code(), 400);
        assert!(adapter.recorded().is_empty());
    }
}
