//! Invoices

use serde_json::Value;

use crate::http::{endpoint_path, RequestPayload};
use crate::response::ApiResponse;
use crate::services::ServiceClient;
use crate::validation::{validate_array, validate_inquiry, validate_path_segment, validate_required_str};

const INVOICE_PATH: &str = "hl/v1/invoice";
const CREATE_PATH: &str = "hl/v1/invoice/create";
const EDIT_PATH: &str = "hl/v1/invoice/edit";

const CREATE_FIELDS: &[&str] = &["name", "email", "mobile", "redirectUrl", "description", "items"];
const EDIT_FIELDS: &[&str] = &["redirectUrl", "description"];

#[derive(Debug, Clone)]
pub struct InvoiceService {
    client: ServiceClient,
}

impl InvoiceService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Create an invoice; the payload is sent as JSON
    pub async fn create(&self, payload: &Value) -> ApiResponse {
        match validate_inquiry(payload, CREATE_FIELDS) {
            Ok(_) => self.client.post(CREATE_PATH, RequestPayload::json(payload.clone())).await,
            Err(err) => err.into(),
        }
    }

    /// Edit an invoice; `id` is merged into the JSON body
    pub async fn edit(&self, id: &str, payload: &Value) -> ApiResponse {
        if let Err(err) = validate_required_str(id, "id") {
            return err.into();
        }
        let mut body = match validate_inquiry(payload, EDIT_FIELDS) {
            Ok(body) => body.clone(),
            Err(err) => return err.into(),
        };
        body.insert("id".to_string(), Value::String(id.to_string()));

        self.client.post(EDIT_PATH, RequestPayload::Json(Value::Object(body))).await
    }

    pub async fn list(&self, query: &Value) -> ApiResponse {
        match validate_array(query) {
            Ok(query) => self.client.get(INVOICE_PATH, RequestPayload::Form(query.clone())).await,
            Err(err) => err.into(),
        }
    }

    /// List invoices with a given `status`
    pub async fn list_filtered(&self, query: &Value) -> ApiResponse {
        match validate_inquiry(query, &["status"]) {
            Ok(query) => self.client.get(INVOICE_PATH, RequestPayload::Form(query.clone())).await,
            Err(err) => err.into(),
        }
    }

    pub async fn detail(&self, id: &str) -> ApiResponse {
        if let Err(err) = validate_path_segment(id, "id") {
            return err.into();
        }
        self.client.get(&endpoint_path(INVOICE_PATH, &[id]), RequestPayload::Empty).await
    }

    /// Open or close an invoice
    pub async fn change_status(&self, status: &str, id: &str) -> ApiResponse {
        if let Err(err) = validate_path_segment(status, "status").and_then(|_| validate_path_segment(id, "id")) {
            return err.into();
        }
        self.client
            .get(&endpoint_path(INVOICE_PATH, &[status, id]), RequestPayload::Empty)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingAdapter;
    use serde_json::json;

    #[tokio::test]
    async fn test_detail_keeps_id_in_one_segment() {
        let adapter = RecordingAdapter::replying(json!({"statusCode": 200}));
        let service = InvoiceService::new(adapter.client());

        service.detail("../balance").await;
        service.detail("inv?status=paid").await;
        service.change_status("close", "a/b").await;

        let paths: Vec<String> = adapter.recorded().into_iter().map(|(_, path, _)| path).collect();
        assert_eq!(
            paths,
            vec![
                "hl/v1/invoice/..%2Fbalance",
                "hl/v1/invoice/inv%3Fstatus%3Dpaid",
                "hl/v1/invoice/close/a%2Fb",
            ]
        );
    }

    #[tokio::test]
    async fn test_dot_segment_id_is_rejected() {
        let adapter = RecordingAdapter::replying(json!({"statusCode": 200}));
        let service = InvoiceService::new(adapter.client());

        let response = service.detail("..").await;
        assert!(!response.is_success());
        assert_eq!(response.status_code(), 400);
        assert_eq!(response.message(), "Field 'id' must not be a relative path segment.");

        let response = service.change_status(".", "inv_1").await;
        assert_eq!(response.message(), "Field 'status' must not be a relative path segment.");
        assert!(adapter.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_edit_merges_id() {
        let adapter = RecordingAdapter::replying(json!({"statusCode": 200}));
        let service = InvoiceService::new(adapter.client());

        let response = service
            .edit("inv_9", &json!({"redirectUrl": "https://shop.example", "description": "updated"}))
            .await;
        assert!(response.is_success());

        let recorded = adapter.recorded();
        assert_eq!(recorded[0].1, "hl/v1/invoice/edit");
        assert_eq!(
            recorded[0].2,
            RequestPayload::Json(json!({
                "redirectUrl": "https://shop.example",
                "description": "updated",
                "id": "inv_9"
            }))
        );
    }

    #[tokio::test]
    async fn test_list_filtered_requires_status() {
        let adapter = RecordingAdapter::replying(json!({}));
        let service = InvoiceService::new(adapter.client());

        let response = service.list_filtered(&json!({"page": 1})).await;
        assert_eq!(response.message(), "Field status is missing");

        service.list_filtered(&json!({"status": "paid"})).await;
        assert_eq!(adapter.recorded()[0].1, "hl/v1/invoice");
    }

    #[tokio::test]
    async fn test_change_status_checks_status_first() {
        let adapter = RecordingAdapter::replying(json!({}));
        let service = InvoiceService::new(adapter.client());

        let response = service.change_status("", "").await;
        assert!(response.message().contains("'status'"));

        service.change_status("close", "inv_1").await;
        assert_eq!(adapter.recorded()[0].1, "hl/v1/invoice/close/inv_1");
    }
}
