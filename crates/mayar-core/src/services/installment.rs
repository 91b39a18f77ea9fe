//! Installment plans

use serde_json::Value;

use crate::http::{endpoint_path, RequestPayload};
use crate::response::ApiResponse;
use crate::services::ServiceClient;
use crate::validation::{validate_create_installment, validate_path_segment};

const INSTALLMENT_PATH: &str = "hl/v1/installment";
const CREATE_PATH: &str = "hl/v1/installment/create";

#[derive(Debug, Clone)]
pub struct InstallmentService {
    client: ServiceClient,
}

impl InstallmentService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn detail(&self, installment_id: &str) -> ApiResponse {
        if let Err(err) = validate_path_segment(installment_id, "installmentId") {
            return err.into();
        }
        let path = endpoint_path(INSTALLMENT_PATH, &[installment_id]);
        self.client.get(&path, RequestPayload::Empty).await
    }

    /// Create an installment plan; the payload is sent as JSON
    pub async fn create(&self, payload: &Value) -> ApiResponse {
        match validate_create_installment(payload) {
            Ok(_) => self.client.post(CREATE_PATH, RequestPayload::json(payload.clone())).await,
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingAdapter;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_validates_nested_installment() {
        let adapter = RecordingAdapter::replying(json!({}));
        let service = InstallmentService::new(adapter.client());

        let response = service
            .create(&json!({
                "email": "a@b.co",
                "mobile": "0812",
                "name": "Ana",
                "amount": 900000,
                "installment": {"description": "3x", "interest": 0, "tenure": 3}
            }))
            .await;

        assert_eq!(response.message(), "Field 'installment.dueDate' is missing");
        assert!(adapter.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_detail_path() {
        let adapter = RecordingAdapter::replying(json!({"data": {"id": "in_1"}}));
        let service = InstallmentService::new(adapter.client());

        let response = service.detail("in_1").await;
        assert!(response.is_success());
        assert_eq!(adapter.recorded()[0].1, "hl/v1/installment/in_1");

        let response = service.detail("..").await;
        assert_eq!(response.message(), "Field 'installmentId' must not be a relative path segment.");
        assert_eq!(adapter.recorded().len(), 1);
    }
}
