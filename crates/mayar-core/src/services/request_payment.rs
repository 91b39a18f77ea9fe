//! Single payment requests

use serde_json::Value;

use crate::http::{endpoint_path, RequestPayload};
use crate::response::ApiResponse;
use crate::services::ServiceClient;
use crate::validation::{validate_array, validate_inquiry, validate_path_segment, validate_required_str};

const PAYMENT_PATH: &str = "hl/v1/payment";
const CREATE_PATH: &str = "hl/v1/payment/create";
const EDIT_PATH: &str = "hl/v1/payment/edit";

const CREATE_FIELDS: &[&str] = &["name", "email", "amount", "mobile", "redirectUrl", "description"];
const EDIT_FIELDS: &[&str] = &["name", "amount", "redirectUrl", "description"];

#[derive(Debug, Clone)]
pub struct RequestPaymentService {
    client: ServiceClient,
}

impl RequestPaymentService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, payload: &Value) -> ApiResponse {
        match validate_inquiry(payload, CREATE_FIELDS) {
            Ok(_) => self.client.post(CREATE_PATH, RequestPayload::json(payload.clone())).await,
            Err(err) => err.into(),
        }
    }

    /// Edit a payment request; the id is merged into the body as `transactionId`
    pub async fn edit(&self, transaction_id: &str, payload: &Value) -> ApiResponse {
        if let Err(err) = validate_required_str(transaction_id, "id") {
            return err.into();
        }
        let mut body = match validate_inquiry(payload, EDIT_FIELDS) {
            Ok(body) => body.clone(),
            Err(err) => return err.into(),
        };
        body.insert("transactionId".to_string(), Value::String(transaction_id.to_string()));

        self.client.post(EDIT_PATH, RequestPayload::Json(Value::Object(body))).await
    }

    pub async fn list(&self, query: &Value) -> ApiResponse {
        match validate_array(query) {
            Ok(query) => self.client.get(PAYMENT_PATH, RequestPayload::Form(query.clone())).await,
            Err(err) => err.into(),
        }
    }

    pub async fn list_filtered(&self, query: &Value) -> ApiResponse {
        match validate_inquiry(query, &["status"]) {
            Ok(query) => self.client.get(PAYMENT_PATH, RequestPayload::Form(query.clone())).await,
            Err(err) => err.into(),
        }
    }

    pub async fn detail(&self, transaction_id: &str) -> ApiResponse {
        if let Err(err) = validate_path_segment(transaction_id, "transactionId") {
            return err.into();
        }
        self.client
            .get(&endpoint_path(PAYMENT_PATH, &[transaction_id]), RequestPayload::Empty)
            .await
    }

    pub async fn change_status(&self, status: &str, transaction_id: &str) -> ApiResponse {
        if let Err(err) =
            validate_path_segment(status, "status").and_then(|_| validate_path_segment(transaction_id, "transactionId"))
        {
            return err.into();
        }
        self.client
            .get(&endpoint_path(PAYMENT_PATH, &[status, transaction_id]), RequestPayload::Empty)
            .await
    }
}
