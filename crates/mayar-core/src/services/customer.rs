//! Customer management and customer-portal magic links

use serde_json::Value;

use crate::http::RequestPayload;
use crate::response::ApiResponse;
use crate::services::ServiceClient;
use crate::validation::{validate_array, validate_inquiry};

const LIST_PATH: &str = "hl/v1/customer";
const MAGIC_LINK_PATH: &str = "hl/v1/customer/login/portal";
const CREATE_PATH: &str = "hl/v1/customer/create";
const UPDATE_PATH: &str = "hl/v1/customer/update";

/// Customer endpoints
#[derive(Debug, Clone)]
pub struct CustomerService {
    client: ServiceClient,
}

impl CustomerService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// List customers; `query` is sent as query parameters (`page`, `pageSize`)
    pub async fn list(&self, query: &Value) -> ApiResponse {
        match validate_array(query) {
            Ok(query) => self.client.get(LIST_PATH, RequestPayload::Form(query.clone())).await,
            Err(err) => err.into(),
        }
    }

    /// Send a customer-portal login link to `email`
    pub async fn create_magic_link(&self, data: &Value) -> ApiResponse {
        match validate_inquiry(data, &["email"]) {
            Ok(data) => self.client.post(MAGIC_LINK_PATH, RequestPayload::Form(data.clone())).await,
            Err(err) => err.into(),
        }
    }

    pub async fn create(&self, data: &Value) -> ApiResponse {
        match validate_inquiry(data, &["name", "email", "mobile"]) {
            Ok(data) => self.client.post(CREATE_PATH, RequestPayload::Form(data.clone())).await,
            Err(err) => err.into(),
        }
    }

    /// Move a customer from `fromEmail` to `toEmail`
    pub async fn update(&self, data: &Value) -> ApiResponse {
        match validate_inquiry(data, &["fromEmail", "toEmail"]) {
            Ok(data) => self.client.post(UPDATE_PATH, RequestPayload::Form(data.clone())).await,
            Err(err) => err.into(),
        }
    }
}
