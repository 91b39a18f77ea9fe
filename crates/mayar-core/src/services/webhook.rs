//! Webhook registration, testing and delivery history

use serde_json::{Map, Value};

use crate::http::RequestPayload;
use crate::response::ApiResponse;
use crate::services::ServiceClient;
use crate::validation::{validate_array, validate_required_str};

const HISTORY_PATH: &str = "hl/v1/webhook/history";
const REGISTER_PATH: &str = "hl/v1/webhook/register";
const TEST_PATH: &str = "hl/v1/webhook/test";
const RETRY_PATH: &str = "hl/v1/webhook/retry";

#[derive(Debug, Clone)]
pub struct WebhookService {
    client: ServiceClient,
}

impl WebhookService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Delivery history, filtered by `query`
    pub async fn history(&self, query: &Value) -> ApiResponse {
        match validate_array(query) {
            Ok(query) => self.client.get(HISTORY_PATH, RequestPayload::Form(query.clone())).await,
            Err(err) => err.into(),
        }
    }

    /// Register the URL that receives webhook events
    pub async fn register_url(&self, url: &str) -> ApiResponse {
        self.post_field(REGISTER_PATH, "urlHook", url).await
    }

    /// Ask the provider to send a test event to `url`
    pub async fn test_url(&self, url: &str) -> ApiResponse {
        self.post_field(TEST_PATH, "urlHook", url).await
    }

    /// Redeliver one history entry
    pub async fn retry(&self, history_id: &str) -> ApiResponse {
        self.post_field(RETRY_PATH, "webhookHistoryId", history_id).await
    }

    async fn post_field(&self, path: &str, field: &str, value: &str) -> ApiResponse {
        if let Err(err) = validate_required_str(value, field) {
            return err.into();
        }
        let mut form = Map::new();
        form.insert(field.to_string(), Value::String(value.to_string()));
        self.client.post(path, RequestPayload::Form(form)).await
    }
}
