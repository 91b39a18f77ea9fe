//! Software license codes

use serde_json::Value;

use crate::http::RequestPayload;
use crate::response::ApiResponse;
use crate::services::ServiceClient;
use crate::validation::validate_array;

const VERIFY_PATH: &str = "software/v1/license/verify";

#[derive(Debug, Clone)]
pub struct SoftwareLicenseService {
    client: ServiceClient,
}

impl SoftwareLicenseService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Verify a license code; fields are passed through as form data
    pub async fn verify(&self, data: &Value) -> ApiResponse {
        match validate_array(data) {
            Ok(data) => self.client.post(VERIFY_PATH, RequestPayload::Form(data.clone())).await,
            Err(err) => err.into(),
        }
    }
}
