//! SaaS membership license codes

use serde_json::Value;

use crate::http::RequestPayload;
use crate::response::ApiResponse;
use crate::services::ServiceClient;
use crate::validation::validate_inquiry;

const VERIFY_PATH: &str = "saas/v1/license/verify";
const ACTIVATE_PATH: &str = "saas/v1/license/activate";
const DEACTIVATE_PATH: &str = "saas/v1/license/deactivate";

const LICENSE_FIELDS: &[&str] = &["licenseCode", "productId"];

#[derive(Debug, Clone)]
pub struct SaasLicenseService {
    client: ServiceClient,
}

impl SaasLicenseService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn verify(&self, data: &Value) -> ApiResponse {
        self.license_call(VERIFY_PATH, data).await
    }

    pub async fn activate(&self, data: &Value) -> ApiResponse {
        self.license_call(ACTIVATE_PATH, data).await
    }

    pub async fn deactivate(&self, data: &Value) -> ApiResponse {
        self.license_call(DEACTIVATE_PATH, data).await
    }

    async fn license_call(&self, path: &str, data: &Value) -> ApiResponse {
        match validate_inquiry(data, LICENSE_FIELDS) {
            Ok(data) => self.client.post(path, RequestPayload::Form(data.clone())).await,
            Err(err) => err.into(),
        }
    }
}
