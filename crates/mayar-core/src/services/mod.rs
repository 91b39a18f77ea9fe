//! Resource services for the Mayar headless API
//!
//! Each service wraps one resource type. Every method validates its input,
//! issues exactly one request through the shared adapter and returns an
//! [`ApiResponse`]. Service methods never return `Err`: validation and
//! transport failures come back as envelopes with `success == false`.

pub mod customer;
pub mod discount_coupon;
pub mod installment;
pub mod invoice;
pub mod product;
pub mod request_payment;
pub mod saas_license;
pub mod software_license;
pub mod transaction;
pub mod webhook;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::http::{Headers, HttpAdapter, HttpMethod, RequestPayload, ResponseNormalizer};
use crate::response::ApiResponse;

pub use customer::CustomerService;
pub use discount_coupon::DiscountCouponService;
pub use installment::InstallmentService;
pub use invoice::InvoiceService;
pub use product::ProductService;
pub use request_payment::RequestPaymentService;
pub use saas_license::SaasLicenseService;
pub use software_license::SoftwareLicenseService;
pub use transaction::TransactionService;
pub use webhook::WebhookService;

/// Adapter handle shared by every service built from one provider
#[derive(Clone)]
pub struct ServiceClient {
    adapter: Arc<dyn HttpAdapter>,
}

impl ServiceClient {
    pub fn new(adapter: Arc<dyn HttpAdapter>) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> Arc<dyn HttpAdapter> {
        Arc::clone(&self.adapter)
    }

    /// Send one request and normalize whatever comes back
    pub async fn call(&self, method: HttpMethod, path: &str, payload: RequestPayload) -> ApiResponse {
        let result = self.adapter.request(method, path, payload, &Headers::new()).await;
        if let Err(error) = &result {
            debug!(%method, path, status = ?error.status, "Request failed: {}", error);
        }
        ResponseNormalizer::normalize(&result, None)
    }

    pub async fn get(&self, path: &str, payload: RequestPayload) -> ApiResponse {
        self.call(HttpMethod::Get, path, payload).await
    }

    pub async fn post(&self, path: &str, payload: RequestPayload) -> ApiResponse {
        self.call(HttpMethod::Post, path, payload).await
    }
}

impl fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient").finish_non_exhaustive()
    }
}
