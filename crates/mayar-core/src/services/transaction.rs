//! Balance, transaction history and QRIS codes

use serde_json::{json, Value};

use crate::http::RequestPayload;
use crate::response::ApiResponse;
use crate::services::ServiceClient;
use crate::validation::{validate_array, validate_positive_amount};

const BALANCE_PATH: &str = "hl/v1/balance";
const PAID_PATH: &str = "hl/v1/transactions";
const UNPAID_PATH: &str = "hl/v1/transactions/unpaid";
const STATIC_QR_PATH: &str = "hl/v1/qrcode/static";
const DYNAMIC_QR_PATH: &str = "hl/v1/qrcode/create";

#[derive(Debug, Clone)]
pub struct TransactionService {
    client: ServiceClient,
}

impl TransactionService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Current account balance
    pub async fn balance(&self) -> ApiResponse {
        self.client.get(BALANCE_PATH, RequestPayload::Empty).await
    }

    /// Paid transactions, filtered by `query`
    pub async fn paid(&self, query: &Value) -> ApiResponse {
        self.history(PAID_PATH, query).await
    }

    /// Unpaid transactions, filtered by `query`
    pub async fn unpaid(&self, query: &Value) -> ApiResponse {
        self.history(UNPAID_PATH, query).await
    }

    /// Static QR code for a fixed amount; the amount travels in the query string
    pub async fn static_qr_code(&self, amount: i64) -> ApiResponse {
        if let Err(err) = validate_positive_amount(amount, "amount") {
            return err.into();
        }
        self.client
            .get(STATIC_QR_PATH, RequestPayload::json(json!({ "amount": amount })))
            .await
    }

    /// Single-use QR code for an amount
    pub async fn dynamic_qr_code(&self, amount: i64) -> ApiResponse {
        if let Err(err) = validate_positive_amount(amount, "amount") {
            return err.into();
        }
        self.client
            .post(DYNAMIC_QR_PATH, RequestPayload::json(json!({ "amount": amount })))
            .await
    }

    async fn history(&self, path: &str, query: &Value) -> ApiResponse {
        match validate_array(query) {
            Ok(query) => self.client.get(path, RequestPayload::Form(query.clone())).await,
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, TransportError};
    use crate::services::testing::RecordingAdapter;

    #[tokio::test]
    async fn test_non_positive_amount_is_rejected() {
        let adapter = RecordingAdapter::replying(json!({}));
        let service = TransactionService::new(adapter.client());

        for amount in [0, -500] {
            let response = service.dynamic_qr_code(amount).await;
            assert_eq!(response.status_code(), 400);
            assert!(response.message().contains("'amount'"));
        }
        assert!(adapter.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_qr_code_requests() {
        let adapter = RecordingAdapter::replying(json!({"statusCode": 200, "data": {"url": "https://qr"}}));
        let service = TransactionService::new(adapter.client());

        service.static_qr_code(10_000).await;
        service.dynamic_qr_code(25_000).await;

        let recorded = adapter.recorded();
        assert_eq!(recorded[0].0, HttpMethod::Get);
        assert_eq!(recorded[0].1, "hl/v1/qrcode/static");
        assert_eq!(recorded[1].0, HttpMethod::Post);
        assert_eq!(recorded[1].2, RequestPayload::Json(json!({"amount": 25_000})));
    }

    #[tokio::test]
    async fn test_balance_network_failure() {
        let adapter = RecordingAdapter::failing(TransportError::network("dns error"));
        let service = TransactionService::new(adapter.client());

        let response = service.balance().await;
        assert!(!response.is_success());
        assert_eq!(response.status_code(), 500);
        assert_eq!(response.message(), "dns error");
    }
}
