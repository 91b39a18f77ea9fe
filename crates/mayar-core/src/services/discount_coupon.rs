//! Discount coupons

use serde_json::Value;

use crate::http::{endpoint_path, RequestPayload};
use crate::response::ApiResponse;
use crate::services::ServiceClient;
use crate::validation::{validate_create_coupon, validate_path_segment};

const CREATE_PATH: &str = "hl/v1/coupon/create";
const COUPON_PATH: &str = "hl/v1/coupon";

#[derive(Debug, Clone)]
pub struct DiscountCouponService {
    client: ServiceClient,
}

impl DiscountCouponService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Create a coupon; the payload is sent as JSON
    ///
    /// Requires `name` and a `discount` object with `discountType`,
    /// `eligibleCustomerType`, `minimumPurchase`, `value` and `totalCoupons`.
    /// A non-empty `coupon` object must carry `type`.
    pub async fn create(&self, payload: &Value) -> ApiResponse {
        match validate_create_coupon(payload) {
            Ok(_) => self.client.post(CREATE_PATH, RequestPayload::json(payload.clone())).await,
            Err(err) => err.into(),
        }
    }

    pub async fn get(&self, coupon_id: &str) -> ApiResponse {
        if let Err(err) = validate_path_segment(coupon_id, "couponId") {
            return err.into();
        }
        let path = endpoint_path(COUPON_PATH, &[coupon_id]);
        self.client.get(&path, RequestPayload::Empty).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingAdapter;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_sends_json() {
        let adapter = RecordingAdapter::replying(json!({"statusCode": 200, "messages": "success"}));
        let service = DiscountCouponService::new(adapter.client());

        let payload = json!({
            "name": "LAUNCH",
            "discount": {
                "discountType": "monetary",
                "eligibleCustomerType": "all",
                "minimumPurchase": 0,
                "value": 5000,
                "totalCoupons": 10
            }
        });
        let response = service.create(&payload).await;

        assert!(response.is_success());
        let recorded = adapter.recorded();
        assert_eq!(recorded[0].1, "hl/v1/coupon/create");
        assert_eq!(recorded[0].2, RequestPayload::Json(payload));
    }

    #[tokio::test]
    async fn test_get_requires_id() {
        let adapter = RecordingAdapter::replying(json!({}));
        let service = DiscountCouponService::new(adapter.client());

        let response = service.get("").await;
        assert_eq!(response.message(), "Field 'couponId' is required and must be a string.");
        assert!(adapter.recorded().is_empty());

        service.get("cp_1").await;
        assert_eq!(adapter.recorded()[0].1, "hl/v1/coupon/cp_1");

        service.get("cp/1?all=true").await;
        assert_eq!(adapter.recorded()[1].1, "hl/v1/coupon/cp%2F1%3Fall%3Dtrue");
    }
}
