//! Composite validation rules for endpoints with nested payloads
//!
//! Copyright (c) 2025 Mayar Client Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};

use super::{validate_array, validate_nested_fields, validate_required_fields, ValidationResult};

const COUPON_FIELDS: &[&str] = &["name", "discount"];
const COUPON_DISCOUNT_FIELDS: &[&str] = &[
    "discountType",
    "eligibleCustomerType",
    "minimumPurchase",
    "value",
    "totalCoupons",
];

const INSTALLMENT_FIELDS: &[&str] = &["email", "mobile", "name", "amount", "installment"];
const INSTALLMENT_DETAIL_FIELDS: &[&str] = &["description", "interest", "tenure", "dueDate"];

/// Validate a discount coupon payload
///
/// `coupon.type` is only required when a non-empty `coupon` value is sent.
pub fn validate_create_coupon(payload: &Value) -> ValidationResult<&Map<String, Value>> {
    let map = validate_array(payload)?;
    validate_required_fields(map, COUPON_FIELDS)?;
    validate_nested_fields(map, "discount", COUPON_DISCOUNT_FIELDS)?;

    if map.get("coupon").is_some_and(|coupon| !is_empty_value(coupon)) {
        validate_nested_fields(map, "coupon", &["type"])?;
    }
    Ok(map)
}

/// Validate an installment payload
pub fn validate_create_installment(payload: &Value) -> ValidationResult<&Map<String, Value>> {
    let map = validate_array(payload)?;
    validate_required_fields(map, INSTALLMENT_FIELDS)?;
    validate_nested_fields(map, "installment", INSTALLMENT_DETAIL_FIELDS)?;
    Ok(map)
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coupon() -> Value {
        json!({
            "name": "LAUNCH10",
            "discount": {
                "discountType": "percentage",
                "eligibleCustomerType": "all",
                "minimumPurchase": 0,
                "value": 10,
                "totalCoupons": 100
            }
        })
    }

    #[test]
    fn test_coupon_without_coupon_block() {
        assert!(validate_create_coupon(&coupon()).is_ok());
    }

    #[test]
    fn test_coupon_block_requires_type() {
        let mut payload = coupon();
        payload["coupon"] = json!({"code": "LAUNCH10"});
        let err = validate_create_coupon(&payload).unwrap_err();
        assert_eq!(err.field(), Some("coupon.type"));

        payload["coupon"] = json!({});
        assert!(validate_create_coupon(&payload).is_ok());
    }

    #[test]
    fn test_coupon_missing_discount_detail() {
        let mut payload = coupon();
        payload["discount"].as_object_mut().unwrap().remove("value");
        let err = validate_create_coupon(&payload).unwrap_err();
        assert_eq!(err.field(), Some("discount.value"));
    }

    #[test]
    fn test_installment_rule() {
        let payload = json!({
            "email": "a@b.co",
            "mobile": "0812",
            "name": "Ana",
            "amount": 300000,
            "installment": {"description": "3x", "interest": 0, "tenure": 3}
        });
        let err = validate_create_installment(&payload).unwrap_err();
        assert_eq!(err.field(), Some("installment.dueDate"));

        let err = validate_create_installment(&json!({"email": "a@b.co"})).unwrap_err();
        assert_eq!(err.field(), Some("mobile"));
    }
}
