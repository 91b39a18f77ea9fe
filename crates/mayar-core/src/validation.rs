//! Pre-flight validation of request payloads
//!
//! Validators run before any network call and either return silently or
//! fail synchronously with a [`ValidationError`]. They perform no I/O.
//! The type check always precedes field-presence checks, and only the first
//! missing field (in the order the caller listed them) is reported.
//!
//! Copyright (c) 2025 Mayar Client Team
//! Licensed under the Apache-2.0 license

pub mod rules;

use serde_json::{Map, Value};
use thiserror::Error;

pub use rules::{validate_create_coupon, validate_create_installment};

/// Status code attached to every validation failure
pub const VALIDATION_ERROR_CODE: u16 = 400;

/// Validation failures raised before a request is dispatched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Payload expected to be a key-value mapping was something else
    #[error("Content type must be a key-value mapping")]
    InvalidContentType,

    /// A required top-level, nested or scalar field was absent or empty
    #[error("{message}")]
    MissingArguments {
        /// Name of the first missing field (`parent.child` when nested)
        field: String,
        message: String,
    },
}

impl ValidationError {
    /// Numeric code carried by the error
    pub fn code(&self) -> u16 {
        VALIDATION_ERROR_CODE
    }

    /// Field named by a `MissingArguments` error
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidContentType => None,
            ValidationError::MissingArguments { field, .. } => Some(field),
        }
    }

    fn missing(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::MissingArguments {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result alias for validator functions
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Fail unless `payload` is a JSON object; returns the object on success
pub fn validate_array(payload: &Value) -> ValidationResult<&Map<String, Value>> {
    payload.as_object().ok_or(ValidationError::InvalidContentType)
}

/// First entry of `fields` that has no key in `payload`
fn first_missing<'f>(payload: &Map<String, Value>, fields: &[&'f str]) -> Option<&'f str> {
    fields.iter().copied().find(|field| !payload.contains_key(*field))
}

/// Fail naming the first of `fields` that `payload` does not contain
pub fn validate_required_fields(payload: &Map<String, Value>, fields: &[&str]) -> ValidationResult<()> {
    match first_missing(payload, fields) {
        Some(field) => Err(ValidationError::missing(field, format!("Field {} is missing", field))),
        None => Ok(()),
    }
}

/// Fail unless `payload[field_name]` is an object holding every nested field
pub fn validate_nested_fields(
    payload: &Map<String, Value>,
    field_name: &str,
    nested_fields: &[&str],
) -> ValidationResult<()> {
    let nested = payload
        .get(field_name)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ValidationError::missing(field_name, format!("Field '{}' is missing or invalid", field_name))
        })?;

    match first_missing(nested, nested_fields) {
        Some(field) => {
            let path = format!("{}.{}", field_name, field);
            let message = format!("Field '{}' is missing", path);
            Err(ValidationError::missing(path, message))
        }
        None => Ok(()),
    }
}

/// Fail unless `value` is a non-empty string
pub fn validate_required(value: &Value, name: &str) -> ValidationResult<()> {
    match value.as_str() {
        Some(text) if !text.is_empty() => Ok(()),
        _ => Err(required_error(name)),
    }
}

/// [`validate_required`] for identifiers that are already typed as strings
pub fn validate_required_str(value: &str, name: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(required_error(name));
    }
    Ok(())
}

/// Fail unless `value` can stand alone as one URL path segment
///
/// Empty values and the dot segments `.` and `..` are rejected; any other
/// text is escaped when the path is built.
pub fn validate_path_segment(value: &str, name: &str) -> ValidationResult<()> {
    validate_required_str(value, name)?;
    if value == "." || value == ".." {
        return Err(ValidationError::missing(
            name,
            format!("Field '{}' must not be a relative path segment.", name),
        ));
    }
    Ok(())
}

fn required_error(name: &str) -> ValidationError {
    ValidationError::missing(name, format!("Field '{}' is required and must be a string.", name))
}

/// Fail unless an amount is strictly positive
pub fn validate_positive_amount(amount: i64, name: &str) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::missing(
            name,
            format!("Field '{}' is required and must be a positive integer.", name),
        ));
    }
    Ok(())
}

/// Standard endpoint precondition: type check, then required fields
pub fn validate_inquiry<'a>(payload: &'a Value, fields: &[&str]) -> ValidationResult<&'a Map<String, Value>> {
    let map = validate_array(payload)?;
    validate_required_fields(map, fields)?;
    Ok(map)
}
