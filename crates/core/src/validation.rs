//! Request validation that runs before anything is written.
//!
//! Enumerated fields are handled by [`crate::catalog::parse_closed`]; this
//! module covers the structural checks.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};

use crate::error::CoreError;

/// Naive ISO 8601 layouts accepted in addition to RFC 3339.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Validate that a password and its confirmation are identical.
pub fn validate_password_confirmation(password: &str, confirm: &str) -> Result<(), CoreError> {
    if password != confirm {
        return Err(CoreError::Validation("Passwords do not match".to_string()));
    }
    Ok(())
}

/// Validate that a required text field is not blank.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate a `counts` map: every category count must be non-negative.
pub fn validate_counts(counts: &BTreeMap<String, i64>) -> Result<(), CoreError> {
    if let Some((label, value)) = counts.iter().find(|(_, value)| **value < 0) {
        return Err(CoreError::Unprocessable(format!(
            "Invalid count for '{label}': {value}. Counts must be non-negative integers"
        )));
    }
    Ok(())
}

/// Validate a caller-supplied session timestamp.
///
/// Accepts RFC 3339 (`2025-11-20T23:00:00Z`, with offset) and naive ISO 8601
/// date-times (`2025-11-20T23:00:00`, optional fractional seconds). The text
/// itself is stored untouched.
pub fn validate_timestamp(value: &str) -> Result<(), CoreError> {
    if DateTime::parse_from_rfc3339(value).is_ok() {
        return Ok(());
    }
    if NAIVE_TIMESTAMP_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
    {
        return Ok(());
    }
    Err(CoreError::Unprocessable(format!(
        "Invalid timestamp '{value}'. Expected an ISO 8601 date-time"
    )))
}

/// Collect the messages of a `validator` derive failure into one
/// [`CoreError::Validation`].
pub fn from_validation_errors(errors: validator::ValidationErrors) -> CoreError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    CoreError::Validation(format!("Missing or empty required field(s): {}", fields.join(", ")))
}
