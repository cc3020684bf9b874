//! Resource handlers: categories and products.

pub mod category;
pub mod product;

use crate::error::ApiError;
use serde_json::{Map, Value};

/// Request bodies are taken as raw JSON so the required-field check can
/// distinguish absent, null, and falsy values.
pub(crate) fn body_object(value: Value) -> Result<Map<String, Value>, ApiError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(ApiError::BadRequest("body must be a JSON object".into())),
    }
}

pub(crate) fn parse_id(id_str: &str) -> Result<i32, ApiError> {
    id_str
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid id".into()))
}
