//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed required field, or a referenced category absent
    /// at write time.
    #[error("{0}")]
    Validation(String),
    /// Duplicate category name, or deletion blocked by referencing products.
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    /// Any store failure not otherwise classified. The raw driver message is
    /// what clients see in the `error` field.
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("Name is required".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Conflict("Category Tools already exists".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::NotFound("Product not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("invalid id".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Db(sqlx::Error::PoolClosed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn db_error_message_is_passed_through_raw() {
        let err = ApiError::Db(sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), sqlx::Error::PoolClosed.to_string());
    }
}
