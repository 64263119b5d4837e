//! # HTTP API Errors
//!
//! Maps catalog failures onto status codes and `{"error": ...}` bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP-facing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Unknown id, or an id segment that is not an integer
    #[error("Item not found")]
    NotFound,

    /// Unique-name violation
    #[error("Item with this name already exists")]
    Conflict,

    /// Field constraint violated
    #[error("{0}")]
    Validation(String),

    /// Body missing, not JSON, or wrong shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Protocol surface kept only as a placeholder
    #[error("{0} integration is not implemented")]
    NotImplemented(&'static str),

    /// Storage failure; detail is logged, never returned
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => ApiError::NotFound,
            CatalogError::Conflict(_) => ApiError::Conflict,
            CatalogError::Validation(reason) => ApiError::Validation(reason),
            CatalogError::Storage(_) => ApiError::Internal,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
