//! SOAP and gRPC placeholders
//!
//! Both paths exist so callers get an explicit 501 rather than a 404. No
//! client is constructed and nothing is forwarded.

use axum::{routing::any, Router};

use super::errors::ApiError;

pub fn legacy_routes() -> Router {
    Router::new()
        .route("/soap/items", any(soap_handler))
        .route("/grpc/items", any(grpc_handler))
}

async fn soap_handler() -> ApiError {
    ApiError::NotImplemented("SOAP")
}

async fn grpc_handler() -> ApiError {
    ApiError::NotImplemented("gRPC")
}
