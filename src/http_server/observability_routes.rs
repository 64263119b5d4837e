//! Observability HTTP Routes
//!
//! Health check and operation counters.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::catalog::CatalogService;
use crate::observability::MetricsSnapshot;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create `/health` and `/metrics` routes
pub fn observability_routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(service)
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Metrics handler - returns counters as JSON
async fn metrics_handler(State(service): State<Arc<CatalogService>>) -> Json<MetricsSnapshot> {
    Json(service.metrics().snapshot())
}
