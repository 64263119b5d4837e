//! Item HTTP Routes
//!
//! `/items` CRUD endpoints. Each handler is one catalog call and one JSON
//! response.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::catalog::{CatalogService, Item, ItemPatch, NewItem};

use super::errors::{ApiError, ApiResult};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create item routes
pub fn item_routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/items", get(list_items_handler).post(create_item_handler))
        .route(
            "/items/:id",
            get(get_item_handler)
                .put(update_item_handler)
                .delete(delete_item_handler),
        )
        .with_state(service)
}

// ==================
// Extraction Helpers
// ==================

// Non-integer ids cannot name an item.
fn item_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

// ==================
// Handlers
// ==================

async fn list_items_handler(
    State(service): State<Arc<CatalogService>>,
) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(service.list().await?))
}

async fn get_item_handler(
    State(service): State<Arc<CatalogService>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Item>> {
    let id = item_id(path)?;
    Ok(Json(service.get(id).await?))
}

async fn create_item_handler(
    State(service): State<Arc<CatalogService>>,
    body: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let new_item = json_body(body)?;
    let created = service.create(new_item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_item_handler(
    State(service): State<Arc<CatalogService>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ItemPatch>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let id = item_id(path)?;
    let patch = json_body(body)?;
    Ok(Json(service.update(id, patch).await?))
}

async fn delete_item_handler(
    State(service): State<Arc<CatalogService>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = item_id(path)?;
    service.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Item deleted".to_string(),
    }))
}
