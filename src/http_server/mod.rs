//! # Catalog HTTP Server Module
//!
//! Axum server exposing the item catalog as JSON over HTTP.
//!
//! # Endpoints
//!
//! - `/items`, `/items/:id` - CRUD
//! - `/health` - Health check
//! - `/metrics` - Operation counters
//! - `/soap/items`, `/grpc/items` - 501 placeholders

pub mod config;
pub mod errors;
pub mod item_routes;
pub mod legacy_routes;
pub mod observability_routes;
pub mod request_log;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
