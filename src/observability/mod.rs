//! Observability for the catalog service
//!
//! - Structured logging (one JSON object per line)
//! - Operation counters, served at `/metrics`
//!
//! # Usage
//!
//! ```ignore
//! use catalog_service::observability::{Logger, CatalogMetrics, Counter};
//!
//! Logger::info("ITEM_CREATED", &[("id", "11")]);
//!
//! let metrics = CatalogMetrics::new();
//! metrics.increment(Counter::Created);
//! ```

mod logger;
mod metrics;

pub use logger::{Logger, Severity};
pub use metrics::{CatalogMetrics, Counter, MetricsSnapshot};
