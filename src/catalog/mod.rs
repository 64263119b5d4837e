//! # Item Catalog
//!
//! One entity (`Item`), one table, five operations.
//!
//! Request handlers hold a `CatalogService`, which owns an
//! `Arc<dyn ItemRepository>`. Two repositories exist:
//!
//! - `SqlItemRepository` - MySQL or SQLite through an sqlx `AnyPool`
//! - `InMemoryItemRepository` - ordered map behind a lock

pub mod errors;
pub mod item;
pub mod memory;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod service;
pub mod sql;

pub use errors::{CatalogError, CatalogResult};
pub use item::{Item, ItemPatch, NewItem};
pub use memory::InMemoryItemRepository;
pub use repository::ItemRepository;
pub use seed::{placeholder_items, seed_placeholder_items, SEED_COUNT};
pub use service::CatalogService;
pub use sql::SqlItemRepository;
