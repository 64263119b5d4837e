//! # Item Repository
//!
//! Storage seam for the catalog. Handlers never see `sqlx` types; they hold
//! an `Arc<dyn ItemRepository>` injected at startup.

use async_trait::async_trait;

use super::errors::CatalogResult;
use super::item::{Item, ItemPatch, NewItem};

/// Persistence operations over the `item` table
///
/// Every method is one read-modify-respond cycle. Implementations run each
/// call in a single storage transaction and take no cross-call locks.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, ascending by id
    async fn list(&self) -> CatalogResult<Vec<Item>>;

    /// Item by id, or `CatalogError::NotFound`
    async fn get(&self, id: i64) -> CatalogResult<Item>;

    /// Item by exact name, `None` if absent
    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Item>>;

    /// Insert and return the stored row with its assigned id.
    ///
    /// Returns `CatalogError::Conflict` if the name is taken; storage is left
    /// unchanged in that case.
    async fn create(&self, item: &NewItem) -> CatalogResult<Item>;

    /// Apply a partial update.
    ///
    /// Returns `CatalogError::NotFound` if the id is absent and
    /// `CatalogError::Conflict` if the new name belongs to another item.
    async fn update(&self, id: i64, patch: &ItemPatch) -> CatalogResult<Item>;

    /// Remove an item, `CatalogError::NotFound` if absent
    async fn delete(&self, id: i64) -> CatalogResult<()>;
}
