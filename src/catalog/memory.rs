//! In-memory item repository
//!
//! Used by `catalog serve --memory` and by tests. A single write lock covers
//! each mutating call, which gives the same all-or-nothing behavior as a
//! storage transaction.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::errors::{CatalogError, CatalogResult};
use super::item::{Item, ItemPatch, NewItem};
use super::repository::ItemRepository;

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Item>,
}

impl Table {
    fn id_for_name(&self, name: &str) -> Option<i64> {
        self.rows
            .values()
            .find(|item| item.name == name)
            .map(|item| item.id)
    }
}

/// Item repository backed by a lock-guarded ordered map
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    table: RwLock<Table>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> CatalogError {
        CatalogError::Storage("item table lock poisoned".to_string())
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list(&self) -> CatalogResult<Vec<Item>> {
        let table = self.table.read().map_err(|_| Self::poisoned())?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> CatalogResult<Item> {
        let table = self.table.read().map_err(|_| Self::poisoned())?;
        table.rows.get(&id).cloned().ok_or(CatalogError::NotFound(id))
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Item>> {
        let table = self.table.read().map_err(|_| Self::poisoned())?;
        Ok(table
            .id_for_name(name)
            .and_then(|id| table.rows.get(&id).cloned()))
    }

    async fn create(&self, item: &NewItem) -> CatalogResult<Item> {
        let mut table = self.table.write().map_err(|_| Self::poisoned())?;
        if table.id_for_name(&item.name).is_some() {
            return Err(CatalogError::Conflict(item.name.clone()));
        }

        table.next_id += 1;
        let stored = Item {
            id: table.next_id,
            name: item.name.clone(),
            description: item.description.clone(),
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i64, patch: &ItemPatch) -> CatalogResult<Item> {
        let mut table = self.table.write().map_err(|_| Self::poisoned())?;
        let current = table.rows.get(&id).ok_or(CatalogError::NotFound(id))?;
        let updated = patch.apply_to(current);

        if let Some(holder) = table.id_for_name(&updated.name) {
            if holder != id {
                return Err(CatalogError::Conflict(updated.name));
            }
        }

        table.rows.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> CatalogResult<()> {
        let mut table = self.table.write().map_err(|_| Self::poisoned())?;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(CatalogError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewItem {
        NewItem::new("Widget", Some("A widget".to_string()))
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryItemRepository::new();
        let a = repo.create(&widget()).await.unwrap();
        let b = repo.create(&NewItem::new("Gadget", None)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.get(1).await.unwrap(), a);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts_and_leaves_table_unchanged() {
        let repo = InMemoryItemRepository::new();
        repo.create(&widget()).await.unwrap();

        let err = repo
            .create(&NewItem::new("Widget", Some("dup".to_string())))
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::Conflict("Widget".to_string()));

        let items = repo.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description.as_deref(), Some("A widget"));
    }

    #[tokio::test]
    async fn test_update_rename_conflict() {
        let repo = InMemoryItemRepository::new();
        repo.create(&widget()).await.unwrap();
        let gadget = repo.create(&NewItem::new("Gadget", None)).await.unwrap();

        let patch = ItemPatch {
            name: Some("Widget".to_string()),
            description: None,
        };
        let err = repo.update(gadget.id, &patch).await.unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
        assert_eq!(repo.get(gadget.id).await.unwrap().name, "Gadget");
    }

    #[tokio::test]
    async fn test_update_to_own_name_is_allowed() {
        let repo = InMemoryItemRepository::new();
        let item = repo.create(&widget()).await.unwrap();

        let patch = ItemPatch {
            name: Some("Widget".to_string()),
            description: Some(None),
        };
        let updated = repo.update(item.id, &patch).await.unwrap();
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let repo = InMemoryItemRepository::new();
        assert_eq!(repo.get(9).await.unwrap_err(), CatalogError::NotFound(9));
        assert_eq!(
            repo.update(9, &ItemPatch::default()).await.unwrap_err(),
            CatalogError::NotFound(9)
        );
        assert_eq!(repo.delete(9).await.unwrap_err(), CatalogError::NotFound(9));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let repo = InMemoryItemRepository::new();
        let item = repo.create(&widget()).await.unwrap();
        repo.delete(item.id).await.unwrap();
        assert_eq!(
            repo.get(item.id).await.unwrap_err(),
            CatalogError::NotFound(item.id)
        );
        assert!(repo.find_by_name("Widget").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryItemRepository::new();
        let first = repo.create(&widget()).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.create(&widget()).await.unwrap();
        assert!(second.id > first.id);
    }
}
