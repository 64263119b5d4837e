//! # Catalog Service
//!
//! The five catalog operations. Each validates its input, makes exactly one
//! repository call and records the outcome in metrics and logs.

use std::sync::Arc;

use crate::observability::{CatalogMetrics, Counter, Logger};

use super::errors::{CatalogError, CatalogResult};
use super::item::{Item, ItemPatch, NewItem};
use super::repository::ItemRepository;

/// Catalog operations over an injected repository
pub struct CatalogService {
    repo: Arc<dyn ItemRepository>,
    metrics: CatalogMetrics,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self {
            repo,
            metrics: CatalogMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &CatalogMetrics {
        &self.metrics
    }

    pub async fn list(&self) -> CatalogResult<Vec<Item>> {
        let result = self.repo.list().await;
        self.record(result, Counter::List, "list")
    }

    pub async fn get(&self, id: i64) -> CatalogResult<Item> {
        let result = self.repo.get(id).await;
        self.record(result, Counter::Read, "get")
    }

    pub async fn create(&self, item: NewItem) -> CatalogResult<Item> {
        let result = match item.validate() {
            Ok(()) => self.repo.create(&item).await,
            Err(e) => Err(e),
        };
        let created = self.record(result, Counter::Created, "create")?;

        let id = created.id.to_string();
        Logger::info(
            "ITEM_CREATED",
            &[("id", id.as_str()), ("name", created.name.as_str())],
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, patch: ItemPatch) -> CatalogResult<Item> {
        let result = match patch.validate() {
            Ok(()) => self.repo.update(id, &patch).await,
            Err(e) => Err(e),
        };
        let updated = self.record(result, Counter::Updated, "update")?;

        let id = updated.id.to_string();
        Logger::info(
            "ITEM_UPDATED",
            &[("id", id.as_str()), ("name", updated.name.as_str())],
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> CatalogResult<()> {
        let result = self.repo.delete(id).await;
        self.record(result, Counter::Deleted, "delete")?;

        let id = id.to_string();
        Logger::info("ITEM_DELETED", &[("id", id.as_str())]);
        Ok(())
    }

    fn record<T>(
        &self,
        result: CatalogResult<T>,
        success: Counter,
        operation: &str,
    ) -> CatalogResult<T> {
        match &result {
            Ok(_) => self.metrics.increment(success),
            Err(CatalogError::NotFound(_)) => self.metrics.increment(Counter::NotFound),
            Err(CatalogError::Conflict(name)) => {
                self.metrics.increment(Counter::Conflict);
                Logger::warn(
                    "ITEM_CONFLICT",
                    &[("name", name.as_str()), ("operation", operation)],
                );
            }
            Err(CatalogError::Validation(reason)) => {
                self.metrics.increment(Counter::ValidationFailure);
                Logger::warn(
                    "ITEM_INVALID",
                    &[("operation", operation), ("reason", reason.as_str())],
                );
            }
            Err(CatalogError::Storage(detail)) => {
                self.metrics.increment(Counter::StorageError);
                Logger::error(
                    "STORAGE_ERROR",
                    &[("detail", detail.as_str()), ("operation", operation)],
                );
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryItemRepository;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryItemRepository::new()))
    }

    #[tokio::test]
    async fn test_create_get_roundtrip_counts() {
        let service = service();
        let created = service
            .create(NewItem::new("Widget", Some("A widget".to_string())))
            .await
            .unwrap();
        assert_eq!(service.get(created.id).await.unwrap(), created);

        let snapshot = service.metrics().snapshot();
        assert_eq!(snapshot.created, 1);
        assert_eq!(snapshot.reads, 1);
    }

    #[tokio::test]
    async fn test_validation_happens_before_storage() {
        let service = service();
        let err = service.create(NewItem::new("", None)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(service.list().await.unwrap().is_empty());
        assert_eq!(service.metrics().snapshot().validation_failures, 1);
    }

    #[tokio::test]
    async fn test_conflict_and_not_found_counted() {
        let service = service();
        service.create(NewItem::new("Widget", None)).await.unwrap();
        let _ = service.create(NewItem::new("Widget", None)).await;
        let _ = service.delete(99).await;
        let _ = service.update(99, ItemPatch::default()).await;

        let snapshot = service.metrics().snapshot();
        assert_eq!(snapshot.conflicts, 1);
        assert_eq!(snapshot.not_found, 2);
        assert_eq!(snapshot.deleted, 0);
    }

    #[tokio::test]
    async fn test_update_validates_patch() {
        let service = service();
        let item = service.create(NewItem::new("Widget", None)).await.unwrap();
        let patch = ItemPatch {
            name: Some(" ".to_string()),
            description: None,
        };
        assert!(matches!(
            service.update(item.id, patch).await,
            Err(CatalogError::Validation(_))
        ));
        assert_eq!(service.get(item.id).await.unwrap().name, "Widget");
    }
}
