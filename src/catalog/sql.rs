//! SQL item repository
//!
//! Runs against an `sqlx` `AnyPool`, so the same statements serve MySQL in
//! production and SQLite locally. Both dialects take positional `?`
//! placeholders. Every write runs in its own transaction; the unique index on
//! `name` stays the final arbiter when two requests race.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::any::{install_default_drivers, AnyPoolOptions, AnyRow};
use sqlx::{AnyConnection, AnyPool, FromRow, Row, TypeInfo, ValueRef};

use crate::config::{DatabaseBackend, DatabaseConfig};

use super::errors::{CatalogError, CatalogResult};
use super::item::{Item, ItemPatch, NewItem};
use super::repository::ItemRepository;
use super::schema;

const SELECT_ALL: &str = "SELECT id, name, description FROM item ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, name, description FROM item WHERE id = ?";
const SELECT_BY_NAME: &str = "SELECT id, name, description FROM item WHERE name = ?";
const INSERT: &str = "INSERT INTO item (name, description) VALUES (?, ?)";
const UPDATE: &str = "UPDATE item SET name = ?, description = ? WHERE id = ?";
const DELETE: &str = "DELETE FROM item WHERE id = ?";

/// Item repository backed by a relational connection pool
#[derive(Debug, Clone)]
pub struct SqlItemRepository {
    pool: AnyPool,
    backend: DatabaseBackend,
}

impl SqlItemRepository {
    /// Open a pool for the configured database.
    ///
    /// In-memory SQLite is pinned to one long-lived connection, since every
    /// new connection would see an empty private database.
    pub async fn connect(config: &DatabaseConfig) -> CatalogResult<Self> {
        install_default_drivers();

        let mut options = AnyPoolOptions::new().max_connections(config.max_connections);
        if config.is_sqlite_memory() {
            options = options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = options.connect(&config.url).await?;
        Ok(Self::from_pool(pool, config.backend))
    }

    pub fn from_pool(pool: AnyPool, backend: DatabaseBackend) -> Self {
        Self { pool, backend }
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    /// Create the `item` table if missing
    pub async fn ensure_schema(&self) -> CatalogResult<()> {
        schema::ensure_schema(&self.pool, self.backend).await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// The Any driver never reports a value as null, so `Option<T>` cannot decode
// a NULL column. The value's type info is still named `NULL`.
impl<'r> FromRow<'r, AnyRow> for Item {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        let null = row.try_get_raw("description")?.type_info().name() == "NULL";
        let description = if null {
            None
        } else {
            Some(row.try_get("description")?)
        };

        Ok(Item {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description,
        })
    }
}

async fn fetch_by_id(conn: &mut AnyConnection, id: i64) -> Result<Option<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(SELECT_BY_ID)
        .bind(id)
        .fetch_optional(conn)
        .await
}

async fn fetch_by_name(conn: &mut AnyConnection, name: &str) -> Result<Option<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(SELECT_BY_NAME)
        .bind(name.to_string())
        .fetch_optional(conn)
        .await
}

#[async_trait]
impl ItemRepository for SqlItemRepository {
    async fn list(&self) -> CatalogResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn get(&self, id: i64) -> CatalogResult<Item> {
        let mut conn = self.pool.acquire().await?;
        fetch_by_id(&mut conn, id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Item>> {
        let mut conn = self.pool.acquire().await?;
        Ok(fetch_by_name(&mut conn, name).await?)
    }

    async fn create(&self, item: &NewItem) -> CatalogResult<Item> {
        let mut tx = self.pool.begin().await?;

        if fetch_by_name(&mut tx, &item.name).await?.is_some() {
            return Err(CatalogError::Conflict(item.name.clone()));
        }

        sqlx::query(INSERT)
            .bind(item.name.clone())
            .bind(item.description.clone())
            .execute(&mut *tx)
            .await
            .map_err(|e| CatalogError::from_sqlx(e, &item.name))?;

        let stored = fetch_by_name(&mut tx, &item.name)
            .await?
            .ok_or_else(|| CatalogError::Storage("inserted item not readable".to_string()))?;

        tx.commit().await?;
        Ok(stored)
    }

    async fn update(&self, id: i64, patch: &ItemPatch) -> CatalogResult<Item> {
        let mut tx = self.pool.begin().await?;

        let current = fetch_by_id(&mut tx, id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;
        if patch.is_empty() {
            tx.commit().await?;
            return Ok(current);
        }

        let updated = patch.apply_to(&current);
        if updated.name != current.name {
            if let Some(holder) = fetch_by_name(&mut tx, &updated.name).await? {
                if holder.id != id {
                    return Err(CatalogError::Conflict(updated.name));
                }
            }
        }

        sqlx::query(UPDATE)
            .bind(updated.name.clone())
            .bind(updated.description.clone())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| CatalogError::from_sqlx(e, &updated.name))?;

        let stored = fetch_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| CatalogError::Storage("updated item not readable".to_string()))?;

        tx.commit().await?;
        Ok(stored)
    }

    async fn delete(&self, id: i64) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(DELETE).bind(id).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(id));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqlItemRepository {
        let repo = SqlItemRepository::connect(&DatabaseConfig::sqlite_memory())
            .await
            .unwrap();
        repo.ensure_schema().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = repo().await;
        let created = repo
            .create(&NewItem::new("Widget", Some("A widget".to_string())))
            .await
            .unwrap();

        assert_eq!(created.name, "Widget");
        assert_eq!(repo.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let repo = repo().await;
        repo.create(&NewItem::new("Widget", Some("A widget".to_string())))
            .await
            .unwrap();

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
    async fn test_unique_index_maps_to_conflict() {
        let repo = repo().await;
        repo.create(&NewItem::new("Widget", None)).await.unwrap();

        let err = sqlx::query(INSERT)
            .bind("Widget".to_string())
            .bind(None::<String>)
            .execute(&repo.pool)
            .await
            .unwrap_err();
        assert_eq!(
            CatalogError::from_sqlx(err, "Widget"),
            CatalogError::Conflict("Widget".to_string())
        );
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let repo = repo().await;
        for name in ["b", "a", "c"] {
            repo.create(&NewItem::new(name, None)).await.unwrap();
        }
        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let repo = repo().await;
        let item = repo
            .create(&NewItem::new("Widget", Some("A widget".to_string())))
            .await
            .unwrap();

        let patch = ItemPatch {
            name: None,
            description: Some(Some("Shiny".to_string())),
        };
        let updated = repo.update(item.id, &patch).await.unwrap();
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.description.as_deref(), Some("Shiny"));
        assert_eq!(repo.get(item.id).await.unwrap(), updated);

        let cleared = ItemPatch {
            name: None,
            description: Some(None),
        };
        assert_eq!(repo.update(item.id, &cleared).await.unwrap().description, None);
        assert_eq!(repo.get(item.id).await.unwrap().description, None);
        assert_eq!(repo.list().await.unwrap()[0].description, None);
    }

    #[tokio::test]
    async fn test_null_description_reads_back() {
        let repo = repo().await;
        let bare = repo.create(&NewItem::new("Bare", None)).await.unwrap();
        assert_eq!(bare.description, None);

        repo.create(&NewItem::new("Described", Some("text".to_string())))
            .await
            .unwrap();

        assert_eq!(repo.get(bare.id).await.unwrap(), bare);
        assert_eq!(repo.find_by_name("Bare").await.unwrap(), Some(bare));

        let items = repo.list().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, None);
        assert_eq!(items[1].description.as_deref(), Some("text"));
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_conflicts() {
        let repo = repo().await;
        repo.create(&NewItem::new("Widget", None)).await.unwrap();
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
    async fn test_missing_ids() {
        let repo = repo().await;
        assert_eq!(repo.get(42).await.unwrap_err(), CatalogError::NotFound(42));
        assert_eq!(
            repo.update(42, &ItemPatch::default()).await.unwrap_err(),
            CatalogError::NotFound(42)
        );
        assert_eq!(repo.delete(42).await.unwrap_err(), CatalogError::NotFound(42));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let item = repo.create(&NewItem::new("Widget", None)).await.unwrap();
        repo.delete(item.id).await.unwrap();
        assert_eq!(
            repo.get(item.id).await.unwrap_err(),
            CatalogError::NotFound(item.id)
        );
        assert!(repo.list().await.unwrap().is_empty());
    }
}
