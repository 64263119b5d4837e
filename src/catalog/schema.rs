//! `item` table definition
//!
//! Only creation is handled; there are no migrations.

use sqlx::AnyPool;

use crate::config::DatabaseBackend;

use super::errors::CatalogResult;

/// `CREATE TABLE IF NOT EXISTS` statement for the given dialect
pub fn create_table_sql(backend: DatabaseBackend) -> &'static str {
    match backend {
        DatabaseBackend::MySql => {
            "CREATE TABLE IF NOT EXISTS item (\
                id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY, \
                name VARCHAR(80) NOT NULL UNIQUE, \
                description VARCHAR(200) NULL\
            )"
        }
        DatabaseBackend::Sqlite => {
            "CREATE TABLE IF NOT EXISTS item (\
                id INTEGER PRIMARY KEY AUTOINCREMENT, \
                name VARCHAR(80) NOT NULL UNIQUE, \
                description VARCHAR(200)\
            )"
        }
    }
}

/// Create the `item` table if it does not exist yet
pub async fn ensure_schema(pool: &AnyPool, backend: DatabaseBackend) -> CatalogResult<()> {
    sqlx::query(create_table_sql(backend)).execute(pool).await?;
    Ok(())
}
