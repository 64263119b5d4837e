//! # Catalog Errors
//!
//! Error types for catalog operations.

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No item with the requested id
    #[error("Item not found: {0}")]
    NotFound(i64),

    /// Another item already holds this name
    #[error("Item with name '{0}' already exists")]
    Conflict(String),

    /// Field constraint violated
    #[error("{0}")]
    Validation(String),

    /// Storage unavailable or query failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    /// True for errors caused by the request rather than the service
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CatalogError::Storage(_))
    }

    /// Map a database error, turning unique-constraint violations on `name`
    /// into `Conflict`.
    pub fn from_sqlx(err: sqlx::Error, name: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                CatalogError::Conflict(name.to_string())
            }
            _ => CatalogError::from(err),
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}
