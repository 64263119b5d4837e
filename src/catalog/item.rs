//! Item record types
//!
//! `Item` is the persisted row. `NewItem` and `ItemPatch` are the create and
//! partial-update payloads accepted over HTTP.

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::{CatalogError, CatalogResult};

/// Maximum name length in characters (`VARCHAR(80)`)
pub const MAX_NAME_LEN: usize = 80;

/// Maximum description length in characters (`VARCHAR(200)`)
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// A catalog item as stored in the `item` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Storage-assigned id, immutable once assigned
    pub id: i64,
    /// Unique across all items
    pub name: String,
    pub description: Option<String>,
}

/// Payload for creating an item
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Check field constraints before touching storage
    pub fn validate(&self) -> CatalogResult<()> {
        validate_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

/// Partial update payload
///
/// `None` leaves a field unchanged. For `description`, `Some(None)` clears
/// the stored value (sent as an explicit JSON `null`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub description: Option<Option<String>>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> CatalogResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(Some(description)) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }

    /// Produce the row that results from applying this patch to `item`
    pub fn apply_to(&self, item: &Item) -> Item {
        Item {
            id: item.id,
            name: self.name.clone().unwrap_or_else(|| item.name.clone()),
            description: match &self.description {
                Some(description) => description.clone(),
                None => item.description.clone(),
            },
        }
    }
}

// Distinguishes a missing key (outer None via #[serde(default)]) from `null`.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn validate_name(name: &str) -> CatalogResult<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation("Item name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CatalogError::Validation(format!(
            "Item name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> CatalogResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CatalogError::Validation(format!(
            "Item description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}
