//! Startup seeding
//!
//! Ensures the placeholder items `Item 1`..`Item 10` exist. Names already
//! present are skipped, so running the seed any number of times leaves
//! exactly one copy of each.

use crate::observability::Logger;

use super::errors::{CatalogError, CatalogResult};
use super::item::NewItem;
use super::repository::ItemRepository;

/// Number of placeholder items
pub const SEED_COUNT: usize = 10;

/// The baseline dataset, in insertion order
pub fn placeholder_items() -> Vec<NewItem> {
    (1..=SEED_COUNT)
        .map(|i| {
            NewItem::new(
                format!("Item {}", i),
                Some(format!("Description for Item {}", i)),
            )
        })
        .collect()
}

/// Insert any missing placeholder items, returning how many were inserted
pub async fn seed_placeholder_items(repo: &dyn ItemRepository) -> CatalogResult<usize> {
    let mut inserted = 0;

    for item in placeholder_items() {
        if repo.find_by_name(&item.name).await?.is_some() {
            continue;
        }
        match repo.create(&item).await {
            Ok(_) => inserted += 1,
            // Another process seeded the same name between lookup and insert
            Err(CatalogError::Conflict(_)) => {}
            Err(e) => return Err(e),
        }
    }

    let inserted_str = inserted.to_string();
    Logger::info("SEED_COMPLETE", &[("inserted", inserted_str.as_str())]);

    Ok(inserted)
}
