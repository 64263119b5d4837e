//! Catalog operation counters
//!
//! Counters only, monotonic, reset on process start.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for every catalog operation outcome
///
/// Relaxed ordering throughout; readers only need eventually-exact totals.
#[derive(Debug, Default)]
pub struct CatalogMetrics {
    lists: AtomicU64,
    reads: AtomicU64,
    created: AtomicU64,
    updated: AtomicU64,
    deleted: AtomicU64,
    not_found: AtomicU64,
    conflicts: AtomicU64,
    validation_failures: AtomicU64,
    storage_errors: AtomicU64,
}

/// Which counter to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    List,
    Read,
    Created,
    Updated,
    Deleted,
    NotFound,
    Conflict,
    ValidationFailure,
    StorageError,
}

impl CatalogMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, counter: Counter) -> &AtomicU64 {
        match counter {
            Counter::List => &self.lists,
            Counter::Read => &self.reads,
            Counter::Created => &self.created,
            Counter::Updated => &self.updated,
            Counter::Deleted => &self.deleted,
            Counter::NotFound => &self.not_found,
            Counter::Conflict => &self.conflicts,
            Counter::ValidationFailure => &self.validation_failures,
            Counter::StorageError => &self.storage_errors,
        }
    }

    pub fn increment(&self, counter: Counter) {
        self.counter(counter).fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, counter: Counter) -> u64 {
        self.counter(counter).load(Ordering::Relaxed)
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lists: self.get(Counter::List),
            reads: self.get(Counter::Read),
            created: self.get(Counter::Created),
            updated: self.get(Counter::Updated),
            deleted: self.get(Counter::Deleted),
            not_found: self.get(Counter::NotFound),
            conflicts: self.get(Counter::Conflict),
            validation_failures: self.get(Counter::ValidationFailure),
            storage_errors: self.get(Counter::StorageError),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub lists: u64,
    pub reads: u64,
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
    pub not_found: u64,
    pub conflicts: u64,
    pub validation_failures: u64,
    pub storage_errors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let snapshot = CatalogMetrics::new().snapshot();
        assert_eq!(snapshot.created, 0);
        assert_eq!(snapshot.storage_errors, 0);
    }

    #[test]
    fn test_increment_is_per_counter() {
        let metrics = CatalogMetrics::new();
        metrics.increment(Counter::Created);
        metrics.increment(Counter::Created);
        metrics.increment(Counter::Conflict);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.created, 2);
        assert_eq!(snapshot.conflicts, 1);
        assert_eq!(snapshot.deleted, 0);
    }

    #[test]
    fn test_snapshot_json() {
        let metrics = CatalogMetrics::new();
        metrics.increment(Counter::NotFound);

        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["not_found"], 1);
        assert_eq!(json["lists"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let metrics = Arc::new(CatalogMetrics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.increment(Counter::Read);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(metrics.get(Counter::Read), 800);
    }
}
