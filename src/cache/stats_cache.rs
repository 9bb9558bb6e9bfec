//! Stats Cache Module
//!
//! Memoizes the statistics aggregate and revalidates it against the item
//! store's staleness signal on every request.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{compute, CacheCounters, CacheEntry, CacheMetrics, StatisticsAggregate};
use crate::storage::{ItemStore, StalenessSignal, StorageError};

// == Stats Cache ==
/// Statistics aggregate memoized against the store's staleness signal.
///
/// The store is trusted to move its signal forward whenever the collection
/// changes. Concurrent misses may each recompute; the last write wins.
pub struct StatsCache {
    /// Storage collaborator and staleness oracle
    store: Arc<dyn ItemStore>,
    /// Current entry; the lock is never held across a storage call
    entry: RwLock<Option<CacheEntry>>,
    /// Hit, miss and invalidation counters
    counters: CacheCounters,
}

impl StatsCache {
    // == Constructor ==
    /// Creates an empty cache in front of `store`.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            entry: RwLock::new(None),
            counters: CacheCounters::new(),
        }
    }

    // == Get ==
    /// Returns the aggregate for the current collection.
    ///
    /// A failed signal query or read is propagated unchanged and leaves any
    /// previously cached entry in place.
    pub async fn get(&self) -> Result<StatisticsAggregate, StorageError> {
        let current = self.store.staleness_signal().await.map_err(|e| {
            warn!("Staleness signal unavailable: {}", e);
            e
        })?;

        if let Some(value) = self.lookup(current).await {
            self.counters.record_hit();
            debug!("Stats cache hit");
            return Ok(value);
        }

        self.counters.record_miss();
        let items = self.store.read_all().await.map_err(|e| {
            warn!("Stats recomputation failed, keeping previous entry: {}", e);
            e
        })?;
        let value = compute(&items);

        *self.entry.write().await = Some(CacheEntry::new(value.clone(), current));
        info!(total = value.total, "Stats cache recomputed");

        Ok(value)
    }

    // == Invalidate ==
    /// Drops the cached entry so the next `get` recomputes.
    ///
    /// A `get` already past its signal query may still store its result.
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
        self.counters.record_invalidation();
        info!("Stats cache invalidated");
    }

    // == Peek ==
    /// Current entry, without consulting the store.
    pub async fn peek(&self) -> Option<CacheEntry> {
        self.entry.read().await.clone()
    }

    // == Metrics ==
    pub fn metrics(&self) -> CacheMetrics {
        self.counters.snapshot()
    }

    async fn lookup(&self, current: StalenessSignal) -> Option<StatisticsAggregate> {
        self.entry
            .read()
            .await
            .as_ref()
            .filter(|entry| entry.is_valid_for(current))
            .map(|entry| entry.value.clone())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use crate::storage::MemoryStore;
    use std::time::{Duration, UNIX_EPOCH};

    fn sample() -> Vec<Item> {
        vec![
            Item {
                id: 1,
                name: "Laptop Pro".to_string(),
                category: "Electronics".to_string(),
                price: 2499.0,
            },
            Item {
                id: 2,
                name: "Noise Cancelling Headphones".to_string(),
                category: "Electronics".to_string(),
                price: 399.0,
            },
            Item {
                id: 3,
                name: "Ergonomic Chair".to_string(),
                category: "Furniture".to_string(),
                price: 799.0,
            },
        ]
    }

    fn setup() -> (Arc<MemoryStore>, StatsCache) {
        let store = Arc::new(MemoryStore::new().with_items(sample()).with_signal_secs(100));
        let cache = StatsCache::new(store.clone());
        (store, cache)
    }

    #[tokio::test]
    async fn test_first_get_computes() {
        let (store, cache) = setup();

        let stats = cache.get().await.unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.average_price, 1232.33);
        assert_eq!(store.read_count(), 1);
    }

    #[tokio::test]
    async fn test_repeated_get_hits() {
        let (store, cache) = setup();

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();
        let third = cache.get().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(store.read_count(), 1);
        assert_eq!(cache.metrics().hits, 2);
        assert_eq!(cache.metrics().misses, 1);
    }

    #[tokio::test]
    async fn test_later_signal_recomputes() {
        let (store, cache) = setup();
        cache.get().await.unwrap();

        store.replace_items(sample()[..1].to_vec());
        store.set_signal_secs(101);
        let stats = cache.get().await.unwrap();

        assert_eq!(stats.total, 1);
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn test_earlier_signal_keeps_entry() {
        let (store, cache) = setup();
        cache.get().await.unwrap();

        store.replace_items(Vec::new());
        store.set_signal_secs(50);
        let stats = cache.get().await.unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(store.read_count(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_recompute() {
        let (store, cache) = setup();
        cache.get().await.unwrap();

        cache.invalidate().await;
        assert!(cache.peek().await.is_none());

        cache.get().await.unwrap();
        assert_eq!(store.read_count(), 2);
        assert_eq!(cache.metrics().invalidations, 1);
    }

    #[tokio::test]
    async fn test_invalidate_is_idempotent() {
        let (_store, cache) = setup();
        cache.invalidate().await;
        cache.invalidate().await;
        assert!(cache.peek().await.is_none());
    }

    #[tokio::test]
    async fn test_signal_failure_propagates_without_mutation() {
        let (store, cache) = setup();
        let before = cache.get().await.unwrap();

        store.fail_signal("Stat failed");
        let err = cache.get().await.unwrap_err();

        assert_eq!(err.to_string(), "Stat failed");
        assert_eq!(store.read_count(), 1);
        assert_eq!(cache.peek().await.map(|e| e.value), Some(before));
    }

    #[tokio::test]
    async fn test_signal_failure_on_empty_cache() {
        let (store, cache) = setup();
        store.fail_signal("Stat failed");

        assert!(cache.get().await.is_err());
        assert_eq!(store.read_count(), 0);
        assert!(cache.peek().await.is_none());
    }

    #[tokio::test]
    async fn test_read_failure_preserves_previous_entry() {
        let (store, cache) = setup();
        let before = cache.get().await.unwrap();

        store.set_signal_secs(200);
        store.fail_reads("File not found");
        let err = cache.get().await.unwrap_err();
        assert_eq!(err, StorageError::Read("File not found".to_string()));

        let entry = cache.peek().await.unwrap();
        assert_eq!(entry.value, before);
        assert_eq!(entry.computed_at, UNIX_EPOCH + Duration::from_secs(100));

        // Signal is still ahead of the entry, so recovery recomputes.
        store.recover();
        cache.get().await.unwrap();
        assert_eq!(store.read_count(), 3);
        assert_eq!(
            cache.peek().await.unwrap().computed_at,
            UNIX_EPOCH + Duration::from_secs(200)
        );
    }

    #[tokio::test]
    async fn test_read_failure_then_signal_rollback_reuses_entry() {
        let (store, cache) = setup();
        let before = cache.get().await.unwrap();

        store.set_signal_secs(200);
        store.fail_reads("File not found");
        assert!(cache.get().await.is_err());

        store.recover();
        store.set_signal_secs(100);
        assert_eq!(cache.get().await.unwrap(), before);
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn test_read_failure_on_empty_cache() {
        let (store, cache) = setup();
        store.fail_reads("File not found");

        assert!(cache.get().await.is_err());
        assert!(cache.peek().await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_gets_agree() {
        let (store, cache) = setup();
        let cache = Arc::new(cache);

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..16 {
            let cache = cache.clone();
            tasks.spawn(async move { cache.get().await });
        }

        let expected = compute(&sample());
        while let Some(result) = tasks.join_next().await {
            assert_eq!(result.unwrap().unwrap(), expected);
        }

        let reads = store.read_count();
        assert!((1..=16).contains(&reads));
        assert_eq!(cache.peek().await.unwrap().value, expected);
    }
}
