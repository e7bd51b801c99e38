//! Tiered Cache Module
//!
//! Memory tier (L1) in front of a persistent store (L2), with lazy TTL
//! staleness. Reads return stale data flagged as such so callers can serve
//! it immediately and refetch in the background.
//!
//! The cache never fails its callers. Store faults are logged and the cache
//! degrades to memory-only behavior.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::memory::MemoryTier;
use crate::cache::stats::StatsRecorder;
use crate::cache::store::PersistentStore;
use crate::cache::{CacheEntry, CacheStats, Clock, StoredEntry, SystemClock, DEFAULT_TTL};

// == Options ==
/// Per-call cache options.
#[derive(Debug, Clone, Default)]
pub struct CacheOptions {
    /// Freshness window; `None` or zero uses the cache default
    pub ttl: Option<Duration>,
    /// Label attached to log lines for this call
    pub namespace: Option<String>,
    /// Bypass the memory tier for both reads and writes
    pub skip_memory: bool,
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn skipping_memory(mut self) -> Self {
        self.skip_memory = true;
        self
    }

    fn label(&self) -> &str {
        self.namespace.as_deref().unwrap_or("default")
    }
}

// == Lookup Result ==
/// Tier a read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
    Memory,
    Disk,
    None,
}

/// Result of a cache read.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheLookup<T> {
    /// Cached payload, if any
    pub data: Option<T>,
    /// True if the payload is older than the TTL, or absent
    pub is_stale: bool,
    /// Tier the payload came from
    pub from: CacheSource,
}

impl<T> CacheLookup<T> {
    /// Result for a key present in neither tier.
    pub fn miss() -> Self {
        Self {
            data: None,
            is_stale: true,
            from: CacheSource::None,
        }
    }

    fn found(data: T, is_stale: bool, from: CacheSource) -> Self {
        Self {
            data: Some(data),
            is_stale,
            from,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.data.is_some()
    }
}

// == Tiered Cache ==
/// Two-tier cache owned by the application's composition root and shared
/// with consumers through an `Arc`.
pub struct TieredCache {
    /// L1, cleared on logout or teardown
    memory: RwLock<MemoryTier>,
    stats: StatsRecorder,
    /// L2, owned by the device
    store: Arc<dyn PersistentStore>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
}

impl TieredCache {
    // == Constructors ==
    /// Creates an empty cache over `store` using the system clock.
    pub fn new(store: Arc<dyn PersistentStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates an empty cache over `store` reading time from `clock`.
    pub fn with_clock(store: Arc<dyn PersistentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            memory: RwLock::new(MemoryTier::new()),
            stats: StatsRecorder::new(),
            store,
            clock,
            default_ttl: DEFAULT_TTL,
        }
    }

    /// Overrides the TTL used when a call does not supply one.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        if !ttl.is_zero() {
            self.default_ttl = ttl;
        }
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn effective_ttl(&self, options: &CacheOptions) -> Duration {
        options
            .ttl
            .filter(|ttl| !ttl.is_zero())
            .unwrap_or(self.default_ttl)
    }

    // == Get ==
    /// Reads `key`, checking memory first and then the persistent store.
    ///
    /// A persistent hit is promoted into memory unless `skip_memory` is set.
    /// Store failures and payloads that do not decode as `T` read as a miss.
    pub async fn get<T>(&self, key: &str, options: &CacheOptions) -> CacheLookup<T>
    where
        T: DeserializeOwned,
    {
        let ttl = self.effective_ttl(options);
        let now = self.clock.now_ms();

        // 1. Memory tier
        if !options.skip_memory {
            let cached = self.memory.read().await.lookup(key, now, ttl);
            if let Some((entry, is_stale)) = cached {
                if let Some(data) = decode(key, entry) {
                    self.stats.record_memory_hit(is_stale);
                    debug!("[{}] Memory hit for {} (stale: {})", options.label(), key, is_stale);
                    return CacheLookup::found(data, is_stale, CacheSource::Memory);
                }
            }
        }

        // 2. Persistent tier
        match self.store.get(key).await {
            Ok(Some(entry)) => {
                let is_stale = entry.is_stale(now, ttl);
                let Some(data) = decode(key, entry.clone()) else {
                    self.stats.record_miss();
                    return CacheLookup::miss();
                };
                if !options.skip_memory {
                    self.memory.write().await.insert(key.to_string(), entry);
                }
                self.stats.record_disk_hit(is_stale);
                debug!("[{}] Disk hit for {} (stale: {})", options.label(), key, is_stale);
                CacheLookup::found(data, is_stale, CacheSource::Disk)
            }
            Ok(None) => {
                self.stats.record_miss();
                debug!("[{}] Cache miss for {}", options.label(), key);
                CacheLookup::miss()
            }
            Err(err) => {
                warn!("[{}] Failed to read {} from persistent store: {}", options.label(), key, err);
                self.stats.record_store_failure();
                self.stats.record_miss();
                CacheLookup::miss()
            }
        }
    }

    // == Set ==
    /// Writes `data` under `key` with a fresh timestamp.
    ///
    /// The memory write (unless `skip_memory`) always happens; a failed
    /// persistent write is logged and otherwise ignored.
    pub async fn set<T>(&self, key: &str, data: &T, options: &CacheOptions)
    where
        T: Serialize + ?Sized,
    {
        let payload = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(err) => {
                warn!("[{}] Failed to encode cache entry {}: {}", options.label(), key, err);
                return;
            }
        };
        let entry: StoredEntry = CacheEntry::new(payload, self.clock.now_ms());

        // 1. Memory tier
        if !options.skip_memory {
            self.memory.write().await.insert(key.to_string(), entry.clone());
        }

        // 2. Persistent tier
        if let Err(err) = self.store.set(key, &entry).await {
            warn!("[{}] Failed to write {} to persistent store: {}", options.label(), key, err);
            self.stats.record_store_failure();
        }
    }

    // == Remove ==
    /// Deletes `key` from both tiers.
    pub async fn remove(&self, key: &str) {
        self.memory.write().await.remove(key);

        if let Err(err) = self.store.del(key).await {
            warn!("Failed to delete {} from persistent store: {}", key, err);
            self.stats.record_store_failure();
        }
    }

    // == Clear All ==
    /// Empties both tiers. Called on logout so the next session on a shared
    /// device starts with nothing cached.
    pub async fn clear_all(&self) {
        let cleared = self.memory.write().await.clear();

        match self.store.clear().await {
            Ok(()) => info!("Cache cleared ({} memory entries dropped)", cleared),
            Err(err) => {
                warn!("Failed to clear persistent store: {}", err);
                self.stats.record_store_failure();
            }
        }
    }

    // == Teardown ==
    /// Drops the memory tier at shutdown. The persistent store is left
    /// untouched for the next process.
    pub async fn teardown(&self) {
        let cleared = self.memory.write().await.clear();
        debug!("Cache teardown dropped {} memory entries", cleared);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.memory.read().await.len();
        self.stats.snapshot(total_entries)
    }
}

/// Converts a stored JSON payload into the caller's type.
fn decode<T>(key: &str, entry: StoredEntry) -> Option<T>
where
    T: DeserializeOwned,
{
    match serde_json::from_value(entry.data) {
        Ok(data) => Some(data),
        Err(err) => {
            warn!("Cached payload for {} does not match requested type: {}", key, err);
            None
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::MemoryStore;
    use crate::cache::ManualClock;
    use crate::error::{StoreError, StoreResult};
    use async_trait::async_trait;
    use serde_json::json;

    /// Store whose every operation fails
    struct BrokenStore;

    #[async_trait]
    impl PersistentStore for BrokenStore {
        async fn get(&self, _key: &str) -> StoreResult<Option<StoredEntry>> {
            Err(StoreError::Unavailable("private browsing".to_string()))
        }
        async fn set(&self, _key: &str, _entry: &StoredEntry) -> StoreResult<()> {
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }
        async fn del(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("private browsing".to_string()))
        }
        async fn clear(&self) -> StoreResult<()> {
            Err(StoreError::Unavailable("private browsing".to_string()))
        }
    }

    fn cache_with(store: Arc<dyn PersistentStore>) -> (TieredCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        (TieredCache::with_clock(store, clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_set_then_get_from_memory() {
        let (cache, _) = cache_with(Arc::new(MemoryStore::new()));
        let opts = CacheOptions::new();

        cache.set("k", &json!({"title": "Bike"}), &opts).await;
        let hit = cache.get::<serde_json::Value>("k", &opts).await;

        assert_eq!(hit.data, Some(json!({"title": "Bike"})));
        assert!(!hit.is_stale);
        assert_eq!(hit.from, CacheSource::Memory);
    }

    #[tokio::test]
    async fn test_miss() {
        let (cache, _) = cache_with(Arc::new(MemoryStore::new()));

        let result = cache.get::<String>("absent", &CacheOptions::new()).await;
        assert_eq!(result, CacheLookup::miss());
        assert_eq!(cache.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn test_stale_data_still_returned() {
        let (cache, clock) = cache_with(Arc::new(MemoryStore::new()));
        let opts = CacheOptions::new().with_ttl(Duration::from_secs(60));

        cache.set("k", "v", &opts).await;
        clock.advance(Duration::from_secs(61));

        let result = cache.get::<String>("k", &opts).await;
        assert_eq!(result.data.as_deref(), Some("v"));
        assert!(result.is_stale);
        assert_eq!(cache.stats().await.stale_reads, 1);
    }

    #[tokio::test]
    async fn test_default_ttl_is_five_minutes() {
        let (cache, clock) = cache_with(Arc::new(MemoryStore::new()));
        let opts = CacheOptions::new();
        cache.set("k", &1u32, &opts).await;

        clock.advance(Duration::from_secs(300));
        assert!(!cache.get::<u32>("k", &opts).await.is_stale);

        clock.advance(Duration::from_millis(1));
        assert!(cache.get::<u32>("k", &opts).await.is_stale);
    }

    #[tokio::test]
    async fn test_zero_ttl_uses_default() {
        let (cache, clock) = cache_with(Arc::new(MemoryStore::new()));
        let opts = CacheOptions::new().with_ttl(Duration::ZERO);
        cache.set("k", &1u32, &opts).await;

        clock.advance(Duration::from_secs(10));
        assert!(!cache.get::<u32>("k", &opts).await.is_stale);
    }

    #[tokio::test]
    async fn test_disk_hit_promotes_to_memory() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("k", &CacheEntry::new(json!("from disk"), 1_000_000))
            .await
            .unwrap();
        let (cache, _) = cache_with(store);
        let opts = CacheOptions::new();

        let first = cache.get::<String>("k", &opts).await;
        assert_eq!(first.from, CacheSource::Disk);
        assert_eq!(first.data.as_deref(), Some("from disk"));

        let second = cache.get::<String>("k", &opts).await;
        assert_eq!(second.from, CacheSource::Memory);

        let stats = cache.stats().await;
        assert_eq!(stats.disk_hits, 1);
        assert_eq!(stats.memory_hits, 1);
    }

    #[tokio::test]
    async fn test_skip_memory_bypasses_l1() {
        let store = Arc::new(MemoryStore::new());
        let (cache, _) = cache_with(store.clone());
        let opts = CacheOptions::new().skipping_memory();

        cache.set("k", &5u32, &opts).await;
        assert_eq!(cache.stats().await.total_entries, 0);
        assert_eq!(store.len().await, 1);

        let first = cache.get::<u32>("k", &opts).await;
        let second = cache.get::<u32>("k", &opts).await;
        assert_eq!(first.from, CacheSource::Disk);
        assert_eq!(second.from, CacheSource::Disk);
        assert_eq!(cache.stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_failed_store_write_still_serves_from_memory() {
        let (cache, _) = cache_with(Arc::new(BrokenStore));
        let opts = CacheOptions::new();

        cache.set("k", "v", &opts).await;
        let result = cache.get::<String>("k", &opts).await;

        assert_eq!(result.data.as_deref(), Some("v"));
        assert_eq!(result.from, CacheSource::Memory);
        assert_eq!(cache.stats().await.store_failures, 1);
    }

    #[tokio::test]
    async fn test_failed_store_read_is_a_miss() {
        let (cache, _) = cache_with(Arc::new(BrokenStore));

        let result = cache.get::<String>("k", &CacheOptions::new()).await;
        assert_eq!(result, CacheLookup::miss());
    }

    #[tokio::test]
    async fn test_broken_store_remove_and_clear_do_not_fail() {
        let (cache, _) = cache_with(Arc::new(BrokenStore));
        let opts = CacheOptions::new();
        cache.set("k", "v", &opts).await;

        cache.remove("k").await;
        assert!(!cache.get::<String>("k", &opts).await.is_hit());

        cache.set("k", "v", &opts).await;
        cache.clear_all().await;
        assert!(!cache.get::<String>("k", &opts).await.is_hit());
    }

    #[tokio::test]
    async fn test_remove_deletes_both_tiers() {
        let store = Arc::new(MemoryStore::new());
        let (cache, _) = cache_with(store.clone());
        let opts = CacheOptions::new();

        cache.set("k", "v", &opts).await;
        cache.remove("k").await;

        assert!(store.is_empty().await);
        assert_eq!(cache.get::<String>("k", &opts).await.from, CacheSource::None);
    }

    #[tokio::test]
    async fn test_clear_all_empties_both_tiers() {
        let store = Arc::new(MemoryStore::new());
        let (cache, _) = cache_with(store.clone());
        let opts = CacheOptions::new();

        cache.set("a", &1u32, &opts).await;
        cache.set("b", &2u32, &opts).await;
        cache.clear_all().await;

        assert!(store.is_empty().await);
        assert_eq!(cache.stats().await.total_entries, 0);
        assert!(!cache.get::<u32>("a", &opts).await.is_hit());
    }

    #[tokio::test]
    async fn test_teardown_keeps_persistent_tier() {
        let store = Arc::new(MemoryStore::new());
        let (cache, _) = cache_with(store.clone());
        let opts = CacheOptions::new();

        cache.set("k", &1u32, &opts).await;
        cache.teardown().await;

        assert_eq!(store.len().await, 1);
        assert_eq!(cache.get::<u32>("k", &opts).await.from, CacheSource::Disk);
    }

    #[tokio::test]
    async fn test_type_mismatch_reads_as_miss() {
        let (cache, _) = cache_with(Arc::new(MemoryStore::new()));
        let opts = CacheOptions::new();

        cache.set("k", "not a number", &opts).await;
        let result = cache.get::<u64>("k", &opts).await;
        assert_eq!(result, CacheLookup::miss());

        let stats = cache.stats().await;
        assert_eq!(stats.memory_hits, 0);
        assert_eq!(stats.disk_hits, 0);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[tokio::test]
    async fn test_undecodable_memory_entry_falls_back_to_store() {
        let store = Arc::new(MemoryStore::new());
        let (cache, _) = cache_with(store.clone());
        let opts = CacheOptions::new();

        cache.set("k", "text", &opts).await;
        store
            .set("k", &CacheEntry::new(json!(7), 1_000_000))
            .await
            .unwrap();

        let result = cache.get::<u64>("k", &opts).await;
        assert_eq!(result.data, Some(7));
        assert_eq!(result.from, CacheSource::Disk);

        // The persistent copy was promoted over the memory copy
        let again = cache.get::<u64>("k", &opts).await;
        assert_eq!(again.from, CacheSource::Memory);
        assert_eq!(cache.stats().await.memory_hits, 1);
    }

    #[tokio::test]
    async fn test_overwrite_refreshes_timestamp() {
        let (cache, clock) = cache_with(Arc::new(MemoryStore::new()));
        let opts = CacheOptions::new().with_ttl(Duration::from_secs(10));

        cache.set("k", &1u32, &opts).await;
        clock.advance(Duration::from_secs(11));
        cache.set("k", &2u32, &opts).await;

        let result = cache.get::<u32>("k", &opts).await;
        assert_eq!(result.data, Some(2));
        assert!(!result.is_stale);
    }
}
