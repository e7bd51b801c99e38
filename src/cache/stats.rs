//! Cache Statistics Module
//!
//! Tracks where reads were served from and how often the persistent tier
//! failed.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Reads served from the memory tier
    pub memory_hits: u64,
    /// Reads served from the persistent tier
    pub disk_hits: u64,
    /// Reads that returned no data
    pub misses: u64,
    /// Hits (either tier) that returned stale data
    pub stale_reads: u64,
    /// Persistent tier operations that failed and were absorbed
    pub store_failures: u64,
    /// Current number of entries in the memory tier
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate across both tiers.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.memory_hits + self.disk_hits;
        let total = hits + self.misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Lock-free counters shared by concurrent readers.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    memory_hits: AtomicU64,
    disk_hits: AtomicU64,
    misses: AtomicU64,
    stale_reads: AtomicU64,
    store_failures: AtomicU64,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_memory_hit(&self, stale: bool) {
        self.memory_hits.fetch_add(1, Ordering::Relaxed);
        self.record_stale(stale);
    }

    pub fn record_disk_hit(&self, stale: bool) {
        self.disk_hits.fetch_add(1, Ordering::Relaxed);
        self.record_stale(stale);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_failure(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn record_stale(&self, stale: bool) {
        if stale {
            self.stale_reads.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Reads every counter into a snapshot.
    pub fn snapshot(&self, total_entries: usize) -> CacheStats {
        CacheStats {
            memory_hits: self.memory_hits.load(Ordering::Relaxed),
            disk_hits: self.disk_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale_reads: self.stale_reads.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
            total_entries,
        }
    }
}
