//! Memory Tier Module
//!
//! The in-process (L1) tier: a plain map of entries.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::StoredEntry;

// == Memory Tier ==
/// Session-lifetime entry map. Entries are never evicted; they live until
/// overwritten, removed or cleared.
#[derive(Debug, Default)]
pub struct MemoryTier {
    /// Key-value storage
    entries: HashMap<String, StoredEntry>,
}

impl MemoryTier {
    pub fn new() -> Self {
        Self::default()
    }

    // == Lookup ==
    /// Returns a copy of the entry and whether it is stale.
    pub fn lookup(&self, key: &str, now_ms: u64, ttl: Duration) -> Option<(StoredEntry, bool)> {
        let entry = self.entries.get(key)?.clone();
        let stale = entry.is_stale(now_ms, ttl);
        Some((entry, stale))
    }

    // == Insert ==
    /// Stores an entry, replacing any previous one for the key.
    pub fn insert(&mut self, key: String, entry: StoredEntry) {
        self.entries.insert(key, entry);
    }

    // == Remove ==
    /// Removes an entry. Returns true if one was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Drops every entry and returns how many were held.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
