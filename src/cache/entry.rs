//! Cache Entry Module
//!
//! Defines a cached payload together with its write timestamp.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format version stamped on every entry.
pub const ENTRY_VERSION: &str = "1.0";

// == Cache Entry ==
/// A cached payload and the time it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached payload
    pub data: T,
    /// Write timestamp (Unix milliseconds)
    pub timestamp: u64,
    /// Entry format version
    pub version: String,
}

/// Entry as held by both tiers, with the payload kept as JSON.
pub type StoredEntry = CacheEntry<Value>;

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry stamped with `timestamp_ms`.
    pub fn new(data: T, timestamp_ms: u64) -> Self {
        Self {
            data,
            timestamp: timestamp_ms,
            version: ENTRY_VERSION.to_string(),
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was written.
    ///
    /// Saturates at zero if the clock moved backwards.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp)
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `ttl`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is
    /// still fresh; it turns stale only once the age exceeds it.
    pub fn is_stale(&self, now_ms: u64, ttl: Duration) -> bool {
        u128::from(self.age_ms(now_ms)) > ttl.as_millis()
    }
}
