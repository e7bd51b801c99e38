//! Cache Module
//!
//! Two-tier response cache: an in-process memory tier in front of a
//! device-local persistent store, with TTL-based staleness signaling.

mod clock;
mod entry;
mod key;
mod memory;
mod stats;
pub mod store;
mod tiered;


use std::time::Duration;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, StoredEntry, ENTRY_VERSION};
pub use key::{generate_cache_key, CACHE_PREFIX};
pub use stats::CacheStats;
pub use store::{FileStore, MemoryStore, PersistentStore};
pub use tiered::{CacheLookup, CacheOptions, CacheSource, TieredCache};

// == Public Constants ==
/// Freshness window applied when a read does not supply a TTL
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
