//! Persistent Store Module
//!
//! The persistent (L2) tier is any device-local key-value store behind the
//! [`PersistentStore`] trait. Adapters report failures as [`StoreError`];
//! deciding what a failure means is left to the cache.
//!
//! [`StoreError`]: crate::error::StoreError

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::cache::StoredEntry;
use crate::error::StoreResult;

// == Persistent Store Trait ==
/// Asynchronous key-value store holding cache entries.
///
/// Calls for different keys may run concurrently. Implementations give no
/// ordering guarantee between a read and a concurrent write of one key.
#[async_trait]
pub trait PersistentStore: Send + Sync {
    /// Reads an entry. `Ok(None)` means the key is absent.
    async fn get(&self, key: &str) -> StoreResult<Option<StoredEntry>>;

    /// Writes an entry, replacing any previous value.
    async fn set(&self, key: &str, entry: &StoredEntry) -> StoreResult<()>;

    /// Deletes an entry. Deleting an absent key is not an error.
    async fn del(&self, key: &str) -> StoreResult<()>;

    /// Deletes every entry in the store.
    async fn clear(&self) -> StoreResult<()>;
}
