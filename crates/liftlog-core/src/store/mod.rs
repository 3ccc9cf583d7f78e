//! Key-value store adapter for on-device persistence.
//!
//! The data layer never talks to a storage backend directly. Everything goes
//! through [`KeyValueStore`], a thin async interface over string keys and
//! string values:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Repositories   │    │  KeyValueStore  │    │   FileStore /   │
//! │  Maintenance    │───▶│  (+ KeyLocks)   │───▶│   MemoryStore   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Keys are namespaced per collection and user (see [`keys`]). Any operation
//! may fail with a [`StoreError`]; implementations must propagate failures
//! rather than swallow them. No transactionality is assumed across keys.

use async_trait::async_trait;

mod error;
mod file;
pub mod keys;
mod locks;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use keys::Collection;
pub use locks::{KeyGuard, KeyLocks};
pub use memory::MemoryStore;

/// Async interface over on-device key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// Must be atomic from the caller's point of view: either the whole
    /// value is replaced or nothing changes.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// List every key currently present, in no particular order.
    async fn list_keys(&self) -> StoreResult<Vec<String>>;
}
