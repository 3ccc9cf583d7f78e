//! Per-key async locks.
//!
//! Repositories hold a key's lock across their whole read-modify-write so
//! that two concurrent writers of the same collection cannot overwrite each
//! other's changes.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockStorage = DashMap<String, Arc<Mutex<()>>>;

/// Registry handing out one async mutex per storage key.
///
/// Cloning shares the registry, so every component built on the same store
/// must be given a clone of the same `KeyLocks`. An entry lives only while
/// someone holds or waits on its mutex.
#[derive(Debug, Clone, Default)]
pub struct KeyLocks {
    locks: Arc<LockStorage>,
}

impl KeyLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    ///
    /// The lock is released when the returned guard is dropped.
    pub async fn lock(&self, key: &str) -> KeyGuard {
        let mutex = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        KeyGuard {
            guard: Some(mutex.lock_owned().await),
            key: key.to_string(),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.locks.len()
    }
}

/// Exclusive access to one key; dropping it releases the key.
#[must_use = "the key is unlocked as soon as the guard is dropped"]
#[derive(Debug)]
pub struct KeyGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: String,
    locks: Arc<LockStorage>,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the registry's own reference left: nobody holds or awaits it.
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
