#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use liftlog_core::{
    store::{StoreError, StoreResult},
    DataStore, DataStoreBuilder, KeyValueStore, MemoryStore, Plan, PlanDay, PlanExercise,
    RetryOptions,
};
use tempfile::TempDir;

/// Retry options with millisecond delays so retrying tests stay fast.
pub fn fast_retries() -> RetryOptions {
    RetryOptions {
        max_retries: 3,
        base_delay_ms: 5,
        max_delay_ms: 20,
        backoff_factor: 2.0,
    }
}

/// Data store over a file store in a fresh temporary directory.
pub async fn create_file_data_store() -> (TempDir, DataStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let data = DataStoreBuilder::new()
        .with_data_dir(Some(temp_dir.path().join("store")))
        .with_retry_options(fast_retries())
        .build()
        .await
        .expect("Failed to create data store");
    (temp_dir, data)
}

/// Data store over `store`.
pub async fn create_data_store(store: Arc<dyn KeyValueStore>) -> DataStore {
    DataStoreBuilder::new()
        .with_store(store)
        .with_retry_options(fast_retries())
        .build()
        .await
        .expect("Failed to create data store")
}

/// A two-day plan owned by `user_id`.
pub fn sample_plan(id: &str, name: &str, user_id: &str) -> Plan {
    let mut plan = Plan::new(id, name, user_id);
    plan.days = vec![
        PlanDay {
            day_number: 1,
            name: "Lower".to_string(),
            exercises: vec![
                PlanExercise::new("squat", "Squat", 5, 5),
                PlanExercise::new("rdl", "Romanian Deadlift", 3, 8),
            ],
        },
        PlanDay {
            day_number: 2,
            name: "Upper".to_string(),
            exercises: vec![PlanExercise::new("bench", "Bench Press", 5, 5)],
        },
    ];
    plan
}

/// Memory store with fault injection.
///
/// `fail_next(n)` makes the next `n` operations fail with a transient
/// error; `fail_key` makes every operation on one key fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pending_failures: AtomicU32,
    broken_keys: Mutex<HashSet<String>>,
    calls: AtomicU32,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, failures: u32) {
        self.pending_failures.store(failures, Ordering::SeqCst);
    }

    pub fn fail_key(&self, key: &str) {
        self.broken_keys.lock().unwrap().insert(key.to_string());
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Write directly, bypassing fault injection.
    pub async fn seed(&self, key: &str, value: &str) {
        self.inner.set(key, value).await.unwrap();
    }

    /// Read directly, bypassing fault injection.
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.unwrap()
    }

    fn check(&self, key: Option<&str>) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(key) = key {
            if self.broken_keys.lock().unwrap().contains(key) {
                return Err(StoreError::unavailable(format!("{key} is locked by another process")));
            }
        }
        let consumed = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        match consumed {
            Ok(_) => Err(StoreError::unavailable("injected transient failure")),
            Err(_) => Ok(()),
        }
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check(Some(key))?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check(Some(key))?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.check(Some(key))?;
        self.inner.remove(key).await
    }

    async fn list_keys(&self) -> StoreResult<Vec<String>> {
        self.check(None)?;
        self.inner.list_keys().await
    }
}
