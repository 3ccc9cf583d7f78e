//! Repositories persisting per-user entity collections.
//!
//! A [`Repository`] owns one collection kind (plans, workouts) and stores
//! every user's copy as a single JSON array under a namespaced key. Each
//! public operation follows the same shape:
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ check input  │──▶│ lock key     │──▶│ run_with_    │──▶│ KeyValueStore│
//! │ (fail fast)  │   │ (KeyLocks)   │   │ retry(body)  │   │ get/set      │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!                                              │
//!                                              ▼
//!                                    validate every record,
//!                                    drop + rewrite invalid ones
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: [`DataStoreBuilder`] wiring store, locks and retry options
//! - [`entity`]: the [`Entity`] trait and its implementations
//! - [`plans`]: plan search and statistics
//! - [`workouts`]: workout history queries
//!
//! Reads are self-healing: records failing validation are dropped from the
//! result and the cleaned collection is written back best-effort. A stored
//! value that is not a JSON array is treated as lost; the key is cleared and
//! an empty collection returned.

use std::{future::Future, marker::PhantomData, sync::Arc};

use log::{debug, warn};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{Result, StorageError, StoreResultExt},
    retry::{run_with_retry, RetryOptions, RetryPolicy},
    store::{KeyLocks, KeyValueStore},
};

pub mod builder;
pub mod entity;
pub mod plans;
pub mod workouts;


pub use builder::{DataStore, DataStoreBuilder};
pub use entity::{DecodedCollection, Entity, Rejection};

/// Repository for workout plans.
pub type PlanRepository = Repository<crate::models::Plan>;

/// Repository for logged workouts.
pub type WorkoutRepository = Repository<crate::models::Workout>;

/// What [`Repository::save`] did with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No record with that id existed; it was appended
    Inserted,

    /// A record with that id was replaced in place
    Updated,
}

/// Build the retry policy used for storage operations.
///
/// Only [`StorageError::is_retryable`] errors are retried; every retry is
/// logged at `warn`.
pub fn storage_retry_policy(options: RetryOptions) -> RetryPolicy<StorageError> {
    RetryPolicy::new(options)
        .retry_if(StorageError::is_retryable)
        .on_retry(|event| {
            warn!(
                "Retrying storage operation (attempt {}, in {:?}): {}",
                event.attempt, event.delay, event.error
            );
        })
}

/// CRUD access to one entity collection, keyed per user.
pub struct Repository<E> {
    store: Arc<dyn KeyValueStore>,
    locks: KeyLocks,
    policy: RetryPolicy<StorageError>,
    cancel: CancellationToken,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: self.locks.clone(),
            policy: self.policy.clone(),
            cancel: self.cancel.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    /// Create a repository over `store`.
    ///
    /// `locks` must be shared with every other component writing to the
    /// same store.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        locks: KeyLocks,
        options: RetryOptions,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            store,
            locks,
            policy: storage_retry_policy(options),
            cancel,
            _entity: PhantomData,
        }
    }

    /// Replace the retry policy, e.g. to attach UI callbacks.
    pub fn with_retry_policy(mut self, policy: RetryPolicy<StorageError>) -> Self {
        self.policy = policy;
        self
    }

    /// The retry policy applied to every operation.
    pub fn retry_policy(&self) -> &RetryPolicy<StorageError> {
        &self.policy
    }

    /// Returns every valid record stored for `user_id`.
    ///
    /// Invalid records are dropped and the cleaned collection is written
    /// back; a failure of that rewrite is logged and does not fail the read.
    pub async fn get_all_for_user(&self, user_id: &str) -> Result<Vec<E>> {
        const OPERATION: &str = "get_all_for_user";
        let key = collection_key::<E>(OPERATION, user_id)?;
        let key = key.as_str();

        let _guard = self.locks.lock(key).await;
        self.retrying(move |_| self.load(OPERATION, key)).await
    }

    /// Returns the record with `id`, if any.
    pub async fn get(&self, user_id: &str, id: &str) -> Result<Option<E>> {
        const OPERATION: &str = "get";
        require_id(OPERATION, id)?;

        Ok(self
            .get_all_for_user(user_id)
            .await?
            .into_iter()
            .find(|entity| entity.id() == id))
    }

    /// Inserts `entity`, or replaces the record with the same id in place.
    ///
    /// The record is validated before any I/O; an invalid record or a
    /// record owned by another user fails with a non-retryable error.
    pub async fn save(&self, user_id: &str, entity: &E) -> Result<SaveOutcome> {
        const OPERATION: &str = "save";
        let key = collection_key::<E>(OPERATION, user_id)?;
        let key = key.as_str();
        check_record(OPERATION, user_id, entity)?;

        let _guard = self.locks.lock(key).await;
        self.retrying(move |_| self.save_once(OPERATION, key, entity))
            .await
    }

    /// Removes the record with `id`.
    ///
    /// Returns `false` when no such record exists; that is not an error.
    pub async fn remove(&self, user_id: &str, id: &str) -> Result<bool> {
        const OPERATION: &str = "remove";
        let key = collection_key::<E>(OPERATION, user_id)?;
        let key = key.as_str();
        require_id(OPERATION, id)?;

        let _guard = self.locks.lock(key).await;
        self.retrying(move |_| self.remove_once(OPERATION, key, id))
            .await
    }

    /// Deletes the whole collection of `user_id`. Idempotent.
    pub async fn clear_all_for_user(&self, user_id: &str) -> Result<()> {
        const OPERATION: &str = "clear_all_for_user";
        let key = collection_key::<E>(OPERATION, user_id)?;
        let key = key.as_str();

        let _guard = self.locks.lock(key).await;
        self.retrying(move |_| async move { self.store.remove(key).await.in_operation(OPERATION) })
            .await
    }

    async fn retrying<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        run_with_retry(&self.policy, &self.cancel, operation).await
    }

    async fn save_once(&self, operation: &'static str, key: &str, entity: &E) -> Result<SaveOutcome> {
        let mut entities = self.load(operation, key).await?;

        let outcome = match entities.iter().position(|e| e.id() == entity.id()) {
            Some(index) => {
                entities[index] = entity.clone();
                SaveOutcome::Updated
            }
            None => {
                entities.push(entity.clone());
                SaveOutcome::Inserted
            }
        };

        self.write(operation, key, &entities).await?;
        Ok(outcome)
    }

    async fn remove_once(&self, operation: &'static str, key: &str, id: &str) -> Result<bool> {
        let mut entities = self.load(operation, key).await?;
        let before = entities.len();
        entities.retain(|entity| entity.id() != id);

        if entities.len() == before {
            return Ok(false);
        }

        self.write(operation, key, &entities).await?;
        Ok(true)
    }

    /// Read and validate the collection under `key`, healing it if needed.
    async fn load(&self, operation: &'static str, key: &str) -> Result<Vec<E>> {
        let Some(raw) = self.store.get(key).await.in_operation(operation)? else {
            return Ok(Vec::new());
        };

        let records = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(records)) => records,
            Ok(other) => {
                warn!(
                    "Collection {key} holds {} instead of an array; discarding it",
                    json_kind(&other)
                );
                self.discard(key).await;
                return Ok(Vec::new());
            }
            Err(e) => {
                warn!("Collection {key} is not valid JSON ({e}); discarding it");
                self.discard(key).await;
                return Ok(Vec::new());
            }
        };

        let decoded = DecodedCollection::<E>::decode(records);
        for rejection in &decoded.rejected {
            match rejection {
                Rejection::Invalid { index, reason } => {
                    warn!("Dropping invalid {} at index {index} of {key}: {reason}", E::KIND)
                }
                Rejection::Duplicate { index, id } => {
                    warn!("Dropping duplicate {} '{id}' at index {index} of {key}", E::KIND)
                }
            }
        }

        if !decoded.rejected.is_empty() {
            self.rewrite(key, &decoded.entities).await;
        }

        Ok(decoded.entities)
    }

    async fn write(&self, operation: &'static str, key: &str, entities: &[E]) -> Result<()> {
        let encoded = serde_json::to_string(entities)
            .map_err(|source| StorageError::Serialization { operation, source })?;
        self.store.set(key, &encoded).await.in_operation(operation)
    }

    /// Best-effort write-back of a cleaned collection. Single attempt.
    async fn rewrite(&self, key: &str, entities: &[E]) {
        match self.write("rewrite", key, entities).await {
            Ok(()) => debug!("Rewrote {key} with {} valid record(s)", entities.len()),
            Err(e) => warn!("Could not persist cleaned collection {key}: {e}"),
        }
    }

    /// Best-effort removal of a corrupted collection. Single attempt.
    async fn discard(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            warn!("Could not clear corrupted collection {key}: {e}");
        }
    }
}

fn collection_key<E: Entity>(operation: &'static str, user_id: &str) -> Result<String> {
    if user_id.trim().is_empty() {
        return Err(StorageError::invalid_input(operation, "user_id").with_reason("must not be empty"));
    }
    Ok(E::COLLECTION.key_for(user_id))
}

fn require_id(operation: &'static str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(StorageError::invalid_input(operation, "id").with_reason("must not be empty"));
    }
    Ok(())
}

/// Validate an entity about to be written, before any I/O happens.
fn check_record<E: Entity>(operation: &'static str, user_id: &str, entity: &E) -> Result<()> {
    let record = serde_json::to_value(entity)
        .map_err(|source| StorageError::Serialization { operation, source })?;
    E::validate(&record).map_err(|e| StorageError::invalid_record(operation, E::KIND, e))?;

    if entity.user_id() != user_id {
        return Err(StorageError::invalid_input(operation, "userId").with_reason(format!(
            "{} '{}' belongs to '{}', not '{user_id}'",
            E::KIND,
            entity.id(),
            entity.user_id()
        )));
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
