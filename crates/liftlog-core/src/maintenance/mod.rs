//! Cross-cutting storage maintenance.
//!
//! [`Maintenance`] works on the raw key space rather than on one entity
//! type: usage accounting, bulk deletion, integrity scans and the system
//! report built from them. It shares the store, the per-key locks and the
//! retry options of the repositories, and it never writes a collection; the
//! only mutations are deletions.

use std::{future::Future, sync::Arc};

use jiff::Timestamp;
use log::{info, warn};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{Result, StorageError, StoreResultExt},
    models::{Plan, Workout},
    repository::{storage_retry_policy, DecodedCollection, Entity},
    retry::{run_with_retry, RetryOptions, RetryPolicy},
    store::{Collection, KeyLocks, KeyValueStore},
};

mod reports;

pub use reports::{
    ClearReport, IntegrityIssue, IntegrityReport, IssueKind, KeyFailure, KeyUsage, SystemReport,
    UsageReport,
};

const OTHER_KEYS: &str = "other";

/// Storage-wide maintenance operations.
#[derive(Clone)]
pub struct Maintenance {
    store: Arc<dyn KeyValueStore>,
    locks: KeyLocks,
    policy: RetryPolicy<StorageError>,
    cancel: CancellationToken,
}

impl Maintenance {
    /// Create maintenance utilities over `store`.
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
        }
    }

    /// Sizes of every stored value.
    pub async fn usage_report(&self) -> Result<UsageReport> {
        const OPERATION: &str = "usage_report";

        let mut report = UsageReport::default();
        for key in self.list_keys(OPERATION).await? {
            let key_ref = key.as_str();
            let Some(value) = self
                .retrying(move |_| async move { self.store.get(key_ref).await.in_operation(OPERATION) })
                .await?
            else {
                continue;
            };

            let bytes = value.len();
            let bucket = Collection::parse_key(&key)
                .map_or(OTHER_KEYS, |(collection, _)| collection.as_str());
            *report.by_collection.entry(bucket.to_string()).or_default() += bytes;
            report.total_bytes += bytes;
            report.keys.push(KeyUsage { key, bytes });
        }
        report.key_count = report.keys.len();

        Ok(report)
    }

    /// Delete every collection of `user_id`.
    ///
    /// Best-effort: a key that cannot be removed is recorded in the report
    /// and the remaining keys are still attempted.
    pub async fn clear_user_data(&self, user_id: &str) -> Result<ClearReport> {
        const OPERATION: &str = "clear_user_data";
        if user_id.trim().is_empty() {
            return Err(
                StorageError::invalid_input(OPERATION, "user_id").with_reason("must not be empty")
            );
        }

        let keys = Collection::ALL
            .iter()
            .map(|collection| collection.key_for(user_id))
            .collect();
        let report = self.remove_keys(OPERATION, keys).await;
        info!(
            "Cleared data of '{user_id}': {} key(s) removed, {} failed",
            report.removed.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Delete every key in the store.
    ///
    /// Best-effort like [`clear_user_data`](Self::clear_user_data); only a
    /// failure to list the keys fails the whole operation.
    pub async fn clear_all_data(&self) -> Result<ClearReport> {
        const OPERATION: &str = "clear_all_data";

        let keys = self.list_keys(OPERATION).await?;
        let report = self.remove_keys(OPERATION, keys).await;
        info!(
            "Cleared all data: {} key(s) removed, {} failed",
            report.removed.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Decode every per-user collection and record what is wrong with it.
    ///
    /// One bad collection never stops the scan. Nothing is repaired; the
    /// repositories heal collections on their next read.
    pub async fn integrity_scan(&self) -> Result<IntegrityReport> {
        const OPERATION: &str = "integrity_scan";

        let mut report = IntegrityReport::default();
        for key in self.list_keys(OPERATION).await? {
            let Some((collection, user_id)) = Collection::parse_key(&key) else {
                continue;
            };
            report.collections_scanned += 1;
            report.users.insert(user_id.to_string());

            let key_ref = key.as_str();
            let raw = self
                .retrying(move |_| async move { self.store.get(key_ref).await.in_operation(OPERATION) })
                .await;

            let kinds = match raw {
                Ok(Some(raw)) => inspect_collection(collection, &raw),
                Ok(None) => Vec::new(),
                Err(e) => {
                    warn!("Integrity scan could not read {key}: {e}");
                    vec![IssueKind::Unreadable]
                }
            };

            report
                .issues
                .extend(kinds.into_iter().map(|kind| IntegrityIssue {
                    user_id: user_id.to_string(),
                    collection,
                    kind,
                }));
        }

        Ok(report)
    }

    /// Usage and integrity combined into one snapshot.
    pub async fn system_snapshot(&self) -> Result<SystemReport> {
        Ok(SystemReport {
            generated_at: Timestamp::now(),
            usage: self.usage_report().await?,
            integrity: self.integrity_scan().await?,
        })
    }

    /// Human-readable markdown summary of [`system_snapshot`](Self::system_snapshot).
    pub async fn system_report(&self) -> Result<String> {
        Ok(self.system_snapshot().await?.to_string())
    }

    async fn list_keys(&self, operation: &'static str) -> Result<Vec<String>> {
        let mut keys = self
            .retrying(move |_| async move { self.store.list_keys().await.in_operation(operation) })
            .await?;
        keys.sort();
        Ok(keys)
    }

    async fn remove_keys(&self, operation: &'static str, keys: Vec<String>) -> ClearReport {
        let mut report = ClearReport::default();

        for key in keys {
            let key_ref = key.as_str();
            let guard = self.locks.lock(key_ref).await;
            let result = self
                .retrying(move |_| async move { self.store.remove(key_ref).await.in_operation(operation) })
                .await;
            drop(guard);

            match result {
                Ok(()) => report.removed.push(key),
                Err(e) => {
                    warn!("Could not remove {key}: {e}");
                    report.failed.push(KeyFailure {
                        key,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    async fn retrying<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        run_with_retry(&self.policy, &self.cancel, operation).await
    }
}

/// Everything a repository read would drop from a raw collection value.
fn inspect_collection(collection: Collection, raw: &str) -> Vec<IssueKind> {
    let Ok(Value::Array(records)) = serde_json::from_str::<Value>(raw) else {
        return vec![IssueKind::Corrupted];
    };

    let (invalid, duplicates) = match collection {
        Collection::Plans => rejection_counts::<Plan>(records),
        Collection::Workouts => rejection_counts::<Workout>(records),
    };

    let mut issues = Vec::new();
    if invalid > 0 {
        issues.push(IssueKind::InvalidRecords(invalid));
    }
    if duplicates > 0 {
        issues.push(IssueKind::DuplicateRecords(duplicates));
    }
    issues
}

fn rejection_counts<E: Entity>(records: Vec<Value>) -> (usize, usize) {
    let decoded = DecodedCollection::<E>::decode(records);
    (decoded.invalid_count(), decoded.duplicate_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_collection() {
        assert!(inspect_collection(Collection::Plans, "[]").is_empty());
        assert_eq!(
            inspect_collection(Collection::Plans, "{not json"),
            [IssueKind::Corrupted]
        );
        assert_eq!(
            inspect_collection(Collection::Plans, r#"{"id":"p1"}"#),
            [IssueKind::Corrupted]
        );
        assert_eq!(
            inspect_collection(Collection::Workouts, r#"[{"id":"w1"}, 3]"#),
            [IssueKind::InvalidRecords(2)]
        );
    }

    #[test]
    fn test_inspect_collection_counts_duplicates() {
        let workout = r#"{"id":"w1","userId":"u1","performedAt":"2024-03-05T18:30:00Z"}"#;
        let raw = format!("[{workout}, {workout}, {workout}]");
        assert_eq!(
            inspect_collection(Collection::Workouts, &raw),
            [IssueKind::DuplicateRecords(2)]
        );
    }
}
