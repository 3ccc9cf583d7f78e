//! Result types produced by the maintenance utilities.

use std::collections::{BTreeMap, BTreeSet};

use jiff::Timestamp;
use serde::Serialize;

use crate::store::Collection;

/// Size of one stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyUsage {
    pub key: String,
    pub bytes: usize,
}

/// Storage consumption across every key in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageReport {
    pub key_count: usize,

    /// Sum of the serialised byte lengths of every value
    pub total_bytes: usize,

    /// Per-key sizes, sorted by key
    pub keys: Vec<KeyUsage>,

    /// Bytes per collection; keys outside the namespace count as `other`
    pub by_collection: BTreeMap<String, usize>,
}

/// A key a bulk deletion could not remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFailure {
    pub key: String,
    pub error: String,
}

/// Outcome of a best-effort bulk deletion.
///
/// Deletions are not rolled back when some keys fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClearReport {
    pub removed: Vec<String>,
    pub failed: Vec<KeyFailure>,
}

impl ClearReport {
    /// Whether every key was removed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// What is wrong with a stored collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// The value is not JSON or not an array
    Corrupted,

    /// The array holds this many records failing validation or decoding
    InvalidRecords(usize),

    /// The array repeats this many record ids
    DuplicateRecords(usize),

    /// The store failed to return the value
    Unreadable,
}

/// One problem found by an integrity scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityIssue {
    pub user_id: String,
    pub collection: Collection,
    pub kind: IssueKind,
}

/// Outcome of an integrity scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Number of collection keys examined
    pub collections_scanned: usize,

    /// Users owning at least one collection
    pub users: BTreeSet<String>,

    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    /// Whether the scan found nothing wrong.
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues rendered as `"<userId>: corrupted <collection> data"` style
    /// messages.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Everything the system report shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemReport {
    pub generated_at: Timestamp,
    pub usage: UsageReport,
    pub integrity: IntegrityReport,
}
