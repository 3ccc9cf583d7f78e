//! The contract between a model type and its repository.

use std::collections::HashSet;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    models::{Plan, Workout},
    store::Collection,
    validate::{self, ValidationError},
};

/// A record type stored as a per-user collection.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the records live in
    const COLLECTION: Collection;

    /// Singular name used in errors and logs
    const KIND: &'static str;

    /// Identifier, unique within one user's collection
    fn id(&self) -> &str;

    /// Owner of the record
    fn user_id(&self) -> &str;

    /// Structural check of a raw record.
    fn validate(record: &Value) -> Result<(), ValidationError>;

    /// Validate then decode a raw record, describing why it was rejected.
    fn decode(record: Value) -> Result<Self, String> {
        Self::validate(&record).map_err(|e| e.to_string())?;
        serde_json::from_value(record).map_err(|e| e.to_string())
    }
}

/// Why a stored record was left out of a decoded collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Failed validation or typed decoding
    Invalid { index: usize, reason: String },

    /// Repeats the id of an earlier record; the first one wins
    Duplicate { index: usize, id: String },
}

/// A stored collection split into trusted entities and rejected records.
///
/// Repositories drop the rejected records on read and integrity scans
/// report them, so both see exactly the same records as bad.
#[derive(Debug, Clone)]
pub struct DecodedCollection<E> {
    pub entities: Vec<E>,
    pub rejected: Vec<Rejection>,
}

impl<E: Entity> DecodedCollection<E> {
    /// Decode every record of a stored array, in order.
    pub fn decode(records: Vec<Value>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut entities = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            match E::decode(record) {
                Ok(entity) if seen.insert(entity.id().to_string()) => entities.push(entity),
                Ok(entity) => rejected.push(Rejection::Duplicate {
                    index,
                    id: entity.id().to_string(),
                }),
                Err(reason) => rejected.push(Rejection::Invalid { index, reason }),
            }
        }

        Self { entities, rejected }
    }

    /// Number of records that failed validation or decoding.
    pub fn invalid_count(&self) -> usize {
        self.rejected
            .iter()
            .filter(|r| matches!(r, Rejection::Invalid { .. }))
            .count()
    }

    /// Number of records dropped as duplicates.
    pub fn duplicate_count(&self) -> usize {
        self.rejected.len() - self.invalid_count()
    }
}

impl Entity for Plan {
    const COLLECTION: Collection = Collection::Plans;
    const KIND: &'static str = "plan";

    fn id(&self) -> &str {
        &self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn validate(record: &Value) -> Result<(), ValidationError> {
        validate::validate_plan(record)
    }
}

impl Entity for Workout {
    const COLLECTION: Collection = Collection::Workouts;
    const KIND: &'static str = "workout";

    fn id(&self) -> &str {
        &self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn validate(record: &Value) -> Result<(), ValidationError> {
        validate::validate_workout(record)
    }
}
