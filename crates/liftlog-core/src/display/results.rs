//! Result wrapper types for displaying repository outcomes.

use std::fmt;

use crate::{
    models::{Plan, Workout},
    repository::SaveOutcome,
};

/// Outcome of a save, with the stored record.
pub struct SaveResult<T> {
    pub resource: T,
    pub outcome: SaveOutcome,
}

impl<T> SaveResult<T> {
    pub fn new(resource: T, outcome: SaveOutcome) -> Self {
        Self { resource, outcome }
    }

    fn verb(&self) -> &'static str {
        match self.outcome {
            SaveOutcome::Inserted => "Saved new",
            SaveOutcome::Updated => "Updated",
        }
    }
}

impl fmt::Display for SaveResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} plan {}", self.verb(), self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for SaveResult<Workout> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} workout {}", self.verb(), self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of a remove; a missing record is reported, not treated as an
/// error.
pub struct RemoveResult {
    pub kind: &'static str,
    pub id: String,
    pub removed: bool,
}

impl RemoveResult {
    pub fn new(kind: &'static str, id: impl Into<String>, removed: bool) -> Self {
        Self {
            kind,
            id: id.into(),
            removed,
        }
    }
}

impl fmt::Display for RemoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.removed {
            writeln!(f, "Removed {} {}", self.kind, self.id)
        } else {
            writeln!(f, "No {} with ID {} to remove", self.kind, self.id)
        }
    }
}
