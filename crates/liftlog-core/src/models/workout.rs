//! Logged workout sessions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::PlanExercise;

/// A training session the user actually performed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,

    pub user_id: String,

    /// Plan the session followed, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,

    /// When the session started (UTC)
    pub performed_at: Timestamp,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub duration_minutes: u32,

    /// What was done, as performed rather than as prescribed
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub exercises: Vec<PlanExercise>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Workout {
    /// Create an empty session performed now.
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            plan_id: None,
            performed_at: Timestamp::now(),
            duration_minutes: 0,
            exercises: Vec::new(),
            notes: None,
        }
    }

    /// Total number of sets performed.
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }
}
