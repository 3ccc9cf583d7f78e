//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Difficulty, PlanType};

/// A workout program owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Identifier, unique within the owner's collection
    pub id: String,

    /// Display name of the plan
    pub name: String,

    /// Free-form description
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,

    /// Owner of the plan
    pub user_id: String,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<PlanType>,

    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,

    /// User rating, usually 0 to 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Declared number of training days, when it differs from `days`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_count: Option<u32>,

    /// Ordered training days
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub days: Vec<PlanDay>,
}

/// One training day inside a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDay {
    /// 1-based position within the plan
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub day_number: u32,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,

    /// Ordered exercises for the day
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub exercises: Vec<PlanExercise>,
}

/// Prescription for one exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanExercise {
    /// Catalog identifier of the exercise
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub exercise_id: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,

    pub sets: u32,

    pub reps: u32,

    /// Working weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Rest between sets, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Plan {
    /// Create an empty plan stamped with the current time.
    pub fn new(id: impl Into<String>, name: impl Into<String>, user_id: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            user_id: user_id.into(),
            created_at: now,
            updated_at: now,
            difficulty: None,
            plan_type: None,
            tags: Vec::new(),
            goal: None,
            rating: None,
            day_count: None,
            days: Vec::new(),
        }
    }

    /// Number of training days, preferring the declared count.
    pub fn day_count(&self) -> u32 {
        self.day_count
            .unwrap_or_else(|| u32::try_from(self.days.len()).unwrap_or(u32::MAX))
    }

    /// Total number of exercises across all days.
    pub fn exercise_count(&self) -> usize {
        self.days.iter().map(|day| day.exercises.len()).sum()
    }

    /// Bump `updated_at` to now, never moving it before `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now().max(self.created_at);
    }
}

impl PlanExercise {
    /// Create an exercise prescription without weight or rest.
    pub fn new(exercise_id: impl Into<String>, name: impl Into<String>, sets: u32, reps: u32) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            name: name.into(),
            sets,
            reps,
            weight: None,
            rest_seconds: None,
            notes: None,
        }
    }
}
