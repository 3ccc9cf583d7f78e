//! Data models for plans and logged workouts.
//!
//! These are the entities the repositories persist. Field names serialise in
//! camelCase (`userId`, `createdAt`, ...) and timestamps as RFC 3339 strings,
//! which is the on-disk format every stored collection uses.
//!
//! Display implementations live in [`crate::display`] so the models stay
//! plain data.
//!
//! # Examples
//!
//! ```rust
//! use liftlog_core::models::{Difficulty, Plan, PlanDay, PlanExercise};
//!
//! let mut plan = Plan::new("p1", "Starting Strength", "u1");
//! plan.difficulty = Some(Difficulty::Beginner);
//! plan.days.push(PlanDay {
//!     day_number: 1,
//!     name: "Day A".to_string(),
//!     exercises: vec![PlanExercise::new("squat", "Squat", 3, 5)],
//! });
//! assert_eq!(plan.day_count(), 1);
//! assert_eq!(plan.exercise_count(), 1);
//! ```

pub mod filters;
pub mod kinds;
pub mod plan;
pub mod statistics;
pub mod workout;

#[cfg(test)]
mod tests;

pub use filters::PlanQuery;
pub use kinds::{Difficulty, PlanType};
pub use plan::{Plan, PlanDay, PlanExercise};
pub use statistics::PlanStatistics;
pub use workout::Workout;

use serde::{Deserialize, Deserializer};

/// Read an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
