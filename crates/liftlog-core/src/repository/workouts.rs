//! Workout history queries.

use std::cmp::Reverse;

use super::WorkoutRepository;
use crate::{error::Result, models::Workout};

impl WorkoutRepository {
    /// The `limit` most recent workouts of `user_id`, newest first.
    pub async fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<Workout>> {
        let mut workouts = self.get_all_for_user(user_id).await?;
        workouts.sort_by_key(|workout| Reverse(workout.performed_at));
        workouts.truncate(limit);
        Ok(workouts)
    }

    /// Workouts of `user_id` that followed the plan `plan_id`.
    pub async fn for_plan(&self, user_id: &str, plan_id: &str) -> Result<Vec<Workout>> {
        Ok(self
            .get_all_for_user(user_id)
            .await?
            .into_iter()
            .filter(|workout| workout.plan_id.as_deref() == Some(plan_id))
            .collect())
    }
}
