//! Plan-specific queries.

use log::warn;

use super::PlanRepository;
use crate::{
    error::Result,
    models::{Plan, PlanQuery, PlanStatistics},
};

impl PlanRepository {
    /// Plans of `user_id` matching every criterion in `query`.
    ///
    /// Returns an empty list when nothing matches.
    pub async fn search(&self, user_id: &str, query: &PlanQuery) -> Result<Vec<Plan>> {
        let plans = self.get_all_for_user(user_id).await?;
        if query.is_empty() {
            return Ok(plans);
        }
        Ok(plans.into_iter().filter(|plan| query.matches(plan)).collect())
    }

    /// Aggregate statistics over the plans of `user_id`.
    ///
    /// Never fails: when the collection cannot be read the failure is
    /// logged and zeroed statistics are returned.
    pub async fn statistics(&self, user_id: &str) -> PlanStatistics {
        match self.get_all_for_user(user_id).await {
            Ok(plans) => PlanStatistics::from_plans(&plans),
            Err(e) => {
                warn!("Could not compute plan statistics for '{user_id}': {e}");
                PlanStatistics::default()
            }
        }
    }
}
