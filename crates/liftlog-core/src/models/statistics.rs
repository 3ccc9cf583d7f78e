//! Aggregate statistics over a user's plans.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Difficulty, Plan, PlanType};

const UNSPECIFIED: &str = "unspecified";

/// Counts and averages across one user's plan collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStatistics {
    pub total_plans: usize,

    /// Plans per difficulty; plans without one count as `unspecified`
    pub by_difficulty: BTreeMap<String, usize>,

    /// Plans per type; plans without one count as `unspecified`
    pub by_type: BTreeMap<String, usize>,

    /// Mean of [`Plan::day_count`], 0 when there are no plans
    pub average_days: f64,

    pub total_exercises: usize,

    /// Mean rating over rated plans only
    pub average_rating: Option<f64>,
}

impl PlanStatistics {
    /// Aggregate `plans`; an empty slice yields zeroed statistics.
    pub fn from_plans(plans: &[Plan]) -> Self {
        if plans.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            total_plans: plans.len(),
            ..Default::default()
        };

        let mut total_days = 0u64;
        let mut rating_sum = 0.0;
        let mut rated = 0usize;

        for plan in plans {
            let difficulty = plan.difficulty.as_ref().map_or(UNSPECIFIED, Difficulty::as_str);
            *stats.by_difficulty.entry(difficulty.to_string()).or_default() += 1;

            let plan_type = plan.plan_type.as_ref().map_or(UNSPECIFIED, PlanType::as_str);
            *stats.by_type.entry(plan_type.to_string()).or_default() += 1;

            total_days += u64::from(plan.day_count());
            stats.total_exercises += plan.exercise_count();

            if let Some(rating) = plan.rating.filter(|r| r.is_finite()) {
                rating_sum += rating;
                rated += 1;
            }
        }

        stats.average_days = total_days as f64 / plans.len() as f64;
        stats.average_rating = (rated > 0).then(|| rating_sum / rated as f64);
        stats
    }
}
