//! Search criteria for plans.

use super::{Difficulty, Plan, PlanType};

/// In-memory filter applied by plan search.
///
/// Every criterion that is set must match; an empty query matches every
/// plan.
#[derive(Debug, Clone, Default)]
pub struct PlanQuery {
    /// Case-insensitive substring of the name or description
    pub text: Option<String>,

    /// Tag the plan must carry (case-insensitive)
    pub tag: Option<String>,

    pub difficulty: Option<Difficulty>,

    pub plan_type: Option<PlanType>,
}

impl PlanQuery {
    /// Query matching plans whose name or description contains `text`.
    ///
    /// ```rust
    /// use liftlog_core::models::{Plan, PlanQuery};
    ///
    /// let mut plan = Plan::new("p1", "Upper/Lower Split", "u1");
    /// plan.description = "Four days a week".to_string();
    ///
    /// assert!(PlanQuery::text("lower").matches(&plan));
    /// assert!(PlanQuery::text("FOUR DAYS").matches(&plan));
    /// assert!(!PlanQuery::text("marathon").matches(&plan));
    /// ```
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().map_or(true, |t| t.trim().is_empty())
            && self.tag.is_none()
            && self.difficulty.is_none()
            && self.plan_type.is_none()
    }

    /// Whether `plan` satisfies every criterion that is set.
    pub fn matches(&self, plan: &Plan) -> bool {
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            if !plan.name.to_lowercase().contains(&needle)
                && !plan.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            if !plan.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }

        if self.difficulty.is_some() && plan.difficulty != self.difficulty {
            return false;
        }

        if self.plan_type.is_some() && plan.plan_type != self.plan_type {
            return false;
        }

        true
    }
}
