//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::models::{Difficulty, Plan, PlanType, Workout};

/// Newtype wrapper listing plans as one summary section each.
///
/// Unlike a plan's own `Display`, the summary leaves out the training days.
///
/// # Examples
///
/// ```rust
/// use liftlog_core::{display::Plans, models::Plan};
///
/// let plans = Plans(vec![Plan::new("p1", "5/3/1", "u1")]);
/// assert!(plans.to_string().contains("## 5/3/1 (ID: p1)"));
/// ```
pub struct Plans(pub Vec<Plan>);

impl Plans {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plan> {
        self.0.iter()
    }
}

impl Index<usize> for Plans {
    type Output = Plan;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Plans {
    type Item = Plan;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plans {
    type Item = &'a Plan;
    type IntoIter = std::slice::Iter<'a, Plan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }

        for plan in &self.0 {
            writeln!(f, "## {} (ID: {})", plan.name, plan.id)?;
            writeln!(f)?;
            if !plan.description.is_empty() {
                writeln!(f, "- **Description**: {}", plan.description)?;
            }
            let kind: Vec<&str> = [
                plan.difficulty.as_ref().map(Difficulty::as_str),
                plan.plan_type.as_ref().map(PlanType::as_str),
            ]
            .into_iter()
            .flatten()
            .collect();
            if !kind.is_empty() {
                writeln!(f, "- **Kind**: {}", kind.join(", "))?;
            }
            writeln!(
                f,
                "- **Days**: {}, **Exercises**: {}",
                plan.day_count(),
                plan.exercise_count()
            )?;
            writeln!(f, "- **Updated**: {}", LocalDateTime::new(&plan.updated_at))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for a workout history.
pub struct Workouts(pub Vec<Workout>);

impl Workouts {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Workouts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No workouts found.");
        }
        for workout in &self.0 {
            write!(f, "{workout}")?;
        }
        Ok(())
    }
}
