//! Display implementations for domain models.
//!
//! Plans render as a markdown document with a metadata list and one section
//! per training day; workouts render as a compact log entry.

use std::fmt;

use super::datetime::{LocalDateTime, SessionLength};
use crate::models::{Difficulty, Plan, PlanDay, PlanExercise, PlanType, Workout};

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} ({})", self.name, self.id)?;
        writeln!(f)?;

        if let Some(difficulty) = &self.difficulty {
            writeln!(f, "- Difficulty: {difficulty}")?;
        }
        if let Some(plan_type) = &self.plan_type {
            writeln!(f, "- Type: {plan_type}")?;
        }
        if let Some(goal) = &self.goal {
            writeln!(f, "- Goal: {goal}")?;
        }
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }
        if let Some(rating) = self.rating {
            writeln!(f, "- Rating: {rating:.1}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime::new(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime::new(&self.updated_at))?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        if self.days.is_empty() {
            writeln!(f, "\nNo training days in this plan.")?;
        } else {
            writeln!(f)?;
            for day in &self.days {
                write!(f, "{day}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlanDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Day {}: {}", self.day_number, self.name)?;
        writeln!(f)?;
        if self.exercises.is_empty() {
            writeln!(f, "Rest day.")?;
        } else {
            for exercise in &self.exercises {
                writeln!(f, "{exercise}")?;
            }
        }
        writeln!(f)
    }
}

/// Renders as a single markdown list item.
impl fmt::Display for PlanExercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}**: {}x{}", self.name, self.sets, self.reps)?;
        if let Some(weight) = self.weight {
            write!(f, " @ {weight}kg")?;
        }
        if let Some(rest) = self.rest_seconds {
            write!(f, ", rest {rest}s")?;
        }
        if let Some(notes) = &self.notes {
            write!(f, " ({notes})")?;
        }
        Ok(())
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} ({}, {} sets)",
            LocalDateTime::new(&self.performed_at),
            SessionLength(self.duration_minutes),
            self.total_sets()
        )?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        if let Some(plan_id) = &self.plan_id {
            writeln!(f, "- Plan: {plan_id}")?;
        }
        for exercise in &self.exercises {
            writeln!(f, "{exercise}")?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_display() {
        let mut plan = Plan::new("p1", "Upper Lower", "u1");
        plan.difficulty = Some(Difficulty::Intermediate);
        plan.tags = vec!["barbell".to_string(), "split".to_string()];
        plan.days.push(PlanDay {
            day_number: 1,
            name: "Upper".to_string(),
            exercises: vec![PlanExercise::new("bench", "Bench Press", 4, 6)],
        });

        let output = plan.to_string();
        assert!(output.starts_with("# Upper Lower (p1)"));
        assert!(output.contains("- Difficulty: intermediate"));
        assert!(output.contains("- Tags: barbell, split"));
        assert!(output.contains("## Day 1: Upper"));
        assert!(output.contains("- **Bench Press**: 4x6"));
    }

    #[test]
    fn test_plan_without_days() {
        let plan = Plan::new("p2", "Empty", "u1");
        assert!(plan.to_string().contains("No training days in this plan."));
    }

    #[test]
    fn test_exercise_details() {
        let mut exercise = PlanExercise::new("row", "Barbell Row", 3, 10);
        exercise.weight = Some(60.0);
        exercise.rest_seconds = Some(90);
        assert_eq!(exercise.to_string(), "- **Barbell Row**: 3x10 @ 60kg, rest 90s");
    }

    #[test]
    fn test_workout_header() {
        let mut workout = Workout::new("w1", "u1");
        workout.duration_minutes = 75;
        workout.plan_id = Some("p1".to_string());
        workout.exercises = vec![
            PlanExercise::new("squat", "Squat", 5, 5),
            PlanExercise::new("press", "Press", 3, 8),
        ];

        let output = workout.to_string();
        assert!(output.starts_with("## "));
        assert!(output.contains("(1 h 15 min, 8 sets)"));
        assert!(output.contains("- Plan: p1"));
    }
}
