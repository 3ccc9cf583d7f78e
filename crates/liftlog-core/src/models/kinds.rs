//! Classification enumerations for plans.
//!
//! Stored labels this version does not recognise are kept verbatim in an
//! `Other` variant, so rewriting a collection never changes them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How demanding a plan is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    /// Suitable for people new to training
    Beginner,

    /// Assumes some training history
    Intermediate,

    /// High volume or intensity
    Advanced,

    /// A stored label this version does not recognise, kept as written
    Other(String),
}

impl FromStr for Difficulty {
    type Err = String;

    /// Parse user input; only the known difficulties are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

impl Difficulty {
    /// Convert to the stored string representation
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Other(label) => label,
        }
    }
}

impl From<String> for Difficulty {
    fn from(label: String) -> Self {
        match label.as_str() {
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Other(label),
        }
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Training focus of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum PlanType {
    Strength,
    Hypertrophy,
    Cardio,
    Endurance,
    Flexibility,
    Mixed,

    /// A stored label this version does not recognise, kept as written
    Other(String),
}

impl FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match PlanType::from(s.to_lowercase()) {
            PlanType::Other(_) => Err(format!("Invalid plan type: {s}")),
            known => Ok(known),
        }
    }
}

impl PlanType {
    /// Convert to the stored string representation
    pub fn as_str(&self) -> &str {
        match self {
            PlanType::Strength => "strength",
            PlanType::Hypertrophy => "hypertrophy",
            PlanType::Cardio => "cardio",
            PlanType::Endurance => "endurance",
            PlanType::Flexibility => "flexibility",
            PlanType::Mixed => "mixed",
            PlanType::Other(label) => label,
        }
    }
}

impl From<String> for PlanType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "strength" => PlanType::Strength,
            "hypertrophy" => PlanType::Hypertrophy,
            "cardio" => PlanType::Cardio,
            "endurance" => PlanType::Endurance,
            "flexibility" => PlanType::Flexibility,
            "mixed" => PlanType::Mixed,
            _ => PlanType::Other(label),
        }
    }
}

impl From<PlanType> for String {
    fn from(plan_type: PlanType) -> Self {
        match plan_type {
            PlanType::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}
