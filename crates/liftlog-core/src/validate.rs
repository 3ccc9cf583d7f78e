//! Structural validation of decoded records.
//!
//! These are pure predicates over [`serde_json::Value`]: they check that the
//! fields a record needs are present and correctly typed before the record
//! is trusted. They do not attempt deep semantic checks (an exercise with an
//! empty name is still a valid record).
//!
//! The same functions guard both directions:
//!
//! - on read, failing records are dropped from the collection and logged;
//! - on write, a failing record aborts the operation before any I/O.

use jiff::Timestamp;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::store::Collection;

/// Why a record failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' {reason}")]
pub struct ValidationError {
    /// Path of the offending field, e.g. `days[0].exercises[2].sets`
    pub field: String,
    /// What is wrong with it
    pub reason: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

type Validation = Result<(), ValidationError>;

/// Validate a stored or about-to-be-stored plan record.
pub fn validate_plan(record: &Value) -> Validation {
    let object = as_object(record, "plan")?;

    require_non_empty_string(object, "id")?;
    require_string(object, "name")?;
    require_string(object, "userId")?;
    let created_at = require_timestamp(object, "createdAt")?;
    let updated_at = require_timestamp(object, "updatedAt")?;
    if created_at > updated_at {
        return Err(ValidationError::new(
            "updatedAt",
            "must not be earlier than createdAt",
        ));
    }

    for field in ["description", "difficulty", "type", "goal"] {
        optional_string(object, field)?;
    }
    optional_number(object, "rating")?;
    optional_count(object, "dayCount")?;
    if let Some(tags) = optional_array(object, "tags")? {
        for (index, tag) in tags.iter().enumerate() {
            if !tag.is_string() {
                return Err(ValidationError::new(format!("tags[{index}]"), "must be a string"));
            }
        }
    }

    if let Some(days) = optional_array(object, "days")? {
        for (day_index, day) in days.iter().enumerate() {
            let day_path = format!("days[{day_index}]");
            let day = as_object(day, &day_path)?;
            optional_count(day, "dayNumber").map_err(|e| prefixed(&day_path, e))?;
            optional_string(day, "name").map_err(|e| prefixed(&day_path, e))?;
            if let Some(exercises) = optional_array(day, "exercises")
                .map_err(|e| prefixed(&day_path, e))?
            {
                validate_exercises(exercises, &format!("{day_path}.exercises"))?;
            }
        }
    }

    Ok(())
}

/// Validate a stored or about-to-be-stored workout record.
pub fn validate_workout(record: &Value) -> Validation {
    let object = as_object(record, "workout")?;

    require_non_empty_string(object, "id")?;
    require_string(object, "userId")?;
    require_timestamp(object, "performedAt")?;
    optional_string(object, "planId")?;
    optional_string(object, "notes")?;
    optional_count(object, "durationMinutes")?;
    if let Some(exercises) = optional_array(object, "exercises")? {
        validate_exercises(exercises, "exercises")?;
    }

    Ok(())
}

/// Boolean form of [`validate_plan`].
pub fn is_valid_plan(record: &Value) -> bool {
    validate_plan(record).is_ok()
}

/// Boolean form of [`validate_workout`].
pub fn is_valid_workout(record: &Value) -> bool {
    validate_workout(record).is_ok()
}

/// Validate a record with the rules of the collection it is stored in.
pub fn validate_record(collection: Collection, record: &Value) -> Validation {
    match collection {
        Collection::Plans => validate_plan(record),
        Collection::Workouts => validate_workout(record),
    }
}

fn validate_exercises(exercises: &[Value], path: &str) -> Validation {
    for (index, exercise) in exercises.iter().enumerate() {
        let exercise_path = format!("{path}[{index}]");
        let exercise = as_object(exercise, &exercise_path)?;
        let checks = [
            require_count(exercise, "sets"),
            require_count(exercise, "reps"),
            optional_string(exercise, "exerciseId"),
            optional_string(exercise, "name"),
            optional_string(exercise, "notes"),
            optional_number(exercise, "weight"),
            optional_count(exercise, "restSeconds"),
        ];
        for check in checks {
            check.map_err(|e| prefixed(&exercise_path, e))?;
        }
    }
    Ok(())
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::new(path, "must be an object"))
}

fn require_string<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a str, ValidationError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ValidationError::new(field, "must be a string")),
        None => Err(ValidationError::new(field, "is required")),
    }
}

fn require_non_empty_string<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, ValidationError> {
    let value = require_string(object, field)?;
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(value)
}

fn require_timestamp(object: &Map<String, Value>, field: &str) -> Result<Timestamp, ValidationError> {
    require_string(object, field)?
        .parse::<Timestamp>()
        .map_err(|e| ValidationError::new(field, format!("is not a valid timestamp: {e}")))
}

fn optional_array<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<Option<&'a Vec<Value>>, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(ValidationError::new(field, "must be an array")),
    }
}

fn optional_string(object: &Map<String, Value>, field: &str) -> Validation {
    match object.get(field) {
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(()),
        Some(_) => Err(ValidationError::new(field, "must be a string")),
    }
}

fn optional_number(object: &Map<String, Value>, field: &str) -> Validation {
    match object.get(field) {
        None | Some(Value::Null) | Some(Value::Number(_)) => Ok(()),
        Some(_) => Err(ValidationError::new(field, "must be a number")),
    }
}

fn optional_count(object: &Map<String, Value>, field: &str) -> Validation {
    match object.get(field) {
        None | Some(Value::Null) => Ok(()),
        Some(_) => require_count(object, field),
    }
}

fn require_count(object: &Map<String, Value>, field: &str) -> Validation {
    match object.get(field) {
        Some(Value::Number(n)) if n.as_u64().is_some_and(|v| v <= u64::from(u32::MAX)) => Ok(()),
        Some(_) => Err(ValidationError::new(field, "must be a non-negative integer")),
        None => Err(ValidationError::new(field, "is required")),
    }
}

fn prefixed(path: &str, error: ValidationError) -> ValidationError {
    ValidationError {
        field: format!("{path}.{}", error.field),
        reason: error.reason,
    }
}
