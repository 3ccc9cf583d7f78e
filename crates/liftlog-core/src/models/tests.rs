#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;
    use serde_json::json;

    use crate::models::{
        Difficulty, Plan, PlanDay, PlanExercise, PlanQuery, PlanStatistics, PlanType, Workout,
    };

    fn create_test_plan(id: &str, name: &str) -> Plan {
        Plan {
            id: id.to_string(),
            name: name.to_string(),
            description: "Three sessions a week".to_string(),
            user_id: "u1".to_string(),
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
            difficulty: Some(Difficulty::Beginner),
            plan_type: Some(PlanType::Strength),
            tags: vec!["barbell".to_string(), "Full Body".to_string()],
            goal: Some("Get stronger".to_string()),
            rating: Some(4.0),
            day_count: None,
            days: vec![
                PlanDay {
                    day_number: 1,
                    name: "A".to_string(),
                    exercises: vec![
                        PlanExercise::new("squat", "Squat", 3, 5),
                        PlanExercise::new("bench", "Bench Press", 3, 5),
                    ],
                },
                PlanDay {
                    day_number: 2,
                    name: "B".to_string(),
                    exercises: vec![PlanExercise::new("deadlift", "Deadlift", 1, 5)],
                },
            ],
        }
    }

    #[test]
    fn test_plan_serializes_camel_case() {
        let plan = create_test_plan("p1", "Starting Strength");
        let value = serde_json::to_value(&plan).unwrap();

        assert_eq!(value["userId"], "u1");
        assert_eq!(value["createdAt"], "2022-01-01T00:00:00Z");
        assert_eq!(value["type"], "strength");
        assert_eq!(value["difficulty"], "beginner");
        assert_eq!(value["days"][0]["exercises"][0]["exerciseId"], "squat");
        assert!(value.get("dayCount").is_none());
    }

    #[test]
    fn test_plan_deserializes_minimal_record() {
        let plan: Plan = serde_json::from_value(json!({
            "id": "p1",
            "name": "A",
            "userId": "u1",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(plan.description, "");
        assert!(plan.days.is_empty());
        assert!(plan.tags.is_empty());
        assert_eq!(plan.difficulty, None);
    }

    #[test]
    fn test_unknown_enum_values_are_tolerated() {
        let plan: Plan = serde_json::from_value(json!({
            "id": "p1",
            "name": "A",
            "userId": "u1",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "difficulty": "elite",
            "type": "calisthenics"
        }))
        .unwrap();

        assert_eq!(plan.difficulty, Some(Difficulty::Other("elite".to_string())));
        assert_eq!(plan.plan_type, Some(PlanType::Other("calisthenics".to_string())));

        let encoded = serde_json::to_value(&plan).unwrap();
        assert_eq!(encoded["difficulty"], "elite");
        assert_eq!(encoded["type"], "calisthenics");
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Advanced".parse::<Difficulty>(), Ok(Difficulty::Advanced));
        assert!("other".parse::<Difficulty>().is_err());
        assert!("elite".parse::<Difficulty>().is_err());
        assert!("yoga".parse::<PlanType>().is_err());
        assert_eq!("mixed".parse::<PlanType>(), Ok(PlanType::Mixed));
    }

    #[test]
    fn test_day_count_prefers_declared_value() {
        let mut plan = create_test_plan("p1", "A");
        assert_eq!(plan.day_count(), 2);
        plan.day_count = Some(5);
        assert_eq!(plan.day_count(), 5);
    }

    #[test]
    fn test_touch_never_precedes_creation() {
        let mut plan = create_test_plan("p1", "A");
        plan.created_at = Timestamp::MAX;
        plan.touch();
        assert_eq!(plan.updated_at, plan.created_at);
    }

    #[test]
    fn test_query_criteria() {
        let plan = create_test_plan("p1", "Starting Strength");

        assert!(PlanQuery::default().matches(&plan));
        assert!(PlanQuery::text("sessions").matches(&plan));
        assert!(PlanQuery {
            tag: Some("full body".to_string()),
            ..Default::default()
        }
        .matches(&plan));
        assert!(!PlanQuery {
            tag: Some("kettlebell".to_string()),
            ..Default::default()
        }
        .matches(&plan));
        assert!(!PlanQuery {
            difficulty: Some(Difficulty::Advanced),
            ..Default::default()
        }
        .matches(&plan));
        assert!(PlanQuery {
            text: Some("strength".to_string()),
            plan_type: Some(PlanType::Strength),
            difficulty: Some(Difficulty::Beginner),
            tag: Some("BARBELL".to_string()),
        }
        .matches(&plan));
    }

    #[test]
    fn test_blank_text_query_is_empty() {
        assert!(PlanQuery::text("   ").is_empty());
        assert!(!PlanQuery::text("legs").is_empty());
    }

    #[test]
    fn test_statistics_empty() {
        assert_eq!(PlanStatistics::from_plans(&[]), PlanStatistics::default());
    }

    #[test]
    fn test_statistics_aggregates() {
        let mut second = create_test_plan("p2", "Cardio Base");
        second.difficulty = None;
        second.plan_type = Some(PlanType::Cardio);
        second.rating = None;
        second.day_count = Some(4);

        let stats = PlanStatistics::from_plans(&[create_test_plan("p1", "A"), second]);

        assert_eq!(stats.total_plans, 2);
        assert_eq!(stats.by_difficulty.get("beginner"), Some(&1));
        assert_eq!(stats.by_difficulty.get("unspecified"), Some(&1));
        assert_eq!(stats.by_type.get("strength"), Some(&1));
        assert_eq!(stats.by_type.get("cardio"), Some(&1));
        assert_eq!(stats.average_days, 3.0);
        assert_eq!(stats.total_exercises, 6);
        assert_eq!(stats.average_rating, Some(4.0));
    }

    #[test]
    fn test_workout_total_sets() {
        let mut workout = Workout::new("w1", "u1");
        workout.exercises = vec![
            PlanExercise::new("squat", "Squat", 5, 5),
            PlanExercise::new("row", "Row", 3, 8),
        ];
        assert_eq!(workout.total_sets(), 8);
    }
}
