#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;

    use crate::{
        error::PlannerError,
        models::{
            CompletionMap, Goal, Plan, PlanSummary, Task, TaskPriority, TaskStatus,
        },
    };

    fn create_test_task(order: u32, estimated_days: Option<u32>, status: TaskStatus) -> Task {
        Task {
            id: format!("task-{order}"),
            description: format!("Description for task {order}"),
            estimated_days,
            status,
            ..Task::new(order, format!("Task {order}"))
        }
    }

    fn create_test_plan() -> Plan {
        Plan {
            id: 42,
            goal: Goal {
                text: "Learn Rust".to_string(),
                created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            },
            tasks: vec![
                create_test_task(3, Some(5), TaskStatus::Todo),
                create_test_task(1, Some(2), TaskStatus::Done),
                create_test_task(2, None, TaskStatus::InProgress),
            ],
        }
    }

    #[test]
    fn test_task_status_parsing_variants() {
        assert_eq!("TODO".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("in-review".parse::<TaskStatus>().unwrap(), TaskStatus::InReview);
        assert_eq!("InProgress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!(" done ".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert_eq!("Blocked".parse::<TaskStatus>().unwrap(), TaskStatus::Blocked);
    }

    #[test]
    fn test_task_status_parsing_rejects_unknown() {
        let err = "INVALID".parse::<TaskStatus>().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidStatus { ref value } if value == "INVALID"));
    }

    #[test]
    fn test_task_status_round_trips_through_as_str() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_task_priority_parsing() {
        assert_eq!("urgent".parse::<TaskPriority>().unwrap(), TaskPriority::Urgent);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
        assert!("critical".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn test_task_deserialization_defaults() {
        let task: Task = serde_json::from_str(r#"{"order": 4, "title": "Bare"}"#).unwrap();

        assert_eq!(task.id, "");
        assert_eq!(task.description, "");
        assert_eq!(task.depends_on, None);
        assert_eq!(task.estimated_days, None);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.progress, 0);
        assert!(task.labels.is_empty());
        assert!(task.comments.is_empty());
    }

    #[test]
    fn test_task_deserialization_accepts_legacy_id_and_nulls() {
        let task: Task = serde_json::from_str(
            r#"{"_id": "abc123", "order": 2, "title": "T", "dependsOn": null, "estimatedDays": 3, "status": "IN_REVIEW"}"#,
        )
        .unwrap();

        assert_eq!(task.id, "abc123");
        assert_eq!(task.depends_on, None);
        assert_eq!(task.estimated_days, Some(3));
        assert_eq!(task.status, TaskStatus::InReview);
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            depends_on: Some(1),
            estimated_days: Some(2),
            ..create_test_task(2, None, TaskStatus::InProgress)
        };
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["dependsOn"], 1);
        assert_eq!(value["estimatedDays"], 2);
        assert_eq!(value["status"], "IN_PROGRESS");
        assert_eq!(value["priority"], "MEDIUM");
        assert!(value.get("assignee").is_none());
    }

    #[test]
    fn test_zero_estimate_is_no_estimate() {
        let zero = create_test_task(1, Some(0), TaskStatus::Todo);
        let three = create_test_task(2, Some(3), TaskStatus::Todo);

        assert_eq!(zero.estimate(), None);
        assert_eq!(three.estimate(), Some(3));
    }

    #[test]
    fn test_new_task_ids_are_unique() {
        let a = Task::new(1, "A");
        let b = Task::new(1, "A");
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn test_plan_tasks_in_order() {
        let plan = create_test_plan();
        let orders: Vec<u32> = plan.tasks_in_order().iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(plan.task_by_order(2).map(|t| t.id.as_str()), Some("task-2"));
        assert!(plan.task_by_order(9).is_none());
    }

    #[test]
    fn test_plan_summary_from_plan() {
        let summary = PlanSummary::from(&create_test_plan());

        assert_eq!(summary.id, 42);
        assert_eq!(summary.goal.text, "Learn Rust");
        assert_eq!(summary.total_tasks, 3);
        assert_eq!(summary.done_tasks, 1);
        assert_eq!(summary.total_days, 7);
    }

    #[test]
    fn test_completion_map_defaults_to_pending() {
        let mut completion = CompletionMap::new();
        assert!(!completion.is_completed("task-1"));

        completion.set("task-1", true);
        completion.set("task-2", false);
        assert!(completion.is_completed("task-1"));
        assert!(!completion.is_completed("task-2"));
        assert_eq!(completion.len(), 2);
    }

    #[test]
    fn test_completion_map_from_orders_ignores_unknown() {
        let plan = create_test_plan();
        let completion = CompletionMap::from_orders(&plan.tasks, &[1, 3, 99]);

        assert_eq!(completion.len(), 2);
        assert!(completion.is_completed("task-1"));
        assert!(completion.is_completed("task-3"));
        assert!(!completion.is_completed("task-2"));
    }
}
