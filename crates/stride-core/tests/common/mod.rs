use stride_core::{Plan, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Four-task plan in the shape a goal-decomposition service returns.
pub const WEBSITE_PLAN: &str = include_str!("../fixtures/website_plan.json");

pub fn website_plan() -> Plan {
    serde_json::from_str(WEBSITE_PLAN).expect("Fixture should parse")
}

/// Creates a planner backed by a database in a fresh temporary directory.
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}
