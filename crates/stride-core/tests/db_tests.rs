mod common;

use rusqlite::Connection;
use stride_core::{db::migrations::SCHEMA_VERSION, Database, PlannerError, TaskStatus};
use tempfile::NamedTempFile;

fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

#[test]
fn test_database_initialization_records_version() {
    let (_temp_file, db) = create_test_db();
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
}

#[test]
fn test_reopening_keeps_data() {
    let (temp_file, mut db) = create_test_db();
    let plan = db.import_plan(&common::website_plan()).unwrap();
    drop(db);

    let db = Database::new(temp_file.path()).unwrap();
    let reloaded = db.get_plan(plan.id).unwrap().expect("Plan should persist");
    assert_eq!(reloaded, plan);
}

#[test]
fn test_legacy_ids_and_zero_estimates_survive_import() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.import_plan(&common::website_plan()).unwrap();

    assert_eq!(plan.goal.text, "Launch a personal website");
    assert_eq!(plan.goal.created_at.to_string(), "2024-03-01T09:30:00Z");
    assert_eq!(plan.tasks[0].id, "65e1a0c2f1b2c3d4e5f60001");
    assert_eq!(plan.tasks[3].estimated_days, Some(0));
    assert_eq!(plan.tasks[3].estimate(), None);

    let summaries = db.list_plans().unwrap();
    assert_eq!(summaries[0].total_days, 8);
}

#[test]
fn test_same_document_can_be_imported_twice() {
    let (_temp_file, mut db) = create_test_db();
    let first = db.import_plan(&common::website_plan()).unwrap();
    let second = db.import_plan(&common::website_plan()).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.tasks[1].id, second.tasks[1].id);

    db.update_task_state(second.id, 2, |task| {
        let mut task = task.clone();
        task.status = TaskStatus::Blocked;
        Ok(task)
    })
    .unwrap();

    assert_eq!(db.get_task(first.id, 2).unwrap().unwrap().status, TaskStatus::Todo);
}

#[test]
fn test_newer_schema_is_rejected() {
    let temp_file = NamedTempFile::new().unwrap();
    Database::new(temp_file.path()).unwrap();

    let connection = Connection::open(temp_file.path()).unwrap();
    connection
        .execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION + 1))
        .unwrap();
    drop(connection);

    match Database::new(temp_file.path()) {
        Err(PlannerError::Configuration { message }) => assert!(message.contains("newer")),
        Err(other) => panic!("Expected configuration error, got {other:?}"),
        Ok(_) => panic!("Expected configuration error"),
    }
}
