//! Task and comment queries.

use std::collections::HashMap;

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Comment, Task, TaskPriority, TaskStatus},
};

const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const NEXT_TASK_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(task_order), 0) + 1 FROM tasks WHERE plan_id = ?1";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (plan_id, id, task_order, title, description, depends_on, estimated_days, status, priority, progress, assignee, labels) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const INSERT_COMMENT_SQL: &str =
    "INSERT INTO comments (plan_id, task_id, author, text, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const TASK_COLUMNS: &str = "id, task_order, title, description, depends_on, estimated_days, status, priority, progress, assignee, labels";
const SELECT_COMMENTS_BY_PLAN_SQL: &str =
    "SELECT task_id, author, text, created_at FROM comments WHERE plan_id = ?1 ORDER BY id";
const SELECT_COMMENTS_BY_TASK_SQL: &str =
    "SELECT task_id, author, text, created_at FROM comments WHERE plan_id = ?1 AND task_id = ?2 ORDER BY id";
const UPDATE_TASK_STATE_SQL: &str =
    "UPDATE tasks SET status = ?1, progress = ?2 WHERE plan_id = ?3 AND id = ?4";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, message.into())
}

fn parse_timestamp(row: &rusqlite::Row, column: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(column)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

/// Writes one task row. `order` overrides `task.order`.
pub(super) fn insert_task(
    connection: &Connection,
    plan_id: u64,
    order: u32,
    task: &Task,
) -> Result<()> {
    let labels = serde_json::to_string(&task.labels)?;

    connection
        .execute(
            INSERT_TASK_SQL,
            params![
                plan_id as i64,
                task.id,
                order,
                task.title,
                task.description,
                task.depends_on,
                task.estimated_days,
                task.status.as_str(),
                task.priority.as_str(),
                task.progress,
                task.assignee,
                labels
            ],
        )
        .db_context("Failed to insert task")?;

    for comment in &task.comments {
        insert_comment(connection, plan_id, &task.id, comment)?;
    }

    Ok(())
}

pub(super) fn insert_comment(
    connection: &Connection,
    plan_id: u64,
    task_id: &str,
    comment: &Comment,
) -> Result<()> {
    connection
        .execute(
            INSERT_COMMENT_SQL,
            params![
                plan_id as i64,
                task_id,
                comment.author,
                comment.text,
                comment.created_at.to_string()
            ],
        )
        .db_context("Failed to insert comment")?;
    Ok(())
}

fn touch_plan(connection: &Connection, plan_id: u64) -> Result<()> {
    connection
        .execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), plan_id as i64],
        )
        .db_context("Failed to update plan timestamp")?;
    Ok(())
}

impl super::Database {
    /// Builds a task (without comments) from a row selected with
    /// `TASK_COLUMNS`.
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let status_str: String = row.get(6)?;
        let status = status_str
            .parse::<TaskStatus>()
            .map_err(|_| conversion_error(6, format!("Invalid status: {status_str}")))?;

        let priority_str: String = row.get(7)?;
        let priority = priority_str
            .parse::<TaskPriority>()
            .map_err(|reason| conversion_error(7, reason))?;

        let labels_str: String = row.get(10)?;
        let labels: Vec<String> = serde_json::from_str(&labels_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e)))?;

        Ok(Task {
            id: row.get(0)?,
            order: row.get::<_, i64>(1)? as u32,
            title: row.get(2)?,
            description: row.get(3)?,
            depends_on: row.get::<_, Option<i64>>(4)?.map(|order| order as u32),
            estimated_days: row.get::<_, Option<i64>>(5)?.map(|days| days as u32),
            status,
            priority,
            progress: row.get::<_, i64>(8)? as u8,
            assignee: row.get(9)?,
            labels,
            comments: Vec::new(),
        })
    }

    fn build_comment_from_row(row: &rusqlite::Row) -> rusqlite::Result<(String, Comment)> {
        Ok((
            row.get(0)?,
            Comment {
                author: row.get(1)?,
                text: row.get(2)?,
                created_at: parse_timestamp(row, 3)?,
            },
        ))
    }

    /// All tasks of a plan in `order`, comments attached.
    pub fn get_tasks(&self, plan_id: u64) -> Result<Vec<Task>> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE plan_id = ?1 ORDER BY task_order");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let mut tasks: Vec<Task> = stmt
            .query_map(params![plan_id as i64], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;

        let mut stmt = self
            .connection
            .prepare(SELECT_COMMENTS_BY_PLAN_SQL)
            .db_context("Failed to prepare query")?;
        let comments = stmt
            .query_map(params![plan_id as i64], Self::build_comment_from_row)
            .db_context("Failed to query comments")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch comments")?;

        let mut by_task: HashMap<String, Vec<Comment>> = HashMap::new();
        for (task_id, comment) in comments {
            by_task.entry(task_id).or_default().push(comment);
        }
        for task in &mut tasks {
            if let Some(comments) = by_task.remove(&task.id) {
                task.comments = comments;
            }
        }

        Ok(tasks)
    }

    /// One task addressed by its order, comments attached.
    pub fn get_task(&self, plan_id: u64, order: u32) -> Result<Option<Task>> {
        Self::select_task(&self.connection, plan_id, order)
    }

    fn select_task(connection: &Connection, plan_id: u64, order: u32) -> Result<Option<Task>> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE plan_id = ?1 AND task_order = ?2");
        let task = connection
            .query_row(&query, params![plan_id as i64, order], Self::build_task_from_row)
            .optional()
            .db_context("Failed to query task")?;

        let Some(mut task) = task else {
            return Ok(None);
        };

        let mut stmt = connection
            .prepare(SELECT_COMMENTS_BY_TASK_SQL)
            .db_context("Failed to prepare query")?;
        task.comments = stmt
            .query_map(params![plan_id as i64, task.id], Self::build_comment_from_row)
            .db_context("Failed to query comments")?
            .map(|row| row.map(|(_, comment)| comment))
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch comments")?;

        Ok(Some(task))
    }

    /// Appends `task` to the plan, assigning the next free order.
    ///
    /// The task's own `order` is ignored. A dependency on the new task
    /// itself is rejected; a dependency on an order that does not exist is
    /// stored as given.
    pub fn add_task(&mut self, plan_id: u64, task: &Task) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan_exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")?;
        if !plan_exists {
            return Err(PlannerError::PlanNotFound { id: plan_id });
        }

        let order: i64 = tx
            .query_row(NEXT_TASK_ORDER_SQL, params![plan_id as i64], |row| row.get(0))
            .db_context("Failed to get next task order")?;
        let order = order as u32;

        if task.depends_on == Some(order) {
            return Err(PlannerError::invalid_input("depends_on")
                .with_reason(format!("Task {order} cannot depend on itself")));
        }

        insert_task(&tx, plan_id, order, task)?;
        touch_plan(&tx, plan_id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Task {
            order,
            ..task.clone()
        })
    }

    /// Reads a task, applies `change` and persists the resulting board
    /// state (status and progress), all in one write transaction.
    ///
    /// Returns the task before and after the change. Nothing is written
    /// when the board state is unchanged or `change` fails.
    pub fn update_task_state<F>(
        &mut self,
        plan_id: u64,
        order: u32,
        change: F,
    ) -> Result<(Task, Task)>
    where
        F: FnOnce(&Task) -> Result<Task>,
    {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let task = Self::select_task(&tx, plan_id, order)?
            .ok_or(PlannerError::TaskNotFound { plan_id, order })?;
        let updated = change(&task)?;

        if updated.status != task.status || updated.progress != task.progress {
            tx.execute(
                UPDATE_TASK_STATE_SQL,
                params![updated.status.as_str(), updated.progress, plan_id as i64, task.id],
            )
            .db_context("Failed to update task")?;
            touch_plan(&tx, plan_id)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok((task, updated))
    }

    /// Appends one comment to a task's thread.
    pub fn add_comment(&mut self, plan_id: u64, task_id: &str, comment: &Comment) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        insert_comment(&tx, plan_id, task_id, comment)?;
        touch_plan(&tx, plan_id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
