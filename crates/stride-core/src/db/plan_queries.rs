//! Plan history queries.

use std::collections::HashSet;

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, types::Type, OptionalExtension};

use super::task_queries::insert_task;
use crate::{
    board,
    error::{DatabaseResultExt, PlannerError, Result},
    models::{new_task_id, validate, Goal, Plan, PlanSummary, MAX_GOAL_LENGTH},
};

const INSERT_PLAN_SQL: &str =
    "INSERT INTO plans (goal, created_at, updated_at) VALUES (?1, ?2, ?3)";
const SELECT_PLAN_SQL: &str = "SELECT id, goal, created_at FROM plans WHERE id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";
const SELECT_PLAN_SUMMARIES_SQL: &str = "SELECT id, goal, created_at, total_tasks, done_tasks, total_days FROM plan_summaries ORDER BY created_at DESC, id DESC";

fn parse_created_at(row: &rusqlite::Row) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(2)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))
}

impl super::Database {
    /// Creates an empty plan for `goal`.
    pub fn create_plan(&mut self, goal: &str) -> Result<Plan> {
        self.import_plan(&Plan::new(Goal::new(goal), Vec::new()))
    }

    /// Stores a decomposed plan and returns it with its new ID.
    ///
    /// Tasks without an id, or with an id already used earlier in the same
    /// plan, receive a fresh one. Progress above 100 is clamped. Duplicate orders, self-dependencies and
    /// dependency cycles are rejected; dependencies on missing orders are
    /// only logged.
    pub fn import_plan(&mut self, plan: &Plan) -> Result<Plan> {
        if plan.goal.text.trim().is_empty() {
            return Err(PlannerError::invalid_input("goal").with_reason("Goal cannot be empty"));
        }
        if plan.goal.text.chars().count() > MAX_GOAL_LENGTH {
            return Err(PlannerError::invalid_input("goal").with_reason(format!(
                "Goal cannot be longer than {MAX_GOAL_LENGTH} characters"
            )));
        }

        let (fatal, warnings): (Vec<_>, Vec<_>) =
            validate(&plan.tasks).into_iter().partition(|issue| issue.is_fatal());
        for issue in &warnings {
            warn!("importing plan '{}': {issue}", plan.goal.text);
        }
        if !fatal.is_empty() {
            let reason = fatal
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PlannerError::invalid_input("tasks").with_reason(reason));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let created_at = plan.goal.created_at.to_string();
        let now = Timestamp::now().to_string();
        tx.execute(INSERT_PLAN_SQL, params![plan.goal.text, created_at, now])
            .db_context("Failed to insert plan")?;
        let id = tx.last_insert_rowid() as u64;

        let mut seen_ids = HashSet::new();
        for task in &plan.tasks {
            let mut task = board::set_progress(task, i64::from(task.progress));
            if task.id.is_empty() || !seen_ids.insert(task.id.clone()) {
                task.id = new_task_id();
                seen_ids.insert(task.id.clone());
            }
            insert_task(&tx, id, task.order, &task)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_plan(id)?.ok_or(PlannerError::PlanNotFound { id })
    }

    /// Retrieves a plan with all its tasks and comments.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        let plan = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], |row| {
                Ok(Plan {
                    id: row.get::<_, i64>(0)? as u64,
                    goal: Goal {
                        text: row.get(1)?,
                        created_at: parse_created_at(row)?,
                    },
                    tasks: Vec::new(),
                })
            })
            .optional()
            .db_context("Failed to query plan")?;

        let Some(mut plan) = plan else {
            return Ok(None);
        };
        plan.tasks = self.get_tasks(plan.id)?;
        Ok(Some(plan))
    }

    /// Plan history, newest first.
    pub fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(PlanSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    goal: Goal {
                        text: row.get(1)?,
                        created_at: parse_created_at(row)?,
                    },
                    total_tasks: row.get::<_, i64>(3)? as u32,
                    done_tasks: row.get::<_, i64>(4)? as u32,
                    total_days: u32::try_from(row.get::<_, i64>(5)?).unwrap_or(u32::MAX),
                })
            })
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;

        Ok(summaries)
    }

    /// Permanently deletes a plan together with its tasks and comments.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")?;
        if !exists {
            return Err(PlannerError::PlanNotFound { id });
        }

        tx.execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
