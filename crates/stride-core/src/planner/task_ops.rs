//! Task operations and board mutations for the Planner.

use log::info;

use super::Planner;
use crate::{
    board,
    db::Database,
    display::UpdateResult,
    error::{PlannerError, Result},
    models::Task,
    params::{AddComment, SetProgress, SetStatus, TaskCreate, TaskRef},
};

fn load_task(db: &Database, plan_id: u64, order: u32) -> Result<Task> {
    db.get_task(plan_id, order)?
        .ok_or(PlannerError::TaskNotFound { plan_id, order })
}

impl Planner {
    /// Appends a task to a stored plan with the next free order.
    pub async fn add_task(&self, params: &TaskCreate) -> Result<Task> {
        let priority = params.validate()?;
        let plan_id = params.plan_id;
        let task = Task {
            description: params.description.clone().unwrap_or_default(),
            depends_on: params.depends_on,
            estimated_days: params.estimated_days,
            priority,
            assignee: params.assignee.clone(),
            labels: params.labels.clone(),
            ..Task::new(0, params.title.trim())
        };

        let task = self
            .with_database(move |db| db.add_task(plan_id, &task))
            .await?;
        info!("added task {} to plan {plan_id}", task.order);
        Ok(task)
    }

    /// Retrieves one task with its comments.
    pub async fn get_task(&self, params: &TaskRef) -> Result<Task> {
        let TaskRef { plan_id, order } = *params;
        self.with_database(move |db| load_task(db, plan_id, order))
            .await
    }

    /// Moves a task to another board column.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidStatus` - When the status names no column
    /// * `PlannerError::TaskNotFound` - When the task does not exist
    pub async fn set_status(&self, params: &SetStatus) -> Result<UpdateResult<Task>> {
        let TaskRef { plan_id, order } = params.task;
        let status = params.status.clone();

        self.with_database(move |db| {
            let (task, updated) =
                db.update_task_state(plan_id, order, |task| board::set_status(task, &status))?;

            let mut changes = Vec::new();
            if updated.status != task.status {
                changes.push(format!("Status: {} -> {}", task.status, updated.status));
            }
            Ok(UpdateResult::with_changes(updated, changes))
        })
        .await
    }

    /// Sets a task's progress, clamped into `0..=100`.
    pub async fn set_progress(&self, params: &SetProgress) -> Result<UpdateResult<Task>> {
        let TaskRef { plan_id, order } = params.task;
        let progress = params.progress;

        self.with_database(move |db| {
            let (task, updated) = db.update_task_state(plan_id, order, |task| {
                Ok(board::set_progress(task, progress))
            })?;

            let mut changes = Vec::new();
            if updated.progress != task.progress {
                changes.push(format!("Progress: {}% -> {}%", task.progress, updated.progress));
            }
            Ok(UpdateResult::with_changes(updated, changes))
        })
        .await
    }

    /// Appends a comment to a task. Blank text leaves the task unchanged.
    pub async fn add_comment(&self, params: &AddComment) -> Result<UpdateResult<Task>> {
        let TaskRef { plan_id, order } = params.task;
        let author = params.author().to_string();
        let text = params.text.clone();

        self.with_database(move |db| {
            let task = load_task(db, plan_id, order)?;
            let updated = board::add_comment(&task, &author, &text);

            let mut changes = Vec::new();
            if let Some(comment) = updated.comments.get(task.comments.len()) {
                db.add_comment(plan_id, &updated.id, comment)?;
                changes.push(format!("Comment added by {}", comment.author));
            }
            Ok(UpdateResult::with_changes(updated, changes))
        })
        .await
    }
}
