//! Parameter structures for Stride operations
//!
//! These structures are shared by every interface (CLI, MCP server) so that
//! the planner only ever sees one shape per operation. Interface layers wrap
//! them with their own framework derives and convert via `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP tools     │
//! │  (clap derives) │    │ Parameters<T>   │
//! └────────┬────────┘    └────────┬────────┘
//!          └──────────┬───────────┘
//!                     ▼
//!            ┌─────────────────┐
//!            │  Core Params    │
//!            │ (serde, schema) │
//!            └─────────────────┘
//! ```
//!
//! JSON schema generation is gated behind the `schema` feature so the core
//! stays free of schemars unless an interface asks for it.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    models::{Goal, Plan, Task, TaskPriority},
    pipeline::FilterOptions,
    PlannerError, Result,
};

/// Generic parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: u64,
}

/// Parameters for creating an empty plan from a goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Free-text goal the plan works towards
    pub goal: String,
}

/// Parameters for storing a decomposed goal.
///
/// Mirrors the document a goal-decomposition service returns: the goal text
/// and its task list. Missing task ids are generated on import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ImportPlan {
    /// Goal the tasks were derived from
    pub goal: String,
    /// Tasks, each with at least `order` and `title`
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl From<ImportPlan> for Plan {
    fn from(params: ImportPlan) -> Self {
        Plan::new(Goal::new(params.goal), params.tasks)
    }
}

/// Parameters for deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlan {
    /// ID of the plan to delete
    pub id: u64,
    /// Deletion is refused unless this is set
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for appending a task to a stored plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskCreate {
    /// ID of the plan to add the task to
    pub plan_id: u64,
    /// Title of the task (required)
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Order of the predecessor task
    pub depends_on: Option<u32>,
    /// Estimated effort in whole days
    pub estimated_days: Option<u32>,
    /// LOW, MEDIUM, HIGH or URGENT
    pub priority: Option<String>,
    /// Person responsible for the task
    pub assignee: Option<String>,
    /// Free-form labels
    #[serde(default)]
    pub labels: Vec<String>,
}

impl TaskCreate {
    /// Parses the optional priority, defaulting to MEDIUM.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the title is blank
    /// * `PlannerError::InvalidInput` - When the priority is not recognised
    pub fn validate(&self) -> Result<TaskPriority> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::invalid_input("title").with_reason("Title cannot be empty"));
        }

        match &self.priority {
            Some(priority) => priority
                .parse()
                .map_err(|reason: String| PlannerError::invalid_input("priority").with_reason(reason)),
            None => Ok(TaskPriority::default()),
        }
    }
}

/// Addresses one task by plan ID and order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskRef {
    /// ID of the plan owning the task
    pub plan_id: u64,
    /// Order of the task within the plan
    pub order: u32,
}

/// Parameters for moving a task to another board column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetStatus {
    #[serde(flatten)]
    pub task: TaskRef,
    /// TODO, IN_PROGRESS, IN_REVIEW, DONE or BLOCKED
    pub status: String,
}

/// Parameters for setting a task's progress percentage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetProgress {
    #[serde(flatten)]
    pub task: TaskRef,
    /// Percentage, clamped into 0..=100
    pub progress: i64,
}

/// Parameters for appending a comment to a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddComment {
    #[serde(flatten)]
    pub task: TaskRef,
    /// Comment author, "anonymous" when omitted
    pub author: Option<String>,
    /// Comment body; blank text is ignored
    pub text: String,
}

impl AddComment {
    /// Author recorded on the comment.
    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or("anonymous")
    }
}

/// Parameters for a filtered task listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ViewTasks {
    /// ID of the plan to view
    pub plan_id: u64,
    /// Search, category and sort settings
    #[serde(flatten)]
    pub options: FilterOptions,
    /// Orders of tasks ticked off in this session
    #[serde(default)]
    pub done: Vec<u32>,
}

/// Parameters for plan statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ViewStats {
    /// ID of the plan to summarise
    pub plan_id: u64,
    /// Orders of tasks ticked off in this session
    #[serde(default)]
    pub done: Vec<u32>,
}

/// Parameters for ticking a task off (or back on) in the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetCompletion {
    #[serde(flatten)]
    pub task: TaskRef,
    /// Whether the task counts as completed
    pub completed: bool,
}
