//! Task model definition and related functionality.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{TaskPriority, TaskStatus};

/// Represents one unit of work within a plan.
///
/// Optional fields fall back to their defaults on deserialization so that
/// task lists produced by an external goal-decomposition service can be
/// consumed as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable unique identifier, never reused
    #[serde(default, alias = "_id")]
    pub id: String,

    /// Position in the canonical sequence, also the dependency reference key
    pub order: u32,

    /// Brief title/summary of the task
    pub title: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Order of the single predecessor, if any
    #[serde(default)]
    pub depends_on: Option<u32>,

    /// Estimated effort in whole days (0 means no estimate)
    #[serde(default)]
    pub estimated_days: Option<u32>,

    /// Board column
    #[serde(default)]
    pub status: TaskStatus,

    /// Stored priority
    #[serde(default)]
    pub priority: TaskPriority,

    /// Completion percentage in `[0, 100]`
    #[serde(default)]
    pub progress: u8,

    /// Person responsible for the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Free-form labels, stored in full
    #[serde(default)]
    pub labels: Vec<String>,

    /// Append-only discussion thread
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Task {
    /// Creates a root task with a fresh identifier and default board state.
    pub fn new(order: u32, title: impl Into<String>) -> Self {
        Self {
            id: new_task_id(),
            order,
            title: title.into(),
            description: String::new(),
            depends_on: None,
            estimated_days: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            progress: 0,
            assignee: None,
            labels: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// The estimate in days, with an explicit 0 treated the same as a
    /// missing one.
    pub fn estimate(&self) -> Option<u32> {
        self.estimated_days.filter(|days| *days > 0)
    }
}

/// Sum of the estimates of `tasks`, missing ones counting as 0.
///
/// Saturates at `u32::MAX` like the schedule's running day counter.
pub fn total_estimate<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> u32 {
    tasks
        .into_iter()
        .filter_map(Task::estimate)
        .fold(0, u32::saturating_add)
}

/// A single comment left on a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: String,
    pub text: String,
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub created_at: Timestamp,
}

/// Generates an opaque task identifier.
pub fn new_task_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
