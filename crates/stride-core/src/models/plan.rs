//! Plan and goal model definitions.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Task;

/// Longest goal text accepted by the plan store, in characters.
pub const MAX_GOAL_LENGTH: usize = 1000;

/// The free-text goal a plan was derived from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// What the user wants to achieve
    pub text: String,

    /// Timestamp when the goal was submitted (UTC)
    #[serde(default = "Timestamp::now")]
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub created_at: Timestamp,
}

impl Goal {
    /// Creates a goal stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: Timestamp::now(),
        }
    }
}

/// A goal plus its ordered task list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Plan {
    /// Identifier assigned by the plan store (0 until stored)
    #[serde(default)]
    pub id: u64,

    /// Goal the tasks work towards
    pub goal: Goal,

    /// Tasks in storage order; use [`Plan::tasks_in_order`] for the
    /// canonical sequence
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Plan {
    /// Creates an unsaved plan for the given goal.
    pub fn new(goal: Goal, tasks: Vec<Task>) -> Self {
        Self { id: 0, goal, tasks }
    }

    /// Tasks stably sorted by `order`.
    pub fn tasks_in_order(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by_key(|task| task.order);
        tasks
    }

    /// Looks up a task by its order number.
    pub fn task_by_order(&self, order: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.order == order)
    }
}
