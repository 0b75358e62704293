//! Status and priority enumerations for tasks.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Board column a task currently sits in.
///
/// The set of statuses is closed but the transition graph is flat: any
/// status may move to any other, including reopening a `Done` task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    Todo,

    /// Being worked on
    InProgress,

    /// Waiting for review
    InReview,

    /// Finished
    Done,

    /// Cannot proceed
    Blocked,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
        TaskStatus::Blocked,
    ];

    /// Canonical wire and database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::InReview => "IN_REVIEW",
            TaskStatus::Done => "DONE",
            TaskStatus::Blocked => "BLOCKED",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stride_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Todo.with_icon(), "📋 To Do");
    /// assert_eq!(TaskStatus::Done.with_icon(), "✅ Done");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "📋 To Do",
            TaskStatus::InProgress => "🚀 In Progress",
            TaskStatus::InReview => "👀 In Review",
            TaskStatus::Done => "✅ Done",
            TaskStatus::Blocked => "🚫 Blocked",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = PlannerError;

    /// Parses a status name case-insensitively. `IN_PROGRESS`, `in-progress`
    /// and `inprogress` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "TODO" => Ok(TaskStatus::Todo),
            "INPROGRESS" => Ok(TaskStatus::InProgress),
            "INREVIEW" => Ok(TaskStatus::InReview),
            "DONE" => Ok(TaskStatus::Done),
            "BLOCKED" => Ok(TaskStatus::Blocked),
            _ => Err(PlannerError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// Stored priority of a task.
///
/// Unrelated to the derived priority badge computed by
/// [`crate::pipeline::priority_badge`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Canonical wire and database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
            TaskPriority::Urgent => "URGENT",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(TaskPriority::Low),
            "MEDIUM" => Ok(TaskPriority::Medium),
            "HIGH" => Ok(TaskPriority::High),
            "URGENT" => Ok(TaskPriority::Urgent),
            _ => Err(format!("Invalid task priority: {s}")),
        }
    }
}
