//! Data models for goals, plans and tasks.
//!
//! This module contains the record shapes every engine component works on.
//! The models carry no scheduling or filtering behavior of their own; the
//! consuming components in [`crate::pipeline`], [`crate::schedule`],
//! [`crate::stats`] and [`crate::board`] tolerate missing optional fields and
//! substitute the documented defaults. Display implementations live in
//! [`crate::display::models`].
//!
//! # Wire Format
//!
//! Models serialize with camelCase field names so that plans produced by a
//! goal-decomposition service can be imported directly:
//!
//! ```rust
//! use stride_core::models::{Plan, TaskStatus};
//!
//! let json = r#"{
//!     "goal": { "text": "Launch a blog", "createdAt": "2024-01-01T00:00:00Z" },
//!     "tasks": [
//!         { "order": 1, "title": "Pick a platform", "estimatedDays": 1 },
//!         { "order": 2, "title": "Write first post", "dependsOn": 1 }
//!     ]
//! }"#;
//!
//! let plan: Plan = serde_json::from_str(json).unwrap();
//! assert_eq!(plan.tasks.len(), 2);
//! assert_eq!(plan.tasks[1].depends_on, Some(1));
//! assert_eq!(plan.tasks[1].status, TaskStatus::Todo);
//! ```

pub mod completion;
pub mod plan;
pub mod status;
pub mod summary;
pub mod task;
pub mod validation;

#[cfg(test)]
mod tests;

pub use completion::CompletionMap;
pub use plan::{Goal, Plan, MAX_GOAL_LENGTH};
pub use status::{TaskPriority, TaskStatus};
pub use summary::PlanSummary;
pub use task::{new_task_id, total_estimate, Comment, Task};
pub use validation::{validate, PlanIssue};
