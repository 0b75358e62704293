//! Core library for the Stride task planner.
//!
//! A plan is a goal broken down into ordered tasks. This crate turns such a
//! task list into the views a planner needs and keeps a history of plans:
//!
//! - [`pipeline`]: search, category filter and sort for list views
//! - [`schedule`]: sequential timeline with week and duration buckets
//! - [`stats`]: completion and duration statistics
//! - [`board`]: Kanban status, progress and comment mutations
//! - [`db`] and [`planner`]: SQLite plan store behind an async facade
//! - [`display`]: markdown rendering and export formats
//!
//! The engine modules are pure functions over `&[Task]`; they never touch
//! the store and tolerate missing or dangling optional fields.
//!
//! # Quick Start
//!
//! ```rust
//! use stride_core::{
//!     models::{CompletionMap, Plan},
//!     schedule, stats,
//! };
//!
//! let plan: Plan = serde_json::from_str(r#"{
//!     "goal": { "text": "Host a dinner party" },
//!     "tasks": [
//!         { "order": 1, "title": "Plan menu", "estimatedDays": 2 },
//!         { "order": 2, "title": "Buy groceries", "dependsOn": 1, "estimatedDays": 3 },
//!         { "order": 3, "title": "Cook", "dependsOn": 2 }
//!     ]
//! }"#).unwrap();
//!
//! let timeline = schedule::build(&plan.tasks);
//! assert_eq!(timeline.total_days, 6);
//!
//! let summary = stats::aggregate(&plan.tasks, &CompletionMap::new());
//! assert_eq!(summary.total_days, 5);
//! assert_eq!(summary.with_dependencies, 2);
//! ```

pub mod board;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod pipeline;
pub mod planner;
pub mod schedule;
pub mod stats;

pub use board::Board;
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, ExportFormat, OperationStatus, PlanSummaries, Tasks,
    TimelineView, UpdateResult,
};
pub use error::{PlannerError, Result};
pub use models::{CompletionMap, Goal, Plan, PlanSummary, Task, TaskPriority, TaskStatus};
pub use pipeline::{Category, FilterOptions, SortKey};
pub use planner::{Planner, PlannerBuilder};
pub use schedule::Timeline;
pub use stats::Stats;
