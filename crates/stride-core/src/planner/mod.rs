//! Async planner facade over the plan store.
//!
//! The [`Planner`] is what the CLI and the MCP server talk to. It owns no
//! connection; every operation opens the SQLite database on a blocking
//! thread, does its work inside a transaction and closes it again.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI / MCP     │    │     Planner     │    │    Database     │
//! │   (params)      │───▶│ plan_ops,       │───▶│   (via db/)     │
//! │                 │    │ task_ops, views │    │                 │
//! └─────────────────┘    └────────┬────────┘    └─────────────────┘
//!                                 │
//!                                 ▼
//!                  pipeline, schedule, stats, board
//! ```
//!
//! Board mutations load the stored task, run the pure function from
//! [`crate::board`] and persist whatever it returns. Views load the plan and
//! run the read-only engines over it; the completion map is supplied by the
//! caller and never stored.
//!
//! # Example
//!
//! ```rust,no_run
//! use stride_core::{params::CreatePlan, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/stride.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         goal: "Learn to juggle".to_string(),
//!     })
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{PlannerError, Result},
};

pub mod builder;
pub mod plan_ops;
pub mod task_ops;
pub mod views;


pub use builder::PlannerBuilder;

/// Main planner interface for managing plans and tasks.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Location of the database file this planner works on.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `operation` against a freshly opened database on the blocking
    /// thread pool.
    pub(crate) async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(PlannerError::join)?
    }
}
