//! Display formatting for models, derived views and exports.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections, operation results and the derived views get newtype wrappers
//! so that the same data can be shown differently per context.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers, Views │    │   Markdown /    │
//! │  (Plan, Task)   │───▶│   & Exports     │───▶│   plain text    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Everything except [`export`] produces markdown for the terminal renderer
//! and the MCP server.
//!
//! - [`collections`]: `PlanSummaries`, `Tasks`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`views`]: timeline, statistics and board
//! - [`export`]: JSON, text report and brief clipboard formats
//! - [`datetime`]: timestamp and date helpers

pub mod collections;
pub mod datetime;
pub mod export;
pub mod models;
pub mod results;
pub mod status;
pub mod views;

pub use collections::{PlanSummaries, Tasks};
pub use datetime::{Days, LocalDateTime, ShortDate};
pub use export::{export, BriefExport, ExportFormat, TextExport};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
pub use views::TimelineView;
