//! Command-line argument definitions using clap's derive API.
//!
//! Each command has its own `*Args` struct carrying the clap attributes, plus
//! a `From` conversion into the matching core parameter type:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! Core parameter types stay free of clap; help text, aliases and value
//! delimiters live here.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use stride_core::{
    params::{
        AddComment, CreatePlan, DeletePlan, Id, SetProgress, SetStatus, TaskCreate, TaskRef,
        ViewStats, ViewTasks,
    },
    Category, ExportFormat, FilterOptions, SortKey,
};

/// Stride turns goals into ordered task plans
///
/// Plans are imported from a goal-decomposition service (or created by hand),
/// stored locally, and viewed as a filtered list, a week-by-week timeline,
/// statistics or a Kanban board. `stride serve` exposes the same operations
/// to AI assistants over MCP (Model Context Protocol).
#[derive(Parser)]
#[command(version, about, name = "stride")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stride/stride.db
    #[arg(long, global = true, env = "STRIDE_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage tasks within plans
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Derived views over a plan's tasks
    #[command(alias = "v")]
    View {
        #[command(subcommand)]
        command: ViewCommands,
    },
    /// Start the MCP server on stdio
    Serve,
}

// ============================================================================
// Plan commands
// ============================================================================

/// Create an empty plan for a goal
#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Free-text goal the plan works towards
    pub goal: String,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan { goal: val.goal }
    }
}

/// Import a decomposed plan from a JSON document
///
/// The document has the shape `{"goal": {"text": ...}, "tasks": [...]}` as
/// returned by the goal-decomposition service. Use `-` to read stdin.
#[derive(ClapArgs)]
pub struct ImportPlanArgs {
    #[arg(help = "Path to the plan JSON document, or - for stdin")]
    pub file: PathBuf,
}

#[derive(ClapArgs)]
pub struct PlanIdArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub id: u64,
}

impl From<PlanIdArgs> for Id {
    fn from(val: PlanIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a plan permanently
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    #[arg(help = "Unique identifier of the plan to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Export a plan as JSON, a text report or brief clipboard text
#[derive(ClapArgs)]
pub struct ExportPlanArgs {
    #[arg(help = "Unique identifier of the plan to export")]
    pub id: u64,
    #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
    pub format: FormatArg,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create an empty plan for a goal
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// Import a decomposed plan from JSON
    #[command(alias = "i")]
    Import(ImportPlanArgs),
    /// List the plan history, newest first
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan with all its tasks
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Export a plan
    #[command(alias = "e")]
    Export(ExportPlanArgs),
}

// ============================================================================
// Task commands
// ============================================================================

/// Append a task to a plan
#[derive(ClapArgs)]
pub struct AddTaskArgs {
    #[arg(help = "Unique identifier of the plan to add this task to")]
    pub plan_id: u64,
    /// Title of the task
    pub title: String,
    #[arg(short, long, help = "Optional detailed description")]
    pub description: Option<String>,
    #[arg(long, help = "Estimated effort in whole days")]
    pub days: Option<u32>,
    #[arg(long, help = "Order of the task this one depends on")]
    pub depends_on: Option<u32>,
    #[arg(short, long, help = "Priority: low, medium, high or urgent")]
    pub priority: Option<String>,
    #[arg(short, long, help = "Person responsible for the task")]
    pub assignee: Option<String>,
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Labels as comma-separated list"
    )]
    pub labels: Vec<String>,
}

impl From<AddTaskArgs> for TaskCreate {
    fn from(val: AddTaskArgs) -> Self {
        TaskCreate {
            plan_id: val.plan_id,
            title: val.title,
            description: val.description,
            depends_on: val.depends_on,
            estimated_days: val.days,
            priority: val.priority,
            assignee: val.assignee,
            labels: val.labels,
        }
    }
}

#[derive(ClapArgs)]
pub struct TaskRefArgs {
    #[arg(help = "Unique identifier of the plan owning the task")]
    pub plan_id: u64,
    #[arg(help = "Order of the task within the plan")]
    pub order: u32,
}

impl From<TaskRefArgs> for TaskRef {
    fn from(val: TaskRefArgs) -> Self {
        TaskRef {
            plan_id: val.plan_id,
            order: val.order,
        }
    }
}

/// Move a task to another board column
#[derive(ClapArgs)]
pub struct SetStatusArgs {
    #[command(flatten)]
    pub task: TaskRefArgs,
    #[arg(help = "todo, in_progress, in_review, done or blocked (any case)")]
    pub status: String,
}

impl From<SetStatusArgs> for SetStatus {
    fn from(val: SetStatusArgs) -> Self {
        SetStatus {
            task: val.task.into(),
            status: val.status,
        }
    }
}

/// Set a task's progress percentage
#[derive(ClapArgs)]
pub struct SetProgressArgs {
    #[command(flatten)]
    pub task: TaskRefArgs,
    #[arg(
        allow_negative_numbers = true,
        help = "Percentage; values outside 0-100 are clamped"
    )]
    pub progress: i64,
}

impl From<SetProgressArgs> for SetProgress {
    fn from(val: SetProgressArgs) -> Self {
        SetProgress {
            task: val.task.into(),
            progress: val.progress,
        }
    }
}

/// Append a comment to a task
#[derive(ClapArgs)]
pub struct AddCommentArgs {
    #[command(flatten)]
    pub task: TaskRefArgs,
    /// Comment text
    pub text: String,
    #[arg(long, help = "Comment author (defaults to anonymous)")]
    pub author: Option<String>,
}

impl From<AddCommentArgs> for AddComment {
    fn from(val: AddCommentArgs) -> Self {
        AddComment {
            task: val.task.into(),
            author: val.author,
            text: val.text,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Append a task to a plan
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Show one task with its comments
    #[command(alias = "s")]
    Show(TaskRefArgs),
    /// Move a task to another board column
    #[command(alias = "st")]
    Status(SetStatusArgs),
    /// Set a task's progress percentage
    #[command(alias = "p")]
    Progress(SetProgressArgs),
    /// Append a comment to a task
    #[command(alias = "c")]
    Comment(AddCommentArgs),
}

// ============================================================================
// View commands
// ============================================================================

/// List tasks with search, category filter and sort
#[derive(ClapArgs)]
pub struct ListTasksArgs {
    #[arg(help = "Unique identifier of the plan to view")]
    pub plan_id: u64,
    #[arg(short, long, help = "Case-insensitive text search")]
    pub search: Option<String>,
    #[arg(short, long, value_enum, default_value_t = CategoryArg::All)]
    pub filter: CategoryArg,
    #[arg(long, value_enum, default_value_t = SortArg::Order)]
    pub sort: SortArg,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Orders of tasks to count as completed, comma-separated"
    )]
    pub done: Vec<u32>,
}

impl From<ListTasksArgs> for ViewTasks {
    fn from(val: ListTasksArgs) -> Self {
        ViewTasks {
            plan_id: val.plan_id,
            options: FilterOptions {
                search: val.search.unwrap_or_default(),
                category: val.filter.into(),
                sort: val.sort.into(),
            },
            done: val.done,
        }
    }
}

/// Show the sequential timeline grouped by week
#[derive(ClapArgs)]
pub struct TimelineArgs {
    #[arg(help = "Unique identifier of the plan to schedule")]
    pub plan_id: u64,
    #[arg(long, help = "Start date (YYYY-MM-DD) to show calendar dates")]
    pub start: Option<Date>,
}

/// Show completion and duration statistics
#[derive(ClapArgs)]
pub struct StatsArgs {
    #[arg(help = "Unique identifier of the plan to summarise")]
    pub plan_id: u64,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Orders of tasks to count as completed, comma-separated"
    )]
    pub done: Vec<u32>,
}

impl From<StatsArgs> for ViewStats {
    fn from(val: StatsArgs) -> Self {
        ViewStats {
            plan_id: val.plan_id,
            done: val.done,
        }
    }
}

#[derive(Subcommand)]
pub enum ViewCommands {
    /// List tasks with search, filter and sort
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Show the week-by-week timeline
    #[command(alias = "t")]
    Timeline(TimelineArgs),
    /// Show plan statistics
    #[command(alias = "s")]
    Stats(StatsArgs),
    /// Show the Kanban board
    #[command(alias = "b")]
    Board(PlanIdArgs),
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    All,
    Completed,
    Pending,
    Independent,
    Dependent,
    /// Estimate of at most two days
    Quick,
}

impl From<CategoryArg> for Category {
    fn from(val: CategoryArg) -> Self {
        match val {
            CategoryArg::All => Category::All,
            CategoryArg::Completed => Category::Completed,
            CategoryArg::Pending => Category::Pending,
            CategoryArg::Independent => Category::Independent,
            CategoryArg::Dependent => Category::Dependent,
            CategoryArg::Quick => Category::Quick,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Order,
    DurationAsc,
    DurationDesc,
    Title,
}

impl From<SortArg> for SortKey {
    fn from(val: SortArg) -> Self {
        match val {
            SortArg::Order => SortKey::Order,
            SortArg::DurationAsc => SortKey::DurationAsc,
            SortArg::DurationDesc => SortKey::DurationDesc,
            SortArg::Title => SortKey::Title,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Pretty-printed plan JSON
    Json,
    /// Plain-text report
    Text,
    /// Short summary for pasting elsewhere
    #[value(alias = "clipboard")]
    Brief,
}

impl From<FormatArg> for ExportFormat {
    fn from(val: FormatArg) -> Self {
        match val {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Text => ExportFormat::Text,
            FormatArg::Brief => ExportFormat::Brief,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_status_is_passed_through_for_core_parsing() {
        let args = Args::parse_from(["stride", "task", "status", "1", "2", "in-review"]);
        let Some(Commands::Task {
            command: TaskCommands::Status(status),
        }) = args.command
        else {
            panic!("Expected task status command");
        };

        let params = SetStatus::from(status);
        assert_eq!(params.status, "in-review");
        assert_eq!(params.task.order, 2);
    }

    #[test]
    fn test_list_args_parse_into_filter_options() {
        let args = Args::parse_from([
            "stride", "view", "list", "3", "--filter", "quick", "--sort", "duration-desc",
            "--done", "1,2",
        ]);
        let Some(Commands::View {
            command: ViewCommands::List(list),
        }) = args.command
        else {
            panic!("Expected view list command");
        };

        let params = ViewTasks::from(list);
        assert_eq!(params.plan_id, 3);
        assert_eq!(params.options.category, Category::Quick);
        assert_eq!(params.options.sort, SortKey::DurationDesc);
        assert_eq!(params.done, vec![1, 2]);
    }

    #[test]
    fn test_negative_progress_is_accepted() {
        let args = Args::parse_from(["stride", "task", "progress", "1", "1", "-5"]);
        assert!(matches!(
            args.command,
            Some(Commands::Task {
                command: TaskCommands::Progress(SetProgressArgs { progress: -5, .. })
            })
        ));
    }
}
