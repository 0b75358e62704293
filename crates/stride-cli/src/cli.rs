//! Command handlers for the `plan`, `task` and `view` subcommands.
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! planner and renders the result's `Display` output. The same `Display`
//! implementations back the MCP tool responses, so both interfaces print
//! identical markdown.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{bail, Context, Result};
use log::debug;
use stride_core::{
    display::TimelineView,
    params::{DeletePlan, Id, TaskCreate, TaskRef, ViewStats, ViewTasks},
    CompletionMap, CreateResult, DeleteResult, ExportFormat, Plan, Planner,
};

use crate::{
    args::{
        ExportPlanArgs, ImportPlanArgs, PlanCommands, TaskCommands, TimelineArgs, ViewCommands,
    },
    renderer::TerminalRenderer,
};

/// Runs one CLI command against a planner.
///
/// The CLI keeps no session state: completion is supplied per invocation
/// with `--done`, so every view starts from an empty completion map.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self
                    .planner
                    .create_plan(&args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::Import(args) => self.import_plan(args).await,
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => {
                let params = Id::from(args);
                let plan = self
                    .planner
                    .get_plan(&params)
                    .await
                    .context("Failed to get plan")?;
                match plan {
                    Some(plan) => self.renderer.render(&plan.to_string()),
                    None => bail!("Plan with ID {} not found", params.id),
                }
            }
            PlanCommands::Delete(args) => {
                let plan = self
                    .planner
                    .delete_plan(&DeletePlan::from(args))
                    .await
                    .context("Failed to delete plan")?;
                self.renderer.render(&DeleteResult::new(plan).to_string())
            }
            PlanCommands::Export(args) => self.export_plan(args).await,
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let params = TaskCreate::from(args);
                let task = self
                    .planner
                    .add_task(&params)
                    .await
                    .with_context(|| format!("Failed to add task to plan {}", params.plan_id))?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::Show(args) => {
                let params = TaskRef::from(args);
                let task = self
                    .planner
                    .get_task(&params)
                    .await
                    .context("Failed to get task")?;
                self.renderer.render(&task.to_string())
            }
            TaskCommands::Status(args) => {
                let result = self
                    .planner
                    .set_status(&args.into())
                    .await
                    .context("Failed to update task status")?;
                self.renderer.render(&result.to_string())
            }
            TaskCommands::Progress(args) => {
                let result = self
                    .planner
                    .set_progress(&args.into())
                    .await
                    .context("Failed to update task progress")?;
                self.renderer.render(&result.to_string())
            }
            TaskCommands::Comment(args) => {
                let result = self
                    .planner
                    .add_comment(&args.into())
                    .await
                    .context("Failed to add comment")?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_view_command(&self, command: ViewCommands) -> Result<()> {
        match command {
            ViewCommands::List(args) => {
                let params = ViewTasks::from(args);
                debug!("view list: {params:?}");
                let tasks = self
                    .planner
                    .list_tasks(&params, &CompletionMap::new())
                    .await
                    .context("Failed to list tasks")?;
                self.renderer.render(&tasks.to_string())
            }
            ViewCommands::Timeline(args) => self.timeline(args).await,
            ViewCommands::Stats(args) => {
                let stats = self
                    .planner
                    .stats(&ViewStats::from(args), &CompletionMap::new())
                    .await
                    .context("Failed to compute statistics")?;
                self.renderer.render(&stats.to_string())
            }
            ViewCommands::Board(args) => {
                let board = self
                    .planner
                    .board(&args.into())
                    .await
                    .context("Failed to build board")?;
                self.renderer.render(&board.to_string())
            }
        }
    }

    /// Renders the plan history; also the default command.
    pub async fn list_plans(&self) -> Result<()> {
        let summaries = self
            .planner
            .list_plans()
            .await
            .context("Failed to list plans")?;
        self.renderer.render(&summaries.to_string())
    }

    async fn import_plan(&self, args: ImportPlanArgs) -> Result<()> {
        let document = read_document(&args.file)?;
        let plan: Plan = serde_json::from_str(&document)
            .with_context(|| format!("Invalid plan document {}", args.file.display()))?;

        let plan = self
            .planner
            .import_plan(&plan)
            .await
            .context("Failed to import plan")?;
        self.renderer.render(&CreateResult::new(plan).to_string())
    }

    async fn export_plan(&self, args: ExportPlanArgs) -> Result<()> {
        let format = ExportFormat::from(args.format);
        let exported = self
            .planner
            .export_plan(&Id { id: args.id }, format)
            .await
            .context("Failed to export plan")?;

        match args.output {
            Some(path) => {
                fs::write(&path, &exported)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Exported plan {} to {}", args.id, path.display());
                Ok(())
            }
            // Verbatim: exports are not markdown.
            None => {
                println!("{}", exported.trim_end());
                Ok(())
            }
        }
    }

    async fn timeline(&self, args: TimelineArgs) -> Result<()> {
        let timeline = self
            .planner
            .timeline(&Id { id: args.plan_id })
            .await
            .context("Failed to build timeline")?;

        let view = match args.start {
            Some(start) => TimelineView::new(&timeline).starting(start),
            None => TimelineView::new(&timeline),
        };
        self.renderer.render(&view.to_string())
    }
}

fn read_document(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut document = String::new();
        io::stdin()
            .read_to_string(&mut document)
            .context("Failed to read plan from stdin")?;
        return Ok(document);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
