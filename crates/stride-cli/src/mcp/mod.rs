//! MCP server implementation for Stride
//!
//! Exposes plan import, the derived views and the board mutations as Model
//! Context Protocol tools over stdio, so an AI assistant can decompose a goal
//! and then track the resulting plan.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use stride_core::Planner;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use errors::to_mcp_error;
pub use handlers::{
    AddComment, Id, ImportPlan, McpResult, SetCompletion, SetProgress, SetStatus, ViewStats,
    ViewTasks,
};
use handlers::{McpHandlers, Session};

const INSTRUCTIONS: &str = r#"Stride stores goals broken down into ordered tasks and derives views from them.

## Core Concepts
- **Plan**: a goal plus an ordered task list, identified by a numeric ID
- **Task**: addressed by plan ID and `order`; has an optional single dependency (`dependsOn`, another task's order), an estimate in whole days, a board status (TODO, IN_PROGRESS, IN_REVIEW, DONE, BLOCKED), progress, assignee, labels and comments
- **Completion**: a per-session checklist, separate from board status and never stored

## Workflow
1. Use the `decompose_goal` prompt, or build the task list yourself, and store it with `import_plan`
2. Review with `show_plan`, `timeline` and `stats`
3. Track work with `set_status`, `set_progress` and `add_comment`; view it with `board`
4. Tick tasks off for this session with `set_completion`; `list_tasks` and `stats` reflect it

## Tool Categories
- **Plans**: import_plan, list_plans, show_plan
- **Views**: list_tasks (search, category, sort), timeline, stats, board
- **Board**: set_status, set_progress, add_comment
- **Session**: set_completion"#;

/// MCP server for Stride
#[derive(Clone)]
pub struct StrideMcpServer {
    session: Arc<Mutex<Session>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl StrideMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new(planner))),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers {
        McpHandlers::new(self.session.clone())
    }

    #[tool(
        name = "import_plan",
        description = "Store a decomposed goal as a new plan. Provide the goal text and the tasks, each with order (1-based), title, and optionally description, dependsOn (order of the prerequisite task), estimatedDays, priority, assignee and labels. Duplicate orders and dependency cycles are rejected. Returns the plan with its new ID."
    )]
    async fn import_plan(&self, params: Parameters<ImportPlan>) -> McpResult {
        self.handlers().import_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List the plan history, newest first, with task counts, done counts and total estimated days."
    )]
    async fn list_plans(&self) -> McpResult {
        self.handlers().list_plans().await
    }

    #[tool(
        name = "show_plan",
        description = "Show a plan with all its tasks in order, including dependencies, estimates, board status, progress and comments."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "list_tasks",
        description = "List a plan's tasks. Optional: search (case-insensitive, title and description), category (all, completed, pending, independent, dependent, quick), sort (order, duration-asc, duration-desc, title) and done (orders to count as completed in addition to this session's completions)."
    )]
    async fn list_tasks(&self, params: Parameters<ViewTasks>) -> McpResult {
        self.handlers().list_tasks(params).await
    }

    #[tool(
        name = "timeline",
        description = "Lay a plan's tasks out back to back in order and group them by week. Tasks without an estimate take one day. Tasks with a dependency are marked critical."
    )]
    async fn timeline(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().timeline(params).await
    }

    #[tool(
        name = "stats",
        description = "Completion and duration statistics for a plan: totals, completion rate, total and average estimated days, and dependency counts. Completion comes from this session plus the optional done orders."
    )]
    async fn stats(&self, params: Parameters<ViewStats>) -> McpResult {
        self.handlers().stats(params).await
    }

    #[tool(
        name = "board",
        description = "Show a plan as a Kanban board with TODO, IN_PROGRESS, IN_REVIEW, DONE and BLOCKED columns."
    )]
    async fn board(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().board(params).await
    }

    #[tool(
        name = "set_status",
        description = "Move a task (plan_id + order) to another board column: TODO, IN_PROGRESS, IN_REVIEW, DONE or BLOCKED (case-insensitive). Any transition is allowed; progress is not changed."
    )]
    async fn set_status(&self, params: Parameters<SetStatus>) -> McpResult {
        self.handlers().set_status(params).await
    }

    #[tool(
        name = "set_progress",
        description = "Set a task's progress percentage (plan_id + order). Values outside 0-100 are clamped; status is not changed."
    )]
    async fn set_progress(&self, params: Parameters<SetProgress>) -> McpResult {
        self.handlers().set_progress(params).await
    }

    #[tool(
        name = "add_comment",
        description = "Append a comment to a task (plan_id + order). Author defaults to anonymous; blank text is ignored."
    )]
    async fn add_comment(&self, params: Parameters<AddComment>) -> McpResult {
        self.handlers().add_comment(params).await
    }

    #[tool(
        name = "set_completion",
        description = "Tick a task (plan_id + order) off, or back on, for this session. Affects list_tasks and stats only; board status is untouched and nothing is stored."
    )]
    async fn set_completion(&self, params: Parameters<SetCompletion>) -> McpResult {
        self.handlers().set_completion(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for StrideMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "stride".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts().await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: StrideMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Stride MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
