//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        Prompt, PromptArgument, PromptMessage, PromptMessageContent, PromptMessageRole,
    },
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::Deserialize;
use stride_core::{
    display::{CreateResult, OperationStatus, TimelineView},
    params as core, CompletionMap, Plan, Planner,
};
use tokio::sync::Mutex;

use super::{prompts::PROMPT_TEMPLATES, to_mcp_error};

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types derive JsonSchema behind the `schema` feature but know
// nothing about MCP. The transparent wrapper forwards both deserialization
// and the schema to the wrapped type.

/// MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> McpParams<T>
where
    T: JsonSchema,
{
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type ImportPlan = McpParams<core::ImportPlan>;
pub type ViewTasks = McpParams<core::ViewTasks>;
pub type ViewStats = McpParams<core::ViewStats>;
pub type SetStatus = McpParams<core::SetStatus>;
pub type SetProgress = McpParams<core::SetProgress>;
pub type AddComment = McpParams<core::AddComment>;
pub type SetCompletion = McpParams<core::SetCompletion>;

pub type McpResult = Result<CallToolResult, McpError>;

/// Planner plus the per-connection completion map.
///
/// Completion is view state: it lives for the lifetime of the MCP session
/// and is never written to the database.
pub struct Session {
    pub planner: Planner,
    pub completion: CompletionMap,
}

impl Session {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner,
            completion: CompletionMap::new(),
        }
    }
}

fn text(output: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    session: Arc<Mutex<Session>>,
}

impl McpHandlers {
    pub fn new(session: Arc<Mutex<Session>>) -> Self {
        Self { session }
    }

    pub async fn import_plan(&self, Parameters(params): Parameters<ImportPlan>) -> McpResult {
        debug!("import_plan: {:?}", params);

        let plan = Plan::from(params.into_inner());
        let plan = self
            .session
            .lock()
            .await
            .planner
            .import_plan(&plan)
            .await
            .map_err(|e| to_mcp_error("Failed to import plan", &e))?;

        text(CreateResult::new(plan))
    }

    pub async fn list_plans(&self) -> McpResult {
        debug!("list_plans");

        let summaries = self
            .session
            .lock()
            .await
            .planner
            .list_plans()
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        text(format!("# Plans\n\n{summaries}"))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {:?}", params);

        let plan = self
            .session
            .lock()
            .await
            .planner
            .require_plan(params.as_ref().id)
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?;

        text(plan)
    }

    pub async fn list_tasks(&self, Parameters(params): Parameters<ViewTasks>) -> McpResult {
        debug!("list_tasks: {:?}", params);

        let session = self.session.lock().await;
        let tasks = session
            .planner
            .list_tasks(params.as_ref(), &session.completion)
            .await
            .map_err(|e| to_mcp_error("Failed to list tasks", &e))?;

        text(tasks)
    }

    pub async fn timeline(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("timeline: {:?}", params);

        let timeline = self
            .session
            .lock()
            .await
            .planner
            .timeline(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build timeline", &e))?;

        text(TimelineView::new(&timeline))
    }

    pub async fn stats(&self, Parameters(params): Parameters<ViewStats>) -> McpResult {
        debug!("stats: {:?}", params);

        let session = self.session.lock().await;
        let stats = session
            .planner
            .stats(params.as_ref(), &session.completion)
            .await
            .map_err(|e| to_mcp_error("Failed to compute statistics", &e))?;

        text(stats)
    }

    pub async fn board(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("board: {:?}", params);

        let board = self
            .session
            .lock()
            .await
            .planner
            .board(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build board", &e))?;

        text(board)
    }

    pub async fn set_status(&self, Parameters(params): Parameters<SetStatus>) -> McpResult {
        debug!("set_status: {:?}", params);

        let result = self
            .session
            .lock()
            .await
            .planner
            .set_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update task status", &e))?;

        text(result)
    }

    pub async fn set_progress(&self, Parameters(params): Parameters<SetProgress>) -> McpResult {
        debug!("set_progress: {:?}", params);

        let result = self
            .session
            .lock()
            .await
            .planner
            .set_progress(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update task progress", &e))?;

        text(result)
    }

    pub async fn add_comment(&self, Parameters(params): Parameters<AddComment>) -> McpResult {
        debug!("add_comment: {:?}", params);

        let result = self
            .session
            .lock()
            .await
            .planner
            .add_comment(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add comment", &e))?;

        text(result)
    }

    pub async fn set_completion(
        &self,
        Parameters(params): Parameters<SetCompletion>,
    ) -> McpResult {
        debug!("set_completion: {:?}", params);

        let mut guard = self.session.lock().await;
        let session = &mut *guard;
        let inner = params.as_ref();
        let task = session
            .planner
            .set_completion(inner, &mut session.completion)
            .await
            .map_err(|e| to_mcp_error("Failed to update completion", &e))?;

        let state = if inner.completed {
            "completed"
        } else {
            "not completed"
        };
        text(OperationStatus::success(format!(
            "Task {} '{}' marked as {state}",
            task.order, task.title
        )))
    }

    pub async fn list_prompts(&self) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");

        let prompts = PROMPT_TEMPLATES
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);

        let template = PROMPT_TEMPLATES
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| McpError::invalid_params("Prompt not found", None))?;

        let arguments = request.arguments.unwrap_or_default();
        let prompt_text = template
            .apply(|name| arguments.get(name).and_then(|value| value.as_str()))
            .map_err(|reason| McpError::invalid_params(reason, None))?;

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
