//! Error handling utilities for the MCP server

use rmcp::ErrorData;
use stride_core::PlannerError;

/// Converts a planner error into an MCP error.
///
/// Errors caused by the caller's arguments (unknown plan or task, invalid
/// status or input) become `invalid_params` so the assistant can correct the
/// call; everything else is an `internal_error`.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlannerError::PlanNotFound { .. }
        | PlannerError::TaskNotFound { .. }
        | PlannerError::InvalidStatus { .. }
        | PlannerError::InvalidInput { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
