//! Plan summary types for history listings.

use serde::{Deserialize, Serialize};

use super::{total_estimate, Goal, Plan, TaskStatus};

/// Summary information about a stored plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Goal the plan was created for
    pub goal: Goal,
    /// Total number of tasks
    pub total_tasks: u32,
    /// Number of tasks in the `DONE` column
    pub done_tasks: u32,
    /// Sum of task estimates in days
    pub total_days: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        let total_tasks = plan.tasks.len() as u32;
        let done_tasks = plan
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Done)
            .count() as u32;
        let total_days = total_estimate(&plan.tasks);

        Self {
            id: plan.id,
            goal: plan.goal.clone(),
            total_tasks,
            done_tasks,
            total_days,
        }
    }
}
