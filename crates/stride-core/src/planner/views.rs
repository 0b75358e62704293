//! Read-only views over a stored plan.
//!
//! Each view loads the plan once and hands its tasks to the matching pure
//! engine. Completion state comes from the caller: orders ticked off in the
//! request are merged over the caller's session map.

use super::Planner;
use crate::{
    board::Board,
    display::Tasks,
    error::Result,
    models::{CompletionMap, Task},
    params::{Id, SetCompletion, ViewStats, ViewTasks},
    pipeline,
    schedule::{self, Timeline},
    stats::{self, Stats},
};

fn merged_completion(tasks: &[Task], session: &CompletionMap, done: &[u32]) -> CompletionMap {
    let mut completion = session.clone();
    completion.extend(CompletionMap::from_orders(tasks, done));
    completion
}

impl Planner {
    /// Searched, filtered and sorted task list.
    pub async fn list_tasks(&self, params: &ViewTasks, session: &CompletionMap) -> Result<Tasks> {
        let plan = self.require_plan(params.plan_id).await?;
        let completion = merged_completion(&plan.tasks, session, &params.done);
        Ok(Tasks(pipeline::apply(&plan.tasks, &completion, &params.options)))
    }

    /// Sequential timeline of the plan.
    pub async fn timeline(&self, params: &Id) -> Result<Timeline> {
        let plan = self.require_plan(params.id).await?;
        Ok(schedule::build(&plan.tasks))
    }

    /// Completion and duration statistics.
    pub async fn stats(&self, params: &ViewStats, session: &CompletionMap) -> Result<Stats> {
        let plan = self.require_plan(params.plan_id).await?;
        let completion = merged_completion(&plan.tasks, session, &params.done);
        Ok(stats::aggregate(&plan.tasks, &completion))
    }

    /// Kanban board grouped by status.
    pub async fn board(&self, params: &Id) -> Result<Board> {
        let plan = self.require_plan(params.id).await?;
        Ok(Board::from_tasks(&plan.tasks))
    }

    /// Ticks a task off (or back on) in `session` and returns the task.
    ///
    /// Only the in-memory map changes; the task's status is untouched.
    pub async fn set_completion(
        &self,
        params: &SetCompletion,
        session: &mut CompletionMap,
    ) -> Result<Task> {
        let task = self.get_task(&params.task).await?;
        session.set(task.id.clone(), params.completed);
        Ok(task)
    }
}
