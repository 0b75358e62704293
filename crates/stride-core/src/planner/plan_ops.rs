//! Plan operations for the Planner.

use log::info;

use super::Planner;
use crate::{
    display::{export, ExportFormat, PlanSummaries},
    error::{PlannerError, Result},
    models::Plan,
    params::{CreatePlan, DeletePlan, Id},
};

impl Planner {
    /// Creates an empty plan for a goal; tasks are added one by one.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let goal = params.goal.clone();
        self.with_database(move |db| db.create_plan(&goal)).await
    }

    /// Stores a decomposed plan. The plan's own `id` is ignored.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the goal is blank or the tasks
    ///   contain duplicate orders, self-dependencies or cycles
    pub async fn import_plan(&self, plan: &Plan) -> Result<Plan> {
        let plan = plan.clone();
        let stored = self.with_database(move |db| db.import_plan(&plan)).await?;
        info!("imported plan {} with {} tasks", stored.id, stored.tasks.len());
        Ok(stored)
    }

    /// Retrieves a plan by its ID, `None` if it does not exist.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let plan_id = params.id;
        self.with_database(move |db| db.get_plan(plan_id)).await
    }

    /// Retrieves a plan that must exist.
    pub async fn require_plan(&self, plan_id: u64) -> Result<Plan> {
        self.get_plan(&Id { id: plan_id })
            .await?
            .ok_or(PlannerError::PlanNotFound { id: plan_id })
    }

    /// Plan history, newest first.
    pub async fn list_plans(&self) -> Result<PlanSummaries> {
        self.with_database(|db| db.list_plans())
            .await
            .map(PlanSummaries)
    }

    /// Permanently deletes a plan and returns what was deleted.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When `confirmed` is not set
    /// * `PlannerError::PlanNotFound` - When the plan does not exist
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Plan> {
        if !params.confirmed {
            return Err(PlannerError::invalid_input("confirmed").with_reason(
                "Deleting a plan cannot be undone; confirm the deletion to proceed",
            ));
        }

        let plan = self.require_plan(params.id).await?;
        let plan_id = plan.id;
        self.with_database(move |db| db.delete_plan(plan_id)).await?;
        info!("deleted plan {plan_id}");
        Ok(plan)
    }

    /// Renders a stored plan in one of the export formats.
    pub async fn export_plan(&self, params: &Id, format: ExportFormat) -> Result<String> {
        let plan = self.require_plan(params.id).await?;
        export(&plan, format)
    }
}
