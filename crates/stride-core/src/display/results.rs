//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Plan, Task};

/// Result of a create or import operation.
///
/// ```rust
/// use stride_core::{
///     display::CreateResult,
///     models::{Goal, Plan, Task},
/// };
///
/// let mut plan = Plan::new(Goal::new("Ship v1"), vec![Task::new(1, "Scope")]);
/// plan.id = 3;
///
/// let output = CreateResult::new(plan).to_string();
/// assert!(output.starts_with("Created plan with ID: 3"));
/// ```
#[derive(Debug)]
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added task {}", self.resource.order)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of a board mutation, listing what changed.
#[derive(Debug)]
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task {}", self.resource.order)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of deleting a plan.
#[derive(Debug)]
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {}) with {} tasks",
            self.resource.goal.text,
            self.resource.id,
            self.resource.tasks.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goal;

    #[test]
    fn test_update_result_lists_changes() {
        let task = Task::new(4, "Review");
        let output = UpdateResult::with_changes(task, vec!["Status: TODO -> DONE".to_string()])
            .to_string();

        assert!(output.starts_with("Updated task 4\n\nChanges made:\n- Status: TODO -> DONE\n"));
        assert!(output.contains("### 4. Review"));
    }

    #[test]
    fn test_update_result_without_changes() {
        let output = UpdateResult::new(Task::new(1, "Plan")).to_string();
        assert!(!output.contains("Changes made:"));
    }

    #[test]
    fn test_delete_result() {
        let mut plan = Plan::new(Goal::new("Old goal"), vec![Task::new(1, "A")]);
        plan.id = 9;
        assert_eq!(
            DeleteResult::new(plan).to_string(),
            "Deleted plan 'Old goal' (ID: 9) with 1 tasks\n"
        );
    }
}
