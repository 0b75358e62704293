//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can hand it to the terminal renderer and
//! the MCP server can return it verbatim.

use std::fmt;

use super::datetime::{Days, LocalDateTime};
use crate::{
    models::{total_estimate, Comment, Plan, PlanSummary, Task, TaskPriority, TaskStatus},
    pipeline::priority_badge,
};

/// Labels beyond this count are summarised as `+N`.
const VISIBLE_LABELS: usize = 2;

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.goal.text)?;
        writeln!(f)?;

        let total_days = total_estimate(&self.tasks);
        writeln!(f, "- Created: {}", LocalDateTime(&self.goal.created_at))?;
        writeln!(f, "- Tasks: {}", self.tasks.len())?;
        writeln!(f, "- Estimated: {}", Days(total_days))?;

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks in this plan.")?;
            return Ok(());
        }

        writeln!(f, "\n## Tasks")?;
        writeln!(f)?;
        for task in self.tasks_in_order() {
            write!(f, "{task}")?;
        }

        Ok(())
    }
}

impl Task {
    fn fmt_labels(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self
            .labels
            .iter()
            .take(VISIBLE_LABELS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "- Labels: {shown}")?;
        if self.labels.len() > VISIBLE_LABELS {
            write!(f, " +{}", self.labels.len() - VISIBLE_LABELS)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "### {}. {} ({})",
            self.order,
            self.title,
            self.status.with_icon()
        )?;
        if let Some(badge) = priority_badge(self) {
            write!(f, " {badge}")?;
        }
        writeln!(f)?;
        writeln!(f)?;

        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }

        match self.depends_on {
            Some(order) => writeln!(f, "- Depends on: Task {order}")?,
            None => writeln!(f, "- Depends on: None")?,
        }
        match self.estimate() {
            Some(days) => writeln!(f, "- Estimate: {}", Days(days))?,
            None => writeln!(f, "- Estimate: N/A")?,
        }
        writeln!(f, "- Priority: {}", self.priority)?;
        writeln!(f, "- Progress: {}%", self.progress)?;
        if let Some(assignee) = &self.assignee {
            writeln!(f, "- Assignee: {assignee}")?;
        }
        if !self.labels.is_empty() {
            self.fmt_labels(f)?;
        }
        writeln!(f)?;

        if !self.comments.is_empty() {
            writeln!(f, "#### Comments")?;
            writeln!(f)?;
            for comment in &self.comments {
                write!(f, "{comment}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- **{}** ({}): {}",
            self.author,
            LocalDateTime(&self.created_at),
            self.text
        )
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_tasks > 0 {
            format!(" ({}/{})", self.done_tasks, self.total_tasks)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.goal.text, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Estimated**: {}", Days(self.total_days))?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.goal.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Goal;

    fn sample_task() -> Task {
        Task {
            description: "Gather requirements".to_string(),
            estimated_days: Some(3),
            depends_on: Some(1),
            labels: vec!["backend".into(), "api".into(), "v2".into(), "urgent".into()],
            assignee: Some("Ana".to_string()),
            ..Task::new(2, "Design API")
        }
    }

    #[test]
    fn test_task_display() {
        let output = sample_task().to_string();

        assert!(output.starts_with("### 2. Design API (📋 To Do)\n"));
        assert!(output.contains("Gather requirements"));
        assert!(output.contains("- Depends on: Task 1"));
        assert!(output.contains("- Estimate: 3 days"));
        assert!(output.contains("- Assignee: Ana"));
        assert!(output.contains("- Labels: backend, api +2"));
    }

    #[test]
    fn test_task_display_badges_and_missing_estimate() {
        let root = Task::new(1, "Kickoff");
        let output = root.to_string();
        assert!(output.contains("🔥 High Priority"));
        assert!(output.contains("- Depends on: None"));
        assert!(output.contains("- Estimate: N/A"));

        let quick = Task {
            depends_on: Some(1),
            estimated_days: Some(1),
            ..Task::new(2, "Follow up")
        };
        assert!(quick.to_string().contains("⚡ Quick Win"));
    }

    #[test]
    fn test_plan_display_lists_tasks_in_order() {
        let plan = Plan {
            id: 7,
            goal: Goal {
                text: "Launch blog".to_string(),
                created_at: Timestamp::from_second(1640995200).unwrap(),
            },
            tasks: vec![Task::new(2, "Second"), Task::new(1, "First")],
        };
        let output = plan.to_string();

        assert!(output.starts_with("# 7. Launch blog"));
        assert!(output.contains("- Tasks: 2"));
        let first = output.find("First").unwrap();
        let second = output.find("Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_plan_display() {
        let plan = Plan::new(Goal::new("Nothing yet"), vec![]);
        assert!(plan.to_string().contains("No tasks in this plan."));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TaskStatus::InReview.to_string(), "IN_REVIEW");
        assert_eq!(TaskPriority::High.to_string(), "HIGH");
    }
}
