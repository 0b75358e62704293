//! Export formats for sharing a plan outside the tool.
//!
//! Exports are plain text rather than markdown: a JSON document, a printable
//! report and a short summary suitable for pasting into chat or email. All
//! formats list tasks in `order`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::datetime::LocalDateTime;
use crate::{models::Plan, PlannerError, Result};

const RULE_WIDTH: usize = 50;

/// Selectable export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed plan JSON
    #[default]
    Json,
    /// Printable report with header
    Text,
    /// Compact summary for the clipboard
    Brief,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "text",
            ExportFormat::Brief => "brief",
        }
    }

    /// File extension conventionally used for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text | ExportFormat::Brief => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            "brief" | "clipboard" => Ok(ExportFormat::Brief),
            _ => Err(PlannerError::invalid_input("format")
                .with_reason(format!("Unknown export format '{s}', expected json, text or brief"))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders `plan` in the requested format.
pub fn export(plan: &Plan, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
        ExportFormat::Text => Ok(TextExport(plan).to_string()),
        ExportFormat::Brief => Ok(BriefExport(plan).to_string()),
    }
}

/// Printable report: header block followed by every task with its
/// dependency and estimate spelled out.
pub struct TextExport<'a>(pub &'a Plan);

impl fmt::Display for TextExport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "STRIDE PLAN")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "Goal: {}", plan.goal.text)?;
        writeln!(f, "Created: {}", LocalDateTime(&plan.goal.created_at))?;
        writeln!(f, "Total Tasks: {}", plan.tasks.len())?;
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;

        for task in plan.tasks_in_order() {
            writeln!(f, "{}. {}", task.order, task.title)?;
            writeln!(f, "   {}", task.description)?;
            match task.depends_on.filter(|order| *order != 0) {
                Some(order) => writeln!(f, "   Dependencies: Task {order}")?,
                None => writeln!(f, "   Dependencies: None")?,
            }
            match task.estimate() {
                Some(days) => writeln!(f, "   Estimated Days: {days}")?,
                None => writeln!(f, "   Estimated Days: N/A")?,
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Compact summary that omits absent dependencies and estimates.
pub struct BriefExport<'a>(pub &'a Plan);

impl fmt::Display for BriefExport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        writeln!(f, "Goal: {}", plan.goal.text)?;
        writeln!(f)?;

        for task in plan.tasks_in_order() {
            writeln!(f, "{}. {}", task.order, task.title)?;
            writeln!(f, "   {}", task.description)?;
            if let Some(order) = task.depends_on.filter(|order| *order != 0) {
                writeln!(f, "   Depends on: Task {order}")?;
            }
            if let Some(days) = task.estimate() {
                writeln!(f, "   Duration: {days} days")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, Task};

    fn sample_plan() -> Plan {
        Plan::new(
            Goal::new("Launch a blog"),
            vec![
                Task {
                    description: "Write the first post".to_string(),
                    depends_on: Some(1),
                    estimated_days: Some(3),
                    ..Task::new(2, "Draft post")
                },
                Task {
                    description: "Compare hosts".to_string(),
                    estimated_days: Some(0),
                    ..Task::new(1, "Pick platform")
                },
            ],
        )
    }

    #[test]
    fn test_text_export() {
        let output = export(&sample_plan(), ExportFormat::Text).unwrap();

        assert!(output.starts_with("STRIDE PLAN\n=================================================="));
        assert!(output.contains("Goal: Launch a blog\n"));
        assert!(output.contains("Total Tasks: 2\n"));
        assert!(output.contains(
            "1. Pick platform\n   Compare hosts\n   Dependencies: None\n   Estimated Days: N/A\n"
        ));
        assert!(output.contains(
            "2. Draft post\n   Write the first post\n   Dependencies: Task 1\n   Estimated Days: 3\n"
        ));
        assert!(output.find("1. Pick platform").unwrap() < output.find("2. Draft post").unwrap());
    }

    #[test]
    fn test_brief_export_omits_missing_fields() {
        let output = export(&sample_plan(), ExportFormat::Brief).unwrap();

        assert!(output.starts_with("Goal: Launch a blog\n\n"));
        assert!(output.contains("1. Pick platform\n   Compare hosts\n\n"));
        assert!(output.contains("   Depends on: Task 1\n   Duration: 3 days\n"));
    }

    #[test]
    fn test_json_export_is_parseable() {
        let plan = sample_plan();
        let output = export(&plan, ExportFormat::Json).unwrap();
        let parsed: Plan = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed, plan);
        assert!(output.contains("\"estimatedDays\": 3"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("clipboard".parse::<ExportFormat>().unwrap(), ExportFormat::Brief);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
