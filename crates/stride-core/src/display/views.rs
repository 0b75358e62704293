//! Display wrappers for the derived views: timeline, statistics and board.

use std::fmt;

use jiff::civil::Date;

use super::datetime::{Days, ShortDate};
use crate::{board::Board, schedule::Timeline, stats::Stats};

/// Renders a [`Timeline`] grouped by week.
///
/// Calendar dates are only shown when a start date is supplied with
/// [`TimelineView::starting`]; the schedule itself is day offsets.
pub struct TimelineView<'a> {
    timeline: &'a Timeline,
    start: Option<Date>,
}

impl<'a> TimelineView<'a> {
    pub fn new(timeline: &'a Timeline) -> Self {
        Self {
            timeline,
            start: None,
        }
    }

    /// Shows calendar dates assuming the project starts on `start`.
    pub fn starting(mut self, start: Date) -> Self {
        self.start = Some(start);
        self
    }
}

impl fmt::Display for TimelineView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeline = self.timeline;
        writeln!(f, "# Timeline")?;
        writeln!(f)?;

        if timeline.is_empty() {
            return writeln!(f, "No tasks to schedule.");
        }

        writeln!(
            f,
            "- Duration: {} (~{} weeks, ~{} months)",
            Days(timeline.total_days),
            timeline.total_weeks,
            timeline.total_months
        )?;
        writeln!(f, "- Critical tasks: {}", timeline.critical_path().len())?;

        for week in timeline.weeks() {
            writeln!(f)?;
            writeln!(
                f,
                "## Week {} (days {}-{})",
                week.number, week.first_day, week.last_day
            )?;
            writeln!(f)?;

            for entry in timeline
                .entries
                .iter()
                .filter(|entry| week.tasks.contains(&entry.task.order))
            {
                write!(
                    f,
                    "- Day {}-{}: **{}. {}** ({}, {})",
                    entry.start_day.saturating_add(1),
                    entry.end_day,
                    entry.task.order,
                    entry.task.title,
                    Days(entry.duration),
                    entry.bucket.as_str()
                )?;
                if let Some((first, last)) = self.start.and_then(|start| entry.date_range(start)) {
                    write!(f, " {} - {}", ShortDate(first), ShortDate(last))?;
                }
                if entry.critical {
                    write!(f, " ⚠ after task {}", entry.task.depends_on.unwrap_or_default())?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Statistics")?;
        writeln!(f)?;
        writeln!(f, "| Metric | Value |")?;
        writeln!(f, "|:-|-:|")?;
        writeln!(f, "| Total tasks | {} |", self.total)?;
        writeln!(f, "| Completed | {} |", self.completed)?;
        writeln!(f, "| In progress | {} |", self.in_progress)?;
        writeln!(f, "| Not started | {} |", self.not_started)?;
        writeln!(f, "| Total estimate | {} |", Days(self.total_days))?;
        writeln!(f, "| Average per task | {} |", Days(self.avg_days_per_task))?;
        writeln!(f, "| With dependencies | {} |", self.with_dependencies)?;
        writeln!(f, "| Independent | {} |", self.independent)?;
        writeln!(f, "| Completion rate | {}% |", self.completion_rate)?;
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Board ({}/{} done)", self.done_count(), self.total())?;

        for column in &self.columns {
            writeln!(f)?;
            writeln!(f, "## {} ({})", column.status.with_icon(), column.tasks.len())?;
            writeln!(f)?;

            if column.tasks.is_empty() {
                writeln!(f, "_empty_")?;
                continue;
            }
            for task in &column.tasks {
                write!(f, "- {}. {} [{}%]", task.order, task.title, task.progress)?;
                if let Some(assignee) = &task.assignee {
                    write!(f, " @{assignee}")?;
                }
                if !task.comments.is_empty() {
                    write!(f, " 💬 {}", task.comments.len())?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
