//! Kanban board mutations and column grouping.
//!
//! Every mutation takes the current task record and returns the updated
//! record; the caller decides where it is persisted. The status graph is
//! flat, so any column can be reached from any other.

use jiff::Timestamp;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{Comment, Task, TaskStatus},
};

/// Upper bound of [`Task::progress`].
pub const MAX_PROGRESS: u8 = 100;

/// Moves `task` to the column named by `status`.
///
/// # Errors
///
/// Returns `PlannerError::InvalidStatus` when `status` names none of the five
/// columns; `task` is left untouched.
pub fn set_status(task: &Task, status: &str) -> Result<Task> {
    let status: TaskStatus = status.parse()?;
    Ok(transition(task, status))
}

/// Typed form of [`set_status`]. Never fails.
pub fn transition(task: &Task, status: TaskStatus) -> Task {
    debug!(
        "task {} status {} -> {}",
        task.order,
        task.status.as_str(),
        status.as_str()
    );
    Task {
        status,
        ..task.clone()
    }
}

/// Sets the progress percentage, clamped into `[0, 100]`.
///
/// Progress and status are independent: reaching 100 does not move the task
/// to `DONE`.
pub fn set_progress(task: &Task, value: i64) -> Task {
    let progress = value.clamp(0, i64::from(MAX_PROGRESS)) as u8;
    Task {
        progress,
        ..task.clone()
    }
}

/// Appends a comment stamped with the current time.
///
/// Blank or whitespace-only text leaves the task unchanged.
pub fn add_comment(task: &Task, author: &str, text: &str) -> Task {
    let mut updated = task.clone();
    if text.trim().is_empty() {
        debug!("ignoring empty comment on task {}", task.order);
        return updated;
    }

    updated.comments.push(Comment {
        author: author.to_string(),
        text: text.to_string(),
        created_at: Timestamp::now(),
    });
    updated
}

/// One board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub status: TaskStatus,
    /// Tasks in this column, in `order`
    pub tasks: Vec<Task>,
}

/// Tasks grouped into the five status columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Always five columns: TODO, IN_PROGRESS, IN_REVIEW, DONE, BLOCKED
    pub columns: Vec<Column>,
}

impl Board {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut ordered: Vec<&Task> = tasks.iter().collect();
        ordered.sort_by_key(|task| task.order);

        let columns = TaskStatus::ALL
            .iter()
            .map(|status| Column {
                status: *status,
                tasks: ordered
                    .iter()
                    .filter(|task| task.status == *status)
                    .map(|task| (*task).clone())
                    .collect(),
            })
            .collect();

        Self { columns }
    }

    /// The column for `status`.
    pub fn column(&self, status: TaskStatus) -> Option<&Column> {
        self.columns.iter().find(|column| column.status == status)
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    pub fn done_count(&self) -> usize {
        self.column(TaskStatus::Done)
            .map_or(0, |column| column.tasks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;

    fn sample_task() -> Task {
        Task {
            progress: 40,
            ..Task::new(1, "Write outline")
        }
    }

    #[test]
    fn test_any_status_can_reach_any_other() {
        for from in TaskStatus::ALL {
            for to in TaskStatus::ALL {
                let task = transition(&sample_task(), from);
                let moved = set_status(&task, to.as_str()).unwrap();
                assert_eq!(moved.status, to);
            }
        }
    }

    #[test]
    fn test_done_task_can_be_reopened() {
        let done = transition(&sample_task(), TaskStatus::Done);
        let reopened = set_status(&done, "todo").unwrap();
        assert_eq!(reopened.status, TaskStatus::Todo);
    }

    #[test]
    fn test_invalid_status_is_rejected_and_task_unchanged() {
        let task = sample_task();
        let before = task.clone();

        let err = set_status(&task, "INVALID").unwrap_err();
        assert!(matches!(err, PlannerError::InvalidStatus { .. }));
        assert_eq!(task, before);
    }

    #[test]
    fn test_status_change_keeps_other_fields() {
        let task = sample_task();
        let moved = set_status(&task, "IN_REVIEW").unwrap();

        assert_eq!(moved.id, task.id);
        assert_eq!(moved.progress, 40);
        assert_eq!(moved.title, task.title);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(set_progress(&sample_task(), 150).progress, 100);
        assert_eq!(set_progress(&sample_task(), -10).progress, 0);
        assert_eq!(set_progress(&sample_task(), 55).progress, 55);
        assert_eq!(set_progress(&sample_task(), i64::MAX).progress, 100);
    }

    #[test]
    fn test_full_progress_does_not_complete_task() {
        let task = set_progress(&sample_task(), 100);
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_comments_append_in_order() {
        let task = add_comment(&sample_task(), "Ana", "First");
        let task = add_comment(&task, "Ben", "Second");

        let texts: Vec<(&str, &str)> = task
            .comments
            .iter()
            .map(|c| (c.author.as_str(), c.text.as_str()))
            .collect();
        assert_eq!(texts, vec![("Ana", "First"), ("Ben", "Second")]);
        assert!(task.comments[0].created_at <= task.comments[1].created_at);
    }

    #[test]
    fn test_blank_comment_is_noop() {
        let task = sample_task();
        assert_eq!(add_comment(&task, "Ana", ""), task);
        assert_eq!(add_comment(&task, "Ana", "  \n\t"), task);
    }

    #[test]
    fn test_board_groups_by_status_in_order() {
        let tasks = vec![
            transition(&Task::new(3, "c"), TaskStatus::Done),
            Task::new(2, "b"),
            transition(&Task::new(4, "d"), TaskStatus::Blocked),
            Task::new(1, "a"),
            transition(&Task::new(5, "e"), TaskStatus::Done),
        ];
        let board = Board::from_tasks(&tasks);

        let statuses: Vec<TaskStatus> = board.columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, TaskStatus::ALL.to_vec());

        let todo: Vec<u32> = board.column(TaskStatus::Todo).unwrap().tasks.iter().map(|t| t.order).collect();
        assert_eq!(todo, vec![1, 2]);
        let done: Vec<u32> = board.column(TaskStatus::Done).unwrap().tasks.iter().map(|t| t.order).collect();
        assert_eq!(done, vec![3, 5]);
        assert!(board.column(TaskStatus::InReview).unwrap().tasks.is_empty());
        assert_eq!(board.done_count(), 2);
        assert_eq!(board.total(), 5);
    }
}
