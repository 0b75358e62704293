//! Checklist completion side-table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Task;

/// Per-task checkbox state keyed by task id.
///
/// Kept apart from [`Task::status`] and [`Task::progress`]: a task can be
/// ticked off in a checklist view while its board column says otherwise.
/// Missing entries count as not completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionMap(HashMap<String, bool>);

impl CompletionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the task with the given id as completed or not.
    pub fn set(&mut self, task_id: impl Into<String>, completed: bool) {
        self.0.insert(task_id.into(), completed);
    }

    /// Whether the task with the given id is ticked off.
    pub fn is_completed(&self, task_id: &str) -> bool {
        self.0.get(task_id).copied().unwrap_or(false)
    }

    /// Builds a map ticking off the tasks whose order appears in `orders`.
    ///
    /// Orders that match no task are ignored.
    pub fn from_orders(tasks: &[Task], orders: &[u32]) -> Self {
        tasks
            .iter()
            .filter(|task| orders.contains(&task.order))
            .map(|task| (task.id.clone(), true))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, bool)> for CompletionMap {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(String, bool)> for CompletionMap {
    fn extend<I: IntoIterator<Item = (String, bool)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for CompletionMap {
    type Item = (String, bool);
    type IntoIter = std::collections::hash_map::IntoIter<String, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
