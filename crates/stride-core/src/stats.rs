//! Completion and duration statistics for a task collection.

use serde::{Deserialize, Serialize};

use crate::models::{total_estimate, CompletionMap, Task};

/// Summary counters for a plan.
///
/// `in_progress` and `not_started` are exclusive buckets rather than a
/// partition: with nothing ticked off every task is "not started", with some
/// ticked off the remainder is "in progress", and once everything is ticked
/// off both are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: u32,
    pub completed: u32,
    pub in_progress: u32,
    pub not_started: u32,
    /// Sum of estimates, missing estimates count as 0
    pub total_days: u32,
    /// Rounded mean estimate, 0 for an empty collection
    pub avg_days_per_task: u32,
    pub with_dependencies: u32,
    pub independent: u32,
    /// Rounded percentage of ticked-off tasks, 0 for an empty collection
    pub completion_rate: u32,
}

impl Stats {
    /// Tasks not yet ticked off.
    pub fn remaining(&self) -> u32 {
        self.total - self.completed
    }
}

/// Reduces `tasks` and the completion side-table into [`Stats`].
pub fn aggregate(tasks: &[Task], completion: &CompletionMap) -> Stats {
    let total = tasks.len() as u32;
    let completed = tasks
        .iter()
        .filter(|task| completion.is_completed(&task.id))
        .count() as u32;
    let total_days = total_estimate(tasks);
    let with_dependencies = tasks.iter().filter(|task| task.depends_on.is_some()).count() as u32;

    Stats {
        total,
        completed,
        in_progress: if completed > 0 && completed < total {
            total - completed
        } else {
            0
        },
        not_started: if completed == 0 { total } else { 0 },
        total_days,
        avg_days_per_task: rounded_ratio(u64::from(total_days), u64::from(total)),
        with_dependencies,
        independent: total - with_dependencies,
        completion_rate: rounded_ratio(100 * u64::from(completed), u64::from(total)),
    }
}

/// `numerator / denominator` rounded half up, 0 when the denominator is 0.
fn rounded_ratio(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((2 * numerator + denominator) / (2 * denominator)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(estimates: &[Option<u32>]) -> Vec<Task> {
        estimates
            .iter()
            .enumerate()
            .map(|(index, days)| {
                let order = index as u32 + 1;
                Task {
                    id: format!("t{order}"),
                    estimated_days: *days,
                    depends_on: (order % 2 == 0).then_some(order - 1),
                    ..Task::new(order, format!("Task {order}"))
                }
            })
            .collect()
    }

    fn completed(ids: &[&str]) -> CompletionMap {
        ids.iter().map(|id| (id.to_string(), true)).collect()
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        let stats = aggregate(&[], &CompletionMap::new());
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.avg_days_per_task, 0);
    }

    #[test]
    fn test_nothing_completed() {
        let stats = aggregate(&tasks(&[Some(2), None, Some(5)]), &CompletionMap::new());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.not_started, 3);
        assert_eq!(stats.total_days, 7);
        assert_eq!(stats.avg_days_per_task, 2);
        assert_eq!(stats.with_dependencies, 1);
        assert_eq!(stats.independent, 2);
        assert_eq!(stats.completion_rate, 0);
    }

    #[test]
    fn test_partially_completed() {
        let stats = aggregate(&tasks(&[Some(1), Some(1), Some(1)]), &completed(&["t1"]));

        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.not_started, 0);
        assert_eq!(stats.completion_rate, 33);
        assert_eq!(stats.remaining(), 2);
    }

    #[test]
    fn test_all_completed_leaves_both_buckets_empty() {
        let stats = aggregate(&tasks(&[Some(1), Some(1)]), &completed(&["t1", "t2"]));

        assert_eq!(stats.completed, 2);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.not_started, 0);
        assert_eq!(stats.completion_rate, 100);
    }

    #[test]
    fn test_bucket_sum_rule() {
        let collection = tasks(&[Some(1), None, Some(3), Some(4)]);
        for done in [vec![], vec!["t1"], vec!["t1", "t3"], vec!["t1", "t2", "t3", "t4"]] {
            let stats = aggregate(&collection, &completed(&done));
            let sum = stats.completed + stats.in_progress + stats.not_started;
            assert!(
                sum == stats.total || sum == 2 * stats.total - stats.completed,
                "unexpected bucket sum {sum} for {stats:?}"
            );
        }
    }

    #[test]
    fn test_stale_completion_entries_are_ignored() {
        let stats = aggregate(&tasks(&[Some(1)]), &completed(&["gone", "also-gone"]));
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.not_started, 1);
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 5 days over 2 tasks = 2.5 -> 3
        let stats = aggregate(&tasks(&[Some(2), Some(3)]), &completed(&["t1"]));
        assert_eq!(stats.avg_days_per_task, 3);
        assert_eq!(stats.completion_rate, 50);

        // 2 of 3 = 66.67% -> 67
        let stats = aggregate(&tasks(&[None, None, None]), &completed(&["t1", "t2"]));
        assert_eq!(stats.completion_rate, 67);
        assert_eq!(stats.avg_days_per_task, 0);
    }

    #[test]
    fn test_huge_estimates_saturate() {
        let stats = aggregate(
            &tasks(&[Some(3_000_000_000), Some(3_000_000_000)]),
            &CompletionMap::new(),
        );
        assert_eq!(stats.total_days, u32::MAX);
        assert_eq!(stats.avg_days_per_task, u32::MAX / 2 + 1);
    }

    #[test]
    fn test_zero_estimate_counts_as_zero() {
        let stats = aggregate(&tasks(&[Some(0), Some(4)]), &CompletionMap::new());
        assert_eq!(stats.total_days, 4);
        assert_eq!(stats.avg_days_per_task, 2);
    }
}
