//! Sequential timeline derived from task order and duration.
//!
//! The schedule is a single track: tasks run one after another in `order`,
//! never in parallel, whatever their dependencies say. A dependency only marks
//! the task as critical for display. Days are zero-based offsets from the
//! project start; a task occupies the half-open range `[start_day, end_day)`.
//!
//! A task without an estimate occupies one day here, while the statistics
//! and the filter pipeline count it as zero days.

use std::collections::BTreeSet;

use jiff::{civil::Date, Span};
use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Duration used for tasks without an estimate.
pub const DEFAULT_TASK_DAYS: u32 = 1;

const DAYS_PER_WEEK: u32 = 7;
const DAYS_PER_MONTH: u32 = 30;

/// Coarse length class used to color timeline bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationBucket {
    /// Up to two days
    Short,
    /// Three to five days
    Medium,
    /// Six days or more
    Long,
}

impl DurationBucket {
    pub fn for_days(days: u32) -> Self {
        match days {
            0..=2 => DurationBucket::Short,
            3..=5 => DurationBucket::Medium,
            _ => DurationBucket::Long,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::Short => "short",
            DurationBucket::Medium => "medium",
            DurationBucket::Long => "long",
        }
    }
}

/// A task placed on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: Task,
    /// Days the task occupies (never 0)
    pub duration: u32,
    /// First day, zero-based
    pub start_day: u32,
    /// Day after the last one, equal to the next task's `start_day`
    pub end_day: u32,
    /// One-based week the task starts in
    pub start_week: u32,
    /// One-based week the task ends in
    pub end_week: u32,
    /// Task has a predecessor
    pub critical: bool,
    pub bucket: DurationBucket,
}

impl ScheduledTask {
    /// Calendar dates of the first and last day when the project starts on
    /// `today`. Returns `None` if the dates fall outside the supported range.
    pub fn date_range(&self, today: Date) -> Option<(Date, Date)> {
        let offset = |days: u32| -> Option<Date> {
            let span = Span::new().try_days(i64::from(days)).ok()?;
            today.checked_add(span).ok()
        };
        Some((
            offset(self.start_day)?,
            offset(self.end_day.saturating_sub(1).max(self.start_day))?,
        ))
    }
}

/// One week column of the timeline grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    /// One-based week number
    pub number: u32,
    /// First one-based day number shown in this week
    pub first_day: u32,
    /// Last one-based day number shown, clipped to the project length
    pub last_day: u32,
    /// Orders of the tasks running during this week
    pub tasks: Vec<u32>,
}

/// The full schedule of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Scheduled tasks in `order`
    pub entries: Vec<ScheduledTask>,
    /// End day of the last task, 0 when empty
    pub total_days: u32,
    pub total_weeks: u32,
    pub total_months: u32,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries flagged as critical, i.e. tasks with a predecessor.
    pub fn critical_path(&self) -> Vec<&ScheduledTask> {
        self.entries.iter().filter(|entry| entry.critical).collect()
    }

    /// Groups tasks into the weeks they span.
    ///
    /// Only weeks in which some task starts or ends are listed, so a long
    /// task yields its first and last week rather than every week between.
    pub fn weeks(&self) -> Vec<Week> {
        let numbers: BTreeSet<u32> = self
            .entries
            .iter()
            .flat_map(|entry| [entry.start_week, entry.end_week])
            .filter(|number| *number >= 1)
            .collect();

        numbers
            .into_iter()
            .map(|number| Week {
                number,
                first_day: (number - 1).saturating_mul(DAYS_PER_WEEK).saturating_add(1),
                last_day: number.saturating_mul(DAYS_PER_WEEK).min(self.total_days),
                tasks: self
                    .entries
                    .iter()
                    .filter(|entry| entry.start_week <= number && number <= entry.end_week)
                    .map(|entry| entry.task.order)
                    .collect(),
            })
            .collect()
    }
}

/// Lays the tasks out back to back in `order`.
pub fn build(tasks: &[Task]) -> Timeline {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|task| task.order);

    let mut cumulative_days: u32 = 0;
    let entries: Vec<ScheduledTask> = ordered
        .into_iter()
        .map(|task| {
            let duration = task.estimate().unwrap_or(DEFAULT_TASK_DAYS);
            let start_day = cumulative_days;
            let end_day = start_day.saturating_add(duration);
            cumulative_days = end_day;

            ScheduledTask {
                task: task.clone(),
                duration,
                start_day,
                end_day,
                start_week: start_day / DAYS_PER_WEEK + 1,
                end_week: end_day.div_ceil(DAYS_PER_WEEK),
                critical: task.depends_on.is_some(),
                bucket: DurationBucket::for_days(duration),
            }
        })
        .collect();

    let total_days = entries.last().map_or(0, |entry| entry.end_day);

    Timeline {
        entries,
        total_days,
        total_weeks: total_days.div_ceil(DAYS_PER_WEEK),
        total_months: total_days.div_ceil(DAYS_PER_MONTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::CompletionMap, pipeline, stats};

    fn task(order: u32, depends_on: Option<u32>, days: Option<u32>) -> Task {
        Task {
            depends_on,
            estimated_days: days,
            ..Task::new(order, format!("Task {order}"))
        }
    }

    fn spans(timeline: &Timeline) -> Vec<(u32, u32)> {
        timeline
            .entries
            .iter()
            .map(|entry| (entry.start_day, entry.end_day))
            .collect()
    }

    #[test]
    fn test_three_task_scenario() {
        let tasks = vec![task(1, None, Some(2)), task(2, Some(1), None), task(3, None, Some(5))];
        let timeline = build(&tasks);

        assert_eq!(spans(&timeline), vec![(0, 2), (2, 3), (3, 8)]);
        assert_eq!(timeline.entries[1].duration, 1);
        assert_eq!(timeline.total_days, 8);
        assert_eq!(timeline.total_weeks, 2);
        assert_eq!(timeline.total_months, 1);
    }

    #[test]
    fn test_empty_list() {
        let timeline = build(&[]);
        assert!(timeline.is_empty());
        assert_eq!(timeline.total_days, 0);
        assert_eq!(timeline.total_weeks, 0);
        assert!(timeline.weeks().is_empty());
    }

    #[test]
    fn test_sorted_by_order_before_scheduling() {
        let tasks = vec![task(3, None, Some(1)), task(1, None, Some(4)), task(2, None, Some(2))];
        let timeline = build(&tasks);

        let orders: Vec<u32> = timeline.entries.iter().map(|e| e.task.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(spans(&timeline), vec![(0, 4), (4, 6), (6, 7)]);
    }

    #[test]
    fn test_schedule_is_contiguous_and_monotonic() {
        let tasks: Vec<Task> = (1..=12)
            .map(|order| task(order, (order > 1).then(|| order - 1), Some(order % 4)))
            .collect();
        let timeline = build(&tasks);

        for pair in timeline.entries.windows(2) {
            assert!(pair[0].start_day <= pair[1].start_day);
            assert_eq!(pair[0].end_day, pair[1].start_day);
        }
        assert!(timeline.entries.iter().all(|e| e.duration >= 1));
    }

    #[test]
    fn test_dependencies_do_not_change_timing() {
        let plain = vec![task(1, None, Some(3)), task(2, None, Some(3))];
        let dependent = vec![task(1, Some(2), Some(3)), task(2, Some(1), Some(3))];

        assert_eq!(spans(&build(&plain)), spans(&build(&dependent)));
    }

    #[test]
    fn test_unresolved_dependency_is_scheduled_sequentially() {
        let tasks = vec![task(1, None, Some(2)), task(2, Some(42), Some(1))];
        let timeline = build(&tasks);

        assert_eq!(spans(&timeline), vec![(0, 2), (2, 3)]);
        assert!(timeline.entries[1].critical);
    }

    #[test]
    fn test_zero_estimate_takes_one_day() {
        let timeline = build(&[task(1, None, Some(0))]);
        assert_eq!(timeline.entries[0].duration, 1);
        assert_eq!(timeline.total_days, 1);
    }

    #[test]
    fn test_missing_estimate_diverges_between_components() {
        let tasks = vec![task(1, None, Some(4)), task(2, Some(1), None)];

        let timeline = build(&tasks);
        assert_eq!(timeline.entries[1].duration, 1);
        assert_eq!(timeline.total_days, 5);

        let summary = stats::aggregate(&tasks, &CompletionMap::new());
        assert_eq!(summary.total_days, 4);

        let quick = pipeline::apply(
            &tasks,
            &CompletionMap::new(),
            &pipeline::FilterOptions {
                category: pipeline::Category::Quick,
                ..Default::default()
            },
        );
        assert!(quick.is_empty());

        let by_duration = pipeline::apply(
            &tasks,
            &CompletionMap::new(),
            &pipeline::FilterOptions {
                sort: pipeline::SortKey::DurationAsc,
                ..Default::default()
            },
        );
        assert_eq!(by_duration[0].order, 2);
    }

    #[test]
    fn test_week_numbers() {
        let tasks = vec![
            task(1, None, Some(5)),
            task(2, None, Some(2)),
            task(3, None, Some(3)),
            task(4, None, Some(6)),
        ];
        let timeline = build(&tasks);
        let weeks: Vec<(u32, u32)> = timeline
            .entries
            .iter()
            .map(|e| (e.start_week, e.end_week))
            .collect();

        // [0,5) [5,7) [7,10) [10,16)
        assert_eq!(weeks, vec![(1, 1), (1, 1), (2, 2), (2, 3)]);
        assert_eq!(timeline.total_weeks, 3);
    }

    #[test]
    fn test_week_grouping() {
        let tasks = vec![task(1, None, Some(5)), task(2, None, Some(4)), task(3, None, Some(1))];
        let timeline = build(&tasks);
        let weeks = timeline.weeks();

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].first_day, 1);
        assert_eq!(weeks[0].last_day, 7);
        assert_eq!(weeks[0].tasks, vec![1, 2]);
        assert_eq!(weeks[1].first_day, 8);
        assert_eq!(weeks[1].last_day, 10);
        assert_eq!(weeks[1].tasks, vec![2, 3]);
    }

    #[test]
    fn test_long_task_lists_only_boundary_weeks() {
        let tasks = vec![task(1, None, Some(2)), task(2, None, Some(70_000_000))];
        let timeline = build(&tasks);
        let weeks = timeline.weeks();

        assert_eq!(timeline.total_weeks, 10_000_001);
        let numbers: Vec<u32> = weeks.iter().map(|week| week.number).collect();
        assert_eq!(numbers, vec![1, 10_000_001]);
        assert_eq!(weeks[0].tasks, vec![1, 2]);
        assert_eq!(weeks[1].tasks, vec![2]);
        assert_eq!(weeks[1].last_day, 70_000_002);
    }

    #[test]
    fn test_saturated_schedule_stays_in_range() {
        let tasks = vec![task(1, None, Some(3_000_000_000)), task(2, None, Some(3_000_000_000))];
        let timeline = build(&tasks);

        assert_eq!(timeline.total_days, u32::MAX);
        let weeks = timeline.weeks();
        assert!(weeks.len() <= 4);
        assert!(weeks.iter().all(|week| week.first_day <= week.last_day));

        let summary = stats::aggregate(&tasks, &CompletionMap::new());
        assert_eq!(summary.total_days, u32::MAX);
    }

    #[test]
    fn test_critical_path_and_buckets() {
        let tasks = vec![
            task(1, None, Some(2)),
            task(2, Some(1), Some(3)),
            task(3, Some(2), Some(5)),
            task(4, None, Some(6)),
        ];
        let timeline = build(&tasks);

        let critical: Vec<u32> = timeline.critical_path().iter().map(|e| e.task.order).collect();
        assert_eq!(critical, vec![2, 3]);

        let buckets: Vec<DurationBucket> = timeline.entries.iter().map(|e| e.bucket).collect();
        assert_eq!(
            buckets,
            vec![
                DurationBucket::Short,
                DurationBucket::Medium,
                DurationBucket::Medium,
                DurationBucket::Long
            ]
        );
    }

    #[test]
    fn test_date_range_offsets_from_today() {
        let timeline = build(&[task(1, None, Some(3)), task(2, None, Some(2))]);
        let today = jiff::civil::date(2024, 2, 27);

        let (start, end) = timeline.entries[0].date_range(today).unwrap();
        assert_eq!(start, jiff::civil::date(2024, 2, 27));
        assert_eq!(end, jiff::civil::date(2024, 2, 29));

        let (start, end) = timeline.entries[1].date_range(today).unwrap();
        assert_eq!(start, jiff::civil::date(2024, 3, 1));
        assert_eq!(end, jiff::civil::date(2024, 3, 2));
    }
}
