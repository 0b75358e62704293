//! Structural diagnostics for task lists.
//!
//! None of the engine components call into this module; they accept
//! malformed dependency references and keep scheduling sequentially. The plan
//! store uses it to refuse plans that cannot be displayed sensibly.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use super::Task;

/// A structural problem found in a task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanIssue {
    /// A task has order 0; orders start at 1
    ZeroOrder,
    /// Two or more tasks share this order number
    DuplicateOrder(u32),
    /// The task with this order depends on itself
    SelfDependency(u32),
    /// The task depends on an order no task has
    UnresolvedDependency { order: u32, depends_on: u32 },
    /// The orders form a dependency loop, smallest order first
    DependencyCycle(Vec<u32>),
}

impl PlanIssue {
    /// Whether the issue makes the plan unfit for storage.
    ///
    /// Unresolved references are tolerated everywhere.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PlanIssue::UnresolvedDependency { .. })
    }
}

impl fmt::Display for PlanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanIssue::ZeroOrder => write!(f, "order 0 is not allowed, orders start at 1"),
            PlanIssue::DuplicateOrder(order) => write!(f, "order {order} is used more than once"),
            PlanIssue::SelfDependency(order) => write!(f, "task {order} depends on itself"),
            PlanIssue::UnresolvedDependency { order, depends_on } => {
                write!(f, "task {order} depends on missing task {depends_on}")
            }
            PlanIssue::DependencyCycle(orders) => {
                let chain: Vec<String> = orders.iter().map(u32::to_string).collect();
                write!(f, "dependency cycle between tasks {}", chain.join(" -> "))
            }
        }
    }
}

/// Collects every structural issue in `tasks`, in a deterministic order.
pub fn validate(tasks: &[Task]) -> Vec<PlanIssue> {
    let mut issues = Vec::new();

    if tasks.iter().any(|task| task.order == 0) {
        issues.push(PlanIssue::ZeroOrder);
    }

    let mut seen = HashSet::new();
    let mut duplicates: Vec<u32> = tasks
        .iter()
        .filter(|task| !seen.insert(task.order))
        .map(|task| task.order)
        .collect();
    duplicates.sort_unstable();
    duplicates.dedup();
    issues.extend(duplicates.into_iter().map(PlanIssue::DuplicateOrder));

    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|task| task.order);

    // With duplicate orders the first task wins, matching lookup elsewhere.
    let mut predecessor: HashMap<u32, Option<u32>> = HashMap::new();
    for task in &ordered {
        predecessor.entry(task.order).or_insert(task.depends_on);
    }

    for task in &ordered {
        match task.depends_on {
            Some(dep) if dep == task.order => issues.push(PlanIssue::SelfDependency(task.order)),
            Some(dep) if !predecessor.contains_key(&dep) => {
                issues.push(PlanIssue::UnresolvedDependency {
                    order: task.order,
                    depends_on: dep,
                })
            }
            _ => {}
        }
    }

    let mut reported: HashSet<u32> = HashSet::new();
    for task in &ordered {
        if let Some(cycle) = find_cycle(task.order, &predecessor) {
            if cycle.len() > 1 && !cycle.iter().any(|order| reported.contains(order)) {
                reported.extend(cycle.iter().copied());
                issues.push(PlanIssue::DependencyCycle(cycle));
            }
        }
    }

    issues
}

/// Follows predecessor links from `start`; returns the loop it ends in, if
/// any, rotated so that the smallest order comes first.
fn find_cycle(start: u32, predecessor: &HashMap<u32, Option<u32>>) -> Option<Vec<u32>> {
    let mut path = Vec::new();
    let mut current = start;

    loop {
        if let Some(pos) = path.iter().position(|order| *order == current) {
            let mut cycle: Vec<u32> = path[pos..].to_vec();
            let min_pos = cycle
                .iter()
                .enumerate()
                .min_by_key(|(_, order)| **order)
                .map(|(index, _)| index)
                .unwrap_or(0);
            cycle.rotate_left(min_pos);
            return Some(cycle);
        }
        path.push(current);

        match predecessor.get(&current).copied().flatten() {
            Some(next) if predecessor.contains_key(&next) => current = next,
            _ => return None,
        }
    }
}
