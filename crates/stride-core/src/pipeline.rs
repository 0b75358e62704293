//! Search, filter and sort pipeline over a task collection.
//!
//! [`apply`] always runs the same fixed sequence: the input is put into
//! canonical `order`, then narrowed by the search term, then by the category,
//! and finally sorted by the requested key. Every sort is stable, so ties keep
//! the order produced by the previous stage.
//!
//! ```rust
//! use stride_core::{
//!     models::{CompletionMap, Task},
//!     pipeline::{apply, Category, FilterOptions, SortKey},
//! };
//!
//! let tasks = vec![
//!     Task { estimated_days: Some(5), ..Task::new(1, "Design schema") },
//!     Task { estimated_days: Some(1), depends_on: Some(1), ..Task::new(2, "Write migration") },
//! ];
//!
//! let options = FilterOptions {
//!     category: Category::Quick,
//!     sort: SortKey::DurationAsc,
//!     ..Default::default()
//! };
//! let visible = apply(&tasks, &CompletionMap::new(), &options);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].order, 2);
//! ```

use std::{cmp::Ordering, fmt, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::PlannerError,
    models::{CompletionMap, Task},
};

/// Estimates at or below this many days count as quick.
pub const QUICK_TASK_MAX_DAYS: u32 = 2;

/// Categorical filter applied after the search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// No filtering
    #[default]
    All,
    /// Ticked off in the completion map
    Completed,
    /// Not ticked off in the completion map
    Pending,
    /// No predecessor, can start immediately
    Independent,
    /// Has a predecessor
    Dependent,
    /// Has an estimate of at most two days
    Quick,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Completed => "completed",
            Category::Pending => "pending",
            Category::Independent => "independent",
            Category::Dependent => "dependent",
            Category::Quick => "quick",
        }
    }

    fn matches(&self, task: &Task, completion: &CompletionMap) -> bool {
        match self {
            Category::All => true,
            Category::Completed => completion.is_completed(&task.id),
            Category::Pending => !completion.is_completed(&task.id),
            Category::Independent => task.depends_on.is_none(),
            Category::Dependent => task.depends_on.is_some(),
            Category::Quick => is_quick(task),
        }
    }
}

impl FromStr for Category {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Category::All),
            "completed" => Ok(Category::Completed),
            "pending" => Ok(Category::Pending),
            "independent" => Ok(Category::Independent),
            "dependent" => Ok(Category::Dependent),
            "quick" => Ok(Category::Quick),
            _ => Err(PlannerError::invalid_input("category").with_reason(format!(
                "unknown category '{s}' (expected all, completed, pending, independent, dependent or quick)"
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final ordering of the filtered tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Canonical task order
    #[default]
    Order,
    /// Shortest estimate first, missing estimates count as 0
    DurationAsc,
    /// Longest estimate first, missing estimates count as 0
    DurationDesc,
    /// Alphabetical by title
    Title,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Order => "order",
            SortKey::DurationAsc => "duration-asc",
            SortKey::DurationDesc => "duration-desc",
            SortKey::Title => "title",
        }
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::Order => a.order.cmp(&b.order),
            SortKey::DurationAsc => sort_days(a).cmp(&sort_days(b)),
            SortKey::DurationDesc => sort_days(b).cmp(&sort_days(a)),
            SortKey::Title => collate(&a.title, &b.title),
        }
    }
}

impl FromStr for SortKey {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "order" => Ok(SortKey::Order),
            "duration-asc" => Ok(SortKey::DurationAsc),
            "duration-desc" => Ok(SortKey::DurationDesc),
            "title" => Ok(SortKey::Title),
            _ => Err(PlannerError::invalid_input("sort").with_reason(format!(
                "unknown sort key '{s}' (expected order, duration-asc, duration-desc or title)"
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options controlling [`apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FilterOptions {
    /// Case-insensitive substring matched against title or description;
    /// empty matches everything
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub sort: SortKey,
}

impl FilterOptions {
    /// Whether these options would return the full task list unchanged.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Runs search, category filter and sort over `tasks`.
pub fn apply(tasks: &[Task], completion: &CompletionMap, options: &FilterOptions) -> Vec<Task> {
    let needle = options.search.to_lowercase();

    let mut visible: Vec<&Task> = tasks.iter().collect();
    visible.sort_by_key(|task| task.order);

    let mut visible: Vec<&Task> = visible
        .into_iter()
        .filter(|task| needle.is_empty() || matches_search(task, &needle))
        .filter(|task| options.category.matches(task, completion))
        .collect();

    visible.sort_by(|a, b| options.sort.compare(a, b));
    visible.into_iter().cloned().collect()
}

/// Display-only hint derived from dependency and duration.
///
/// Not to be confused with the stored [`Task::priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityBadge {
    /// No predecessor, can be picked up right away
    HighPriority,
    /// Has a predecessor but takes at most two days
    QuickWin,
}

impl PriorityBadge {
    pub fn label(&self) -> &'static str {
        match self {
            PriorityBadge::HighPriority => "High Priority",
            PriorityBadge::QuickWin => "Quick Win",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PriorityBadge::HighPriority => "🔥",
            PriorityBadge::QuickWin => "⚡",
        }
    }
}

impl fmt::Display for PriorityBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.label())
    }
}

/// Derives the badge shown next to a task in list views.
pub fn priority_badge(task: &Task) -> Option<PriorityBadge> {
    if task.depends_on.is_none() {
        Some(PriorityBadge::HighPriority)
    } else if is_quick(task) {
        Some(PriorityBadge::QuickWin)
    } else {
        None
    }
}

fn is_quick(task: &Task) -> bool {
    task.estimate().is_some_and(|days| days <= QUICK_TASK_MAX_DAYS)
}

fn matches_search(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle) || task.description.to_lowercase().contains(needle)
}

fn sort_days(task: &Task) -> u32 {
    task.estimate().unwrap_or(0)
}

/// Locale-style comparison in three levels: base letters, then accents,
/// then case with lowercase first.
///
/// Only Latin-1 and Latin Extended-A accents are folded to their base
/// letter; other scripts compare by lowercase code point.
fn collate(a: &str, b: &str) -> Ordering {
    let lower = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<char>>();
    let (lower_a, lower_b) = (lower(a), lower(b));

    let base_a = lower_a.iter().copied().map(base_letter);
    let base_b = lower_b.iter().copied().map(base_letter);

    base_a
        .cmp(base_b)
        .then_with(|| lower_a.cmp(&lower_b))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}

/// Strips the accent from a lowercase Latin letter.
fn base_letter(c: char) -> char {
    match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}
