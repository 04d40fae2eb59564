use std::collections::HashSet;

use indexmap::IndexMap;

use crate::model::task::{Task, TaskPriority, TaskStatus};

/// Default number of cards a collapsed column shows.
pub const DEFAULT_COLUMN_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Sort keys and filters
// ---------------------------------------------------------------------------

/// How tasks are ordered within each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    PriorityHighLow,
    PriorityLowHigh,
    DateNewest,
    DateOldest,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::PriorityHighLow,
        SortKey::PriorityLowHigh,
        SortKey::DateNewest,
        SortKey::DateOldest,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    /// Stable name used for preference persistence.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriorityHighLow => "priority-high-low",
            SortKey::PriorityLowHigh => "priority-low-high",
            SortKey::DateNewest => "date-newest",
            SortKey::DateOldest => "date-oldest",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
        }
    }

    pub fn parse(s: &str) -> Option<SortKey> {
        SortKey::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Short label for the status row.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::PriorityHighLow => "priority high→low",
            SortKey::PriorityLowHigh => "priority low→high",
            SortKey::DateNewest => "newest first",
            SortKey::DateOldest => "oldest first",
            SortKey::TitleAsc => "title a→z",
            SortKey::TitleDesc => "title z→a",
        }
    }

    /// The next key in cycle order (the `s` keybinding).
    pub fn next(self) -> SortKey {
        let idx = SortKey::ALL.iter().position(|k| *k == self).unwrap_or(0);
        SortKey::ALL[(idx + 1) % SortKey::ALL.len()]
    }
}

/// Which priorities pass the board filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(TaskPriority),
}

impl PriorityFilter {
    pub fn keeps(self, priority: TaskPriority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(p) => p == priority,
        }
    }

    /// Stable name used for preference persistence (`ALL` or a priority).
    pub fn as_str(self) -> &'static str {
        match self {
            PriorityFilter::All => "ALL",
            PriorityFilter::Only(p) => p.as_str(),
        }
    }

    pub fn parse(s: &str) -> Option<PriorityFilter> {
        if s == "ALL" {
            return Some(PriorityFilter::All);
        }
        TaskPriority::parse(s).map(PriorityFilter::Only)
    }

    /// The next filter in cycle order (the `p` keybinding).
    pub fn next(self) -> PriorityFilter {
        match self {
            PriorityFilter::All => PriorityFilter::Only(TaskPriority::Low),
            PriorityFilter::Only(TaskPriority::Low) => PriorityFilter::Only(TaskPriority::Medium),
            PriorityFilter::Only(TaskPriority::Medium) => PriorityFilter::Only(TaskPriority::High),
            PriorityFilter::Only(TaskPriority::High) => PriorityFilter::All,
        }
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Inputs to the board derivation, owned by the interaction surface.
#[derive(Debug, Clone)]
pub struct BoardQuery {
    pub search: String,
    pub filter: PriorityFilter,
    pub sort: SortKey,
    /// Columns showing their full contents instead of the capped prefix
    pub expanded: HashSet<TaskStatus>,
    pub column_limit: usize,
}

impl Default for BoardQuery {
    fn default() -> Self {
        BoardQuery {
            search: String::new(),
            filter: PriorityFilter::All,
            sort: SortKey::default(),
            expanded: HashSet::new(),
            column_limit: DEFAULT_COLUMN_LIMIT,
        }
    }
}

/// One derived column: the visible (possibly capped) slice plus the
/// pre-cap total, so the UI can show "+N more".
#[derive(Debug)]
pub struct ColumnView<'a> {
    pub status: TaskStatus,
    pub visible: Vec<&'a Task>,
    pub total: usize,
}

impl ColumnView<'_> {
    pub fn hidden(&self) -> usize {
        self.total - self.visible.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.visible.len() < self.total
    }
}

/// Derive the per-column board view. Pure: filter → group → stable sort →
/// cap, in that order, with no clock reads and no randomness.
pub fn derive<'a>(tasks: &'a [Task], query: &BoardQuery) -> IndexMap<TaskStatus, ColumnView<'a>> {
    let mut columns = IndexMap::with_capacity(TaskStatus::ALL.len());

    for status in TaskStatus::ALL {
        let mut bucket: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.status == status)
            .filter(|t| matches_search(t, &query.search))
            .filter(|t| query.filter.keeps(t.priority))
            .collect();

        sort_bucket(&mut bucket, query.sort);

        let total = bucket.len();
        if !query.expanded.contains(&status) && total > query.column_limit {
            bucket.truncate(query.column_limit);
        }

        columns.insert(
            status,
            ColumnView {
                status,
                visible: bucket,
                total,
            },
        );
    }

    columns
}

/// Case-insensitive substring match against title or description. An empty
/// term keeps everything; an absent description is simply not a match.
fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

fn sort_bucket(bucket: &mut [&Task], sort: SortKey) {
    // sort_by is stable: ties keep their prior relative order
    match sort {
        SortKey::PriorityHighLow => {
            bucket.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
        }
        SortKey::PriorityLowHigh => {
            bucket.sort_by(|a, b| a.priority.rank().cmp(&b.priority.rank()));
        }
        SortKey::DateNewest => bucket.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::DateOldest => bucket.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::TitleAsc => bucket.sort_by(|a, b| title_cmp(a, b)),
        SortKey::TitleDesc => bucket.sort_by(|a, b| title_cmp(b, a)),
    }
}

/// Case-insensitive title ordering with a raw tiebreak so the comparison
/// stays a total order.
fn title_cmp(a: &Task, b: &Task) -> std::cmp::Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
