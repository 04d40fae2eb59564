use crate::ops::board::{PriorityFilter, SortKey};
use crate::storage::kv::KvStore;

/// Keys holding the last-used sort key and priority filter as plain strings.
pub const SORT_KEY: &str = "taskflow.sort";
pub const FILTER_KEY: &str = "taskflow.filter";

/// Load the persisted sort key. Absent or unrecognized values fall back to
/// the default (`priority-high-low`).
pub fn load_sort<S: KvStore>(kv: &S) -> SortKey {
    kv.get(SORT_KEY)
        .and_then(|s| SortKey::parse(&s))
        .unwrap_or_default()
}

/// Persist the sort key. A failed write only costs the preference.
pub fn save_sort<S: KvStore>(kv: &mut S, sort: SortKey) {
    let _ = kv.set(SORT_KEY, sort.as_str());
}

/// Load the persisted priority filter, falling back to `ALL`.
pub fn load_filter<S: KvStore>(kv: &S) -> PriorityFilter {
    kv.get(FILTER_KEY)
        .and_then(|s| PriorityFilter::parse(&s))
        .unwrap_or_default()
}

pub fn save_filter<S: KvStore>(kv: &mut S, filter: PriorityFilter) {
    let _ = kv.set(FILTER_KEY, filter.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskPriority;
    use crate::storage::kv::MemoryKv;

    #[test]
    fn prefs_round_trip() {
        let mut kv = MemoryKv::new();
        save_sort(&mut kv, SortKey::TitleAsc);
        save_filter(&mut kv, PriorityFilter::Only(TaskPriority::High));

        assert_eq!(load_sort(&kv), SortKey::TitleAsc);
        assert_eq!(load_filter(&kv), PriorityFilter::Only(TaskPriority::High));
    }

    #[test]
    fn absent_prefs_fall_back_to_defaults() {
        let kv = MemoryKv::new();
        assert_eq!(load_sort(&kv), SortKey::PriorityHighLow);
        assert_eq!(load_filter(&kv), PriorityFilter::All);
    }

    #[test]
    fn garbage_prefs_fall_back_to_defaults() {
        let mut kv = MemoryKv::new();
        kv.set(SORT_KEY, "by-vibes").unwrap();
        kv.set(FILTER_KEY, "URGENT").unwrap();

        assert_eq!(load_sort(&kv), SortKey::PriorityHighLow);
        assert_eq!(load_filter(&kv), PriorityFilter::All);
    }
}
