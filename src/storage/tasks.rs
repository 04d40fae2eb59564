use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};

use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::storage::kv::KvStore;
use crate::storage::log::{self, EventCategory, EventEntry};

/// Namespaced key holding the serialized task collection.
pub const TASKS_KEY: &str = "taskflow.tasks";

/// How much of a corrupt payload gets copied into the event log.
const CORRUPT_SAMPLE_CHARS: usize = 512;

fn seed_time(day: u32, hour: u32) -> DateTime<Utc> {
    // Fixed timestamps; .single() cannot be ambiguous for UTC
    Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0)
        .single()
        .expect("fixed seed timestamp")
}

fn seed_task(
    id: &str,
    title: &str,
    description: &str,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: DateTime<Utc>,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        status,
        priority,
        due_date: None,
        created_at,
        updated_at: None,
    }
}

/// The example collection materialized when no stored data exists:
/// five tasks spanning all three columns and all three priorities.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        seed_task(
            "1",
            "Set up the project scaffold",
            "Toolchain, formatting and dependency baseline",
            TaskStatus::Done,
            TaskPriority::High,
            seed_time(8, 10),
        ),
        seed_task(
            "2",
            "Define the task data model",
            "Task record plus status and priority enums",
            TaskStatus::Done,
            TaskPriority::High,
            seed_time(8, 11),
        ),
        seed_task(
            "3",
            "Build the task store",
            "CRUD over the persisted collection",
            TaskStatus::Doing,
            TaskPriority::Medium,
            seed_time(9, 9),
        ),
        seed_task(
            "4",
            "Implement the kanban board",
            "Three columns with pick-up-and-drop moves",
            TaskStatus::Todo,
            TaskPriority::Medium,
            seed_time(9, 10),
        ),
        seed_task(
            "5",
            "Write the unit tests",
            "Cover the store and the board engine",
            TaskStatus::Todo,
            TaskPriority::Low,
            seed_time(9, 11),
        ),
    ]
}

/// Load the task collection from storage.
///
/// A missing key materializes the seed collection and writes it back
/// immediately. Unreadable content is recorded in the event log and the
/// seed is returned. This function never fails and never panics.
pub fn load_tasks<S: KvStore>(kv: &mut S, data_dir: &Path) -> Vec<Task> {
    let Some(raw) = kv.get(TASKS_KEY) else {
        let seed = seed_tasks();
        save_tasks(kv, data_dir, &seed);
        return seed;
    };

    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => tasks,
        Err(e) => {
            let sample: String = raw.chars().take(CORRUPT_SAMPLE_CHARS).collect();
            log::log_event(
                data_dir,
                EventEntry::new(EventCategory::Read, "stored tasks unreadable")
                    .field("Key", TASKS_KEY)
                    .field("Error", e.to_string())
                    .body(sample),
            );
            seed_tasks()
        }
    }
}

/// Serialize the full collection and overwrite the stored value. A failed
/// write is recorded in the event log and otherwise ignored: the in-memory
/// collection stays authoritative for the session.
pub fn save_tasks<S: KvStore>(kv: &mut S, data_dir: &Path, tasks: &[Task]) {
    let serialized = match serde_json::to_string(tasks) {
        Ok(s) => s,
        Err(e) => {
            log::log_event(
                data_dir,
                EventEntry::new(EventCategory::Write, "could not serialize tasks")
                    .field("Key", TASKS_KEY)
                    .field("Error", e.to_string()),
            );
            return;
        }
    };

    if let Err(e) = kv.set(TASKS_KEY, &serialized) {
        log::log_event(
            data_dir,
            EventEntry::new(EventCategory::Write, "could not flush tasks")
                .field("Key", TASKS_KEY)
                .field("Error", e.to_string()),
        );
    }
}

/// Remove the stored collection entirely.
pub fn clear_tasks<S: KvStore>(kv: &mut S) {
    let _ = kv.remove(TASKS_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryKv;
    use tempfile::TempDir;

    #[test]
    fn seed_spans_statuses_and_priorities() {
        let seed = seed_tasks();
        assert_eq!(seed.len(), 5);
        let done = seed.iter().filter(|t| t.status == TaskStatus::Done).count();
        let doing = seed.iter().filter(|t| t.status == TaskStatus::Doing).count();
        let todo = seed.iter().filter(|t| t.status == TaskStatus::Todo).count();
        assert_eq!((todo, doing, done), (2, 1, 2));
        assert!(seed.iter().any(|t| t.priority == TaskPriority::Low));
        assert!(seed.iter().any(|t| t.priority == TaskPriority::High));
    }

    #[test]
    fn load_missing_key_seeds_and_writes_back() {
        let tmp = TempDir::new().unwrap();
        let mut kv = MemoryKv::new();

        let tasks = load_tasks(&mut kv, tmp.path());
        assert_eq!(tasks, seed_tasks());
        // Seed was persisted immediately
        let raw = kv.get(TASKS_KEY).unwrap();
        let stored: Vec<Task> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, seed_tasks());
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let mut kv = MemoryKv::new();

        let mut tasks = seed_tasks();
        tasks.truncate(2);
        save_tasks(&mut kv, tmp.path(), &tasks);

        assert_eq!(load_tasks(&mut kv, tmp.path()), tasks);
    }

    #[test]
    fn load_corrupt_content_returns_seed_and_logs() {
        let tmp = TempDir::new().unwrap();
        let mut kv = MemoryKv::new();
        kv.set(TASKS_KEY, "not an array {{{").unwrap();

        let tasks = load_tasks(&mut kv, tmp.path());
        assert_eq!(tasks, seed_tasks());

        let events = log::read_events(tmp.path(), None);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, EventCategory::Read);
        assert!(events[0].body.contains("not an array"));
    }

    #[test]
    fn load_wrong_shape_returns_seed() {
        let tmp = TempDir::new().unwrap();
        let mut kv = MemoryKv::new();
        kv.set(TASKS_KEY, r#"{"an":"object"}"#).unwrap();

        assert_eq!(load_tasks(&mut kv, tmp.path()), seed_tasks());
    }

    #[test]
    fn save_failure_is_logged_not_propagated() {
        let tmp = TempDir::new().unwrap();
        let mut kv = MemoryKv::with_capacity(16);

        save_tasks(&mut kv, tmp.path(), &seed_tasks());

        // Nothing stored, but the failure was recorded
        assert_eq!(kv.get(TASKS_KEY), None);
        let events = log::read_events(tmp.path(), None);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, EventCategory::Write);
    }

    #[test]
    fn clear_removes_key() {
        let tmp = TempDir::new().unwrap();
        let mut kv = MemoryKv::new();
        load_tasks(&mut kv, tmp.path());
        clear_tasks(&mut kv);
        assert_eq!(kv.get(TASKS_KEY), None);
    }
}
