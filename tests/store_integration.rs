//! Integration tests for the task store, the persistence adapter, and the
//! board derivation working together against both store implementations.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use taskflow::model::task::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
use taskflow::ops::board::{BoardQuery, PriorityFilter, SortKey, derive};
use taskflow::storage::STORE_FILE;
use taskflow::storage::kv::{FileKv, KvStore, MemoryKv};
use taskflow::storage::log::read_events;
use taskflow::storage::prefs;
use taskflow::storage::tasks::{TASKS_KEY, seed_tasks};
use taskflow::store::TaskStore;

fn draft(title: &str, status: TaskStatus, priority: TaskPriority) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: None,
        status,
        priority,
        due_date: None,
    }
}

/// The operations replayed by the determinism test.
enum Op {
    Create(&'static str, TaskStatus, TaskPriority),
    Retitle(usize, &'static str),
    Move(usize, TaskStatus),
    Delete(usize),
    DeleteMissing,
}

fn replay(ops: &[Op]) -> Vec<Task> {
    let tmp = TempDir::new().unwrap();
    let mut kv = MemoryKv::new();
    kv.set(TASKS_KEY, "[]").unwrap();
    let mut store = TaskStore::open(kv, tmp.path());
    let mut ids: Vec<String> = Vec::new();

    for op in ops {
        match op {
            Op::Create(title, status, priority) => {
                ids.push(store.create(draft(title, *status, *priority)).id);
            }
            Op::Retitle(idx, title) => store.update(
                &ids[*idx],
                TaskPatch {
                    title: Some(title.to_string()),
                    ..TaskPatch::default()
                },
            ),
            Op::Move(idx, status) => store.change_status(&ids[*idx], *status),
            Op::Delete(idx) => store.delete(&ids[*idx]),
            Op::DeleteMissing => store.delete("no-such-id"),
        }
    }

    store.tasks().to_vec()
}

/// What two replays must agree on (ids and timestamps are freshly
/// generated each run).
fn shape(tasks: &[Task]) -> Vec<(String, TaskStatus, TaskPriority)> {
    tasks
        .iter()
        .map(|t| (t.title.clone(), t.status, t.priority))
        .collect()
}

#[test]
fn replaying_the_same_operations_yields_the_same_collection() {
    let ops = [
        Op::Create("write the parser", TaskStatus::Todo, TaskPriority::High),
        Op::Create("fix the flaky test", TaskStatus::Doing, TaskPriority::Low),
        Op::Create("ship the release", TaskStatus::Todo, TaskPriority::Medium),
        Op::Move(0, TaskStatus::Done),
        Op::Retitle(2, "ship the 1.0 release"),
        Op::DeleteMissing,
        Op::Delete(1),
        Op::Move(0, TaskStatus::Doing),
    ];

    assert_eq!(shape(&replay(&ops)), shape(&replay(&ops)));
}

#[test]
fn first_open_seeds_two_todo_one_doing_two_done() {
    let tmp = TempDir::new().unwrap();
    let store = TaskStore::open(MemoryKv::new(), tmp.path());

    assert_eq!(store.len(), 5);
    assert_eq!(store.count_by_status(TaskStatus::Todo), 2);
    assert_eq!(store.count_by_status(TaskStatus::Doing), 1);
    assert_eq!(store.count_by_status(TaskStatus::Done), 2);
}

#[test]
fn collection_survives_reopen_through_the_file_store() {
    let tmp = TempDir::new().unwrap();
    let store_path = tmp.path().join(STORE_FILE);

    let created = {
        let kv = FileKv::open(&store_path);
        let mut store = TaskStore::open(kv, tmp.path());
        let created = store.create(draft(
            "survives a restart",
            TaskStatus::Doing,
            TaskPriority::High,
        ));
        let first_seed_id = store.tasks()[0].id.clone();
        store.delete(&first_seed_id);
        created
    };

    let reopened = TaskStore::open(FileKv::open(&store_path), tmp.path());
    assert_eq!(reopened.len(), 5); // 5 seed - 1 deleted + 1 created
    let task = reopened.get_by_id(&created.id).unwrap();
    assert_eq!(task.title, "survives a restart");
    assert_eq!(task.status, TaskStatus::Doing);
    assert_eq!(task.created_at, created.created_at);
}

#[test]
fn corrupt_stored_collection_recovers_with_seed_and_logs() {
    let tmp = TempDir::new().unwrap();
    let store_path = tmp.path().join(STORE_FILE);

    // A readable kv file whose tasks value is garbage
    {
        let mut kv = FileKv::open(&store_path);
        kv.set(TASKS_KEY, "][ definitely not json").unwrap();
    }

    let store = TaskStore::open(FileKv::open(&store_path), tmp.path());
    assert_eq!(store.tasks(), seed_tasks().as_slice());

    let events = read_events(tmp.path(), None);
    assert_eq!(events.len(), 1);
    assert!(events[0].description.contains("unreadable"));
}

#[test]
fn status_change_moves_the_card_in_the_next_derivation() {
    // A status change must move the card on the very next derivation
    let tmp = TempDir::new().unwrap();
    let mut store = TaskStore::open(MemoryKv::new(), tmp.path());
    let id = store
        .list_by_status(TaskStatus::Todo)
        .first()
        .map(|t| t.id.clone())
        .unwrap();

    let query = BoardQuery::default();
    let before = derive(store.tasks(), &query);
    let todo_before = before[&TaskStatus::Todo].total;
    let done_before = before[&TaskStatus::Done].total;
    drop(before);

    store.change_status(&id, TaskStatus::Done);

    let after = derive(store.tasks(), &query);
    assert_eq!(after[&TaskStatus::Todo].total, todo_before - 1);
    assert_eq!(after[&TaskStatus::Done].total, done_before + 1);
    assert!(after[&TaskStatus::Done].visible.iter().any(|t| t.id == id));
}

#[test]
fn derived_buckets_only_narrow_under_filters() {
    let tmp = TempDir::new().unwrap();
    let mut store = TaskStore::open(MemoryKv::new(), tmp.path());
    for i in 0..6 {
        store.create(draft(
            &format!("extra task {}", i),
            TaskStatus::ALL[i % 3],
            TaskPriority::ALL[i % 3],
        ));
    }

    let unfiltered = derive(store.tasks(), &BoardQuery {
        expanded: HashSet::from(TaskStatus::ALL),
        ..BoardQuery::default()
    });
    let filtered = derive(store.tasks(), &BoardQuery {
        expanded: HashSet::from(TaskStatus::ALL),
        search: "task".into(),
        filter: PriorityFilter::Only(TaskPriority::Medium),
        ..BoardQuery::default()
    });

    for status in TaskStatus::ALL {
        let unfiltered_ids: Vec<&str> = unfiltered[&status]
            .visible
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        for task in &filtered[&status].visible {
            assert!(unfiltered_ids.contains(&task.id.as_str()));
        }
    }
}

#[test]
fn sort_and_filter_preferences_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    let store_path = tmp.path().join(STORE_FILE);

    {
        let mut kv = FileKv::open(&store_path);
        prefs::save_sort(&mut kv, SortKey::DateOldest);
        prefs::save_filter(&mut kv, PriorityFilter::Only(TaskPriority::High));
    }

    let kv = FileKv::open(&store_path);
    assert_eq!(prefs::load_sort(&kv), SortKey::DateOldest);
    assert_eq!(
        prefs::load_filter(&kv),
        PriorityFilter::Only(TaskPriority::High)
    );
}

#[test]
fn quota_exceeded_flush_keeps_session_state() {
    let tmp = TempDir::new().unwrap();
    let mut kv = MemoryKv::with_capacity(2048);
    kv.set(TASKS_KEY, "[]").unwrap();
    let mut store = TaskStore::open(kv, tmp.path());

    // Fill until a flush fails; the store must keep serving its in-memory
    // collection regardless
    let mut created = 0usize;
    for i in 0..50 {
        store.create(draft(
            &format!("task number {}", i),
            TaskStatus::Todo,
            TaskPriority::Low,
        ));
        created += 1;
    }
    assert_eq!(store.len(), created);

    // At least one write failed and was recorded
    let events = read_events(tmp.path(), None);
    assert!(!events.is_empty());
}
