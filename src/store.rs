use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::model::task::{Task, TaskDraft, TaskPatch, TaskStatus};
use crate::storage::kv::KvStore;
use crate::storage::tasks as task_storage;

/// Owns the authoritative in-memory task collection and mirrors it to the
/// key-value store after every mutation. All other components hold derived,
/// read-only views recomputed from `tasks()`.
pub struct TaskStore<S: KvStore> {
    tasks: Vec<Task>,
    kv: S,
    data_dir: PathBuf,
}

impl<S: KvStore> TaskStore<S> {
    /// Hydrate from storage. A first run (or unreadable data) starts from
    /// the seed collection; see `storage::tasks::load_tasks`.
    pub fn open(mut kv: S, data_dir: &Path) -> TaskStore<S> {
        let tasks = task_storage::load_tasks(&mut kv, data_dir);
        TaskStore {
            tasks,
            kv,
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn list_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn count_by_status(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    /// Create a task from a draft (validated upstream by the form), append
    /// it, and flush. Returns the created task.
    pub fn create(&mut self, draft: TaskDraft) -> Task {
        let task = Task::from_draft(draft);
        self.tasks.push(task.clone());
        self.flush();
        task
    }

    /// Merge a patch into the task with the given id, stamping
    /// `updated_at`. Unknown ids are a silent no-op.
    pub fn update(&mut self, id: &str, patch: TaskPatch) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        patch.apply(task);
        task.updated_at = Some(Utc::now());
        self.flush();
    }

    /// Remove the task with the given id if present; absent ids are a
    /// no-op.
    pub fn delete(&mut self, id: &str) {
        self.tasks.retain(|t| t.id != id);
        self.flush();
    }

    /// Status-only update, used as the drop target of drag gestures.
    pub fn change_status(&mut self, id: &str, status: TaskStatus) {
        self.update(id, TaskPatch::status(status));
    }

    /// Wholesale collection replacement (JSON import).
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.flush();
    }

    /// The underlying key-value store, shared with the preference adapter.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    fn flush(&mut self) {
        task_storage::save_tasks(&mut self.kv, &self.data_dir, &self.tasks);
    }
}
