use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which board column a task lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    /// All statuses in board column order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done];

    /// The stored wire name (`TODO`, `DOING`, `DONE`)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::Doing => "DOING",
            TaskStatus::Done => "DONE",
        }
    }

    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "TODO" => Some(TaskStatus::Todo),
            "DOING" => Some(TaskStatus::Doing),
            "DONE" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] =
        [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    /// Numeric rank used by priority sorting (HIGH=3, MEDIUM=2, LOW=1)
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::High => 3,
            TaskPriority::Medium => 2,
            TaskPriority::Low => 1,
        }
    }

    /// The stored wire name (`LOW`, `MEDIUM`, `HIGH`)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
        }
    }

    pub fn parse(s: &str) -> Option<TaskPriority> {
        match s {
            "LOW" => Some(TaskPriority::Low),
            "MEDIUM" => Some(TaskPriority::Medium),
            "HIGH" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

/// A task record as persisted and displayed.
///
/// Field names follow the stored JSON format: camelCase keys with
/// UPPERCASE status/priority values, e.g.
/// `{"id","title","status":"TODO","priority":"HIGH","createdAt",...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique id, assigned at creation, immutable
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Stamped on every mutation after creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Materialize a draft into a full task with a fresh id and creation
    /// timestamp.
    pub fn from_draft(draft: TaskDraft) -> Task {
        Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// A task payload submitted for creation, lacking the generated fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        TaskDraft {
            title: String::new(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: None,
        }
    }
}

/// A field-level partial update. `None` leaves the field untouched; for the
/// optional fields the inner `Option` distinguishes "set" from "clear".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// A patch carrying every editable field of a draft (edit-form submit).
    pub fn from_draft(draft: TaskDraft) -> TaskPatch {
        TaskPatch {
            title: Some(draft.title),
            description: Some(draft.description),
            status: Some(draft.status),
            priority: Some(draft.priority),
            due_date: Some(draft.due_date),
        }
    }

    /// A patch that only changes the status (drop target of drag gestures).
    pub fn status(status: TaskStatus) -> TaskPatch {
        TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        }
    }

    /// Merge the present fields into `task`.
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names_round_trip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("PARKED"), None);
    }

    #[test]
    fn priority_rank_ordering() {
        assert!(TaskPriority::High.rank() > TaskPriority::Medium.rank());
        assert!(TaskPriority::Medium.rank() > TaskPriority::Low.rank());
    }

    #[test]
    fn serde_uses_stored_field_names() {
        let task = Task {
            id: "t1".into(),
            title: "Ship release".into(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            due_date: None,
            created_at: "2026-01-08T10:00:00Z".parse().unwrap(),
            updated_at: None,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "TODO");
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["createdAt"], "2026-01-08T10:00:00Z");
        // Absent optionals are omitted entirely
        assert!(json.get("description").is_none());
        assert!(json.get("dueDate").is_none());
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn from_draft_assigns_fresh_ids() {
        let a = Task::from_draft(TaskDraft {
            title: "one".into(),
            ..TaskDraft::default()
        });
        let b = Task::from_draft(TaskDraft {
            title: "two".into(),
            ..TaskDraft::default()
        });
        assert_ne!(a.id, b.id);
        assert!(a.updated_at.is_none());
    }

    #[test]
    fn patch_apply_merges_present_fields() {
        let mut task = Task::from_draft(TaskDraft {
            title: "before".into(),
            description: Some("desc".into()),
            ..TaskDraft::default()
        });
        TaskPatch {
            title: Some("after".into()),
            description: Some(None),
            ..TaskPatch::default()
        }
        .apply(&mut task);
        assert_eq!(task.title, "after");
        assert_eq!(task.description, None);
        // Untouched fields survive
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn status_patch_only_touches_status() {
        let mut task = Task::from_draft(TaskDraft {
            title: "move me".into(),
            priority: TaskPriority::High,
            ..TaskDraft::default()
        });
        TaskPatch::status(TaskStatus::Done).apply(&mut task);
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.title, "move me");
    }
}
