use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Highest stored priority level. 0 means "no priority".
pub const MAX_PRIORITY: u8 = 3;

/// A single task, fully resolved against its containing list.
///
/// Tasks are immutable inputs to the rest of the program: the store builds
/// them once at load time and everything downstream borrows or clones.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Store-wide unique index, assigned in the task files.
    pub index: u64,
    /// Name of the containing list (the task file's stem).
    pub list: String,
    pub name: String,
    /// 0 = none, 1..=3 increasing urgency. Meaningful only while active.
    pub priority: u8,
    /// Only the count is rendered.
    pub notes: Vec<String>,
    pub tags: Vec<String>,
    /// Meaningful only while active.
    pub due: Option<DateTime<Utc>>,
    /// Presence marks the task as done.
    pub completed: Option<DateTime<Utc>>,
}

impl Task {
    /// Returns true if this task has been completed.
    pub fn is_done(&self) -> bool {
        self.completed.is_some()
    }
}

/// The on-disk shape of a task inside a `<list>.yml` file.
///
/// The list name is not stored per task; the store injects it from the
/// file stem, so a task always belongs to exactly one list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TaskRecord {
    pub index: u64,
    pub name: String,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Resolve this record into a [`Task`] belonging to `list`.
    pub fn into_task(self, list: &str) -> Task {
        Task {
            index: self.index,
            list: list.to_string(),
            name: self.name,
            priority: self.priority,
            notes: self.notes,
            tags: self.tags,
            due: self.due,
            completed: self.completed,
        }
    }
}
