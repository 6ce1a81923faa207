//! Local task store: a directory of per-list YAML files.
//!
//! Each `<list>.yml` file holds a YAML sequence of task records; the file
//! stem is the list name. Loading uses batch error collection - every IO,
//! parse, and record error across the whole directory is gathered and
//! returned together rather than failing on the first one.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::filter::Filter;
use crate::task::{Task, TaskRecord, MAX_PRIORITY};

/// A record-level problem found after parsing succeeded.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("task {index} '{name}': priority {priority} out of range (0..={max})", max = MAX_PRIORITY)]
    PriorityOutOfRange {
        index: u64,
        name: String,
        priority: u8,
    },

    #[error("duplicate index {index} (lists '{first}' and '{second}')")]
    DuplicateIndex {
        index: u64,
        first: String,
        second: String,
    },

    #[error("task {index} has an empty name (list '{list}')")]
    EmptyName { index: u64, list: String },
}

/// Collects all errors found while reading a store directory.
#[derive(Debug, Default)]
pub struct StoreReadError {
    pub io_errors: Vec<(PathBuf, std::io::Error)>,
    pub parse_errors: Vec<(PathBuf, serde_yaml::Error)>,
    pub record_errors: Vec<RecordError>,
}

impl StoreReadError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.io_errors.is_empty() && self.parse_errors.is_empty() && self.record_errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.io_errors.len() + self.parse_errors.len() + self.record_errors.len()
    }
}

impl std::fmt::Display for StoreReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Found {} error(s) while reading the task store:",
            self.error_count()
        )?;

        for (path, error) in &self.io_errors {
            writeln!(f, "  IO error in {}: {}", path.display(), error)?;
        }

        for (path, error) in &self.parse_errors {
            writeln!(f, "  Parse error in {}: {}", path.display(), error)?;
        }

        for error in &self.record_errors {
            writeln!(f, "  Invalid record: {}", error)?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreReadError {}

/// An in-memory snapshot of every task in the store directory.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Load a store from a directory of `<list>.yml` files.
    ///
    /// Files are read in sorted path order so the loaded set is stable.
    /// Returns every error found across the directory, not just the first.
    pub fn load(dir: &Path) -> Result<Self, StoreReadError> {
        let mut errors = StoreReadError::new();
        let mut tasks: Vec<Task> = Vec::new();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                errors.io_errors.push((dir.to_path_buf(), e));
                return Err(errors);
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .is_some_and(|ext| ext == "yml" || ext == "yaml")
            })
            // The settings file shares the store directory.
            .filter(|p| p.file_stem().is_none_or(|s| s != "config"))
            .collect();
        paths.sort();

        for path in paths {
            let Some(list) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let list = list.to_string();

            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    errors.io_errors.push((path, e));
                    continue;
                }
            };

            match serde_yaml::from_str::<Vec<TaskRecord>>(&content) {
                Ok(records) => {
                    tasks.extend(records.into_iter().map(|r| r.into_task(&list)));
                }
                Err(e) => {
                    errors.parse_errors.push((path, e));
                }
            }
        }

        validate_records(&tasks, &mut errors);

        if errors.is_empty() {
            Ok(Self { tasks })
        } else {
            Err(errors)
        }
    }

    /// All tasks matching `filter`, cloned out of the store.
    ///
    /// The returned batch is owned by the caller; the renderer downstream
    /// never sees or mutates the store itself.
    pub fn tasks(&self, filter: &Filter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Check store-wide invariants: unique indices, priorities in range,
/// non-empty names. Appends every violation to `errors`.
fn validate_records(tasks: &[Task], errors: &mut StoreReadError) {
    let mut seen: std::collections::HashMap<u64, &str> = std::collections::HashMap::new();

    for task in tasks {
        if let Some(first) = seen.insert(task.index, &task.list) {
            errors.record_errors.push(RecordError::DuplicateIndex {
                index: task.index,
                first: first.to_string(),
                second: task.list.clone(),
            });
        }

        if task.priority > MAX_PRIORITY {
            errors.record_errors.push(RecordError::PriorityOutOfRange {
                index: task.index,
                name: task.name.clone(),
                priority: task.priority,
            });
        }

        if task.name.trim().is_empty() {
            errors.record_errors.push(RecordError::EmptyName {
                index: task.index,
                list: task.list.clone(),
            });
        }
    }
}
