//! File-backed task store.
//!
//! The whole collection lives in one JSON blob on disk, read at open and
//! rewritten on every mutation. The store is an explicitly constructed
//! instance with an injected path -- nothing here is a process-wide
//! singleton. Concurrent writers are last-write-wins by design; there is no
//! locking and no conflict detection.

use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::data_dir;
use crate::error::{CoreError, Result, StoreError};
use crate::task::{validate_title, NewTask, Task, TaskPatch};

const TASKS_FILE: &str = "tasks.json";

/// CRUD over the task collection.
///
/// Mutations persist the new collection to disk before committing it in
/// memory, so a failed write leaves the prior state untouched.
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Open the store at `~/.config/pomotask/tasks.json`.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join(TASKS_FILE);
        Self::open_at(path)
    }

    /// Open the store at an explicit path (tests inject a temp dir here).
    ///
    /// A missing file is an empty collection; a present but unreadable or
    /// malformed file is an error.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tasks = match std::fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| StoreError::OpenFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(StoreError::OpenFailed {
                    path,
                    message: e.to_string(),
                }
                .into())
            }
        };
        Ok(Self { path, tasks })
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// All tasks in insertion order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Create a task with a fresh id and a `createdAt` of now.
    pub fn create(&mut self, new_task: NewTask) -> Result<Task> {
        validate_title(&new_task.title).map_err(StoreError::Invalid)?;

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: new_task.title,
            completed: new_task.completed,
            created_at: Utc::now(),
            priority: new_task.priority,
        };

        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next)?;
        Ok(task)
    }

    /// Apply a partial update to the task with the given id.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<Task> {
        if let Some(title) = &patch.title {
            validate_title(title).map_err(StoreError::Invalid)?;
        }

        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let updated = patch.apply(&self.tasks[index]);
        let mut next = self.tasks.clone();
        next[index] = updated.clone();
        self.commit(next)?;
        Ok(updated)
    }

    /// Remove the task with the given id.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.tasks.len();
        let next: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        if next.len() == before {
            return Err(StoreError::NotFound(id.to_string()).into());
        }
        self.commit(next)
    }

    /// Persist the candidate collection, then swap it in.
    fn commit(&mut self, next: Vec<Task>) -> Result<()> {
        let content = serde_json::to_string_pretty(&next).map_err(CoreError::Json)?;
        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::SaveFailed(e.to_string()))?;
        self.tasks = next;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use tempfile::TempDir;

    fn store() -> (TempDir, TaskStore) {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::open_at(dir.path().join("tasks.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_missing_file_is_empty() {
        let (_dir, store) = store();
        assert!(store.list().is_empty());
    }

    #[test]
    fn create_assigns_id_and_created_at() {
        let (_dir, mut store) = store();
        let task = store
            .create(NewTask::new("Write tests").with_priority(Priority::High))
            .unwrap();
        assert!(!task.id.is_empty());
        assert!(!task.completed);
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn create_rejects_blank_title_without_mutating() {
        let (_dir, mut store) = store();
        assert!(store.create(NewTask::new("   ")).is_err());
        assert!(store.list().is_empty());
    }

    #[test]
    fn tasks_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");

        let mut store = TaskStore::open_at(&path).unwrap();
        let created = store.create(NewTask::new("Persist me")).unwrap();

        let reopened = TaskStore::open_at(&path).unwrap();
        assert_eq!(reopened.list(), std::slice::from_ref(&created));
    }

    #[test]
    fn update_patches_fields() {
        let (_dir, mut store) = store();
        let task = store.create(NewTask::new("Before")).unwrap();

        let patch = TaskPatch {
            title: Some("After".to_string()),
            completed: Some(true),
            priority: Some(Priority::Low),
        };
        let updated = store.update(&task.id, &patch).unwrap();
        assert_eq!(updated.title, "After");
        assert!(updated.completed);
        assert_eq!(updated.priority, Some(Priority::Low));
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(store.get(&task.id), Some(&updated));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let (_dir, mut store) = store();
        store.create(NewTask::new("Only task")).unwrap();
        let err = store.update("missing", &TaskPatch::default()).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn update_rejects_invalid_title_without_mutating() {
        let (_dir, mut store) = store();
        let task = store.create(NewTask::new("Keep me")).unwrap();
        let patch = TaskPatch {
            title: Some(String::new()),
            ..TaskPatch::default()
        };
        assert!(store.update(&task.id, &patch).is_err());
        assert_eq!(store.get(&task.id).unwrap().title, "Keep me");
    }

    #[test]
    fn delete_removes_only_the_target() {
        let (_dir, mut store) = store();
        let a = store.create(NewTask::new("A")).unwrap();
        let b = store.create(NewTask::new("B")).unwrap();

        store.delete(&a.id).unwrap();
        assert!(store.get(&a.id).is_none());
        assert_eq!(store.get(&b.id), Some(&b));
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let (_dir, mut store) = store();
        assert!(store.delete("missing").is_err());
    }

    #[test]
    fn open_rejects_malformed_blob() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(TaskStore::open_at(&path).is_err());
    }
}
