//! Project store: in-memory state synchronized to a key-value store.
//!
//! # Responsibility
//! - Own the project list and the selected-project cursor.
//! - Expose the view-facing intents as checked mutations.
//! - Persist the full project list after every operation.
//!
//! # Invariants
//! - `selected` is `None` or a valid index into `projects`.
//! - Preconditions are checked before any mutation; a violation leaves
//!   state untouched and returns `PreconditionViolation`.
//! - Selection is not persisted.

use crate::model::due_date::DueDate;
use crate::model::project::Project;
use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::persist::reconcile::reconcile_with_report;
use crate::persist::snapshot::{Snapshot, PROJECTS_KEY};
use crate::repo::kv_repo::{KvStore, RepoError};
use log::{debug, error, info};
use thiserror::Error;

/// Name of the project seeded into an empty store.
pub const DEFAULT_PROJECT_NAME: &str = "Default";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid due date `{0}`; expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("failed to encode projects: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        match value {
            TaskValidationError::InvalidDate(raw) => Self::InvalidDate(raw),
            other => Self::PreconditionViolation(other.to_string()),
        }
    }
}

/// Process state for one task-board session.
pub struct Store<K: KvStore> {
    storage: K,
    projects: Vec<Project>,
    selected: Option<usize>,
}

impl<K: KvStore> Store<K> {
    /// Loads persisted projects, seeding `"Default"` when none survive.
    ///
    /// # Side effects
    /// - Writes to `storage` when the default project is seeded, or when
    ///   loading migrated anything (bare-array shape, legacy or defaulted
    ///   dates, re-minted ids) so the next load sees the same state.
    ///
    /// # Errors
    /// - Storage read/write failures. Corrupt stored data is not an error.
    pub fn open(storage: K) -> StoreResult<Self> {
        let blob = storage.get(PROJECTS_KEY)?;
        let (projects, report) = reconcile_with_report(blob.as_deref(), DueDate::today());

        let mut store = Self {
            storage,
            projects,
            selected: None,
        };

        if store.projects.is_empty() {
            store.projects.push(Project::new(DEFAULT_PROJECT_NAME));
            info!("event=store_seed module=service status=ok project={DEFAULT_PROJECT_NAME}");
            store.persist()?;
        } else if report.needs_rewrite() {
            info!(
                "event=store_migrate module=service status=ok minted_ids={} legacy_dates={} defaulted_dates={} bare_shape={}",
                report.minted_ids,
                report.legacy_dates,
                report.defaulted_dates,
                report.bare_shape
            );
            store.persist()?;
        }

        info!(
            "event=store_open module=service status=ok projects={}",
            store.projects.len()
        );
        Ok(store)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn selected_project_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected.and_then(|index| self.projects.get(index))
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// Appends an empty project and returns its index.
    ///
    /// Selection is left unchanged.
    pub fn add_project(&mut self, name: &str) -> StoreResult<usize> {
        if name.trim().is_empty() {
            return Err(violation("project name cannot be blank"));
        }
        self.projects.push(Project::new(name));
        let index = self.projects.len() - 1;
        info!("event=project_add module=service status=ok index={index}");
        self.persist()?;
        Ok(index)
    }

    pub fn select_project(&mut self, index: usize) -> StoreResult<()> {
        if index >= self.projects.len() {
            return Err(violation(format!(
                "project index {index} out of range for {} projects",
                self.projects.len()
            )));
        }
        self.selected = Some(index);
        debug!("event=project_select module=service status=ok index={index}");
        self.persist()
    }

    /// Clears the selection ("back to the project list").
    pub fn deselect_project(&mut self) -> StoreResult<()> {
        self.selected = None;
        debug!("event=project_deselect module=service status=ok");
        self.persist()
    }

    /// Creates a task and appends it to the selected project.
    ///
    /// # Errors
    /// - `PreconditionViolation` when no project is selected or `title` is blank.
    /// - `InvalidDate` when `raw_date` is not `YYYY-MM-DD`.
    pub fn add_task_to_selected(
        &mut self,
        title: &str,
        description: &str,
        raw_date: &str,
        priority: &str,
    ) -> StoreResult<TaskId> {
        let index = self.require_selected()?;
        if title.trim().is_empty() {
            return Err(violation("task title cannot be blank"));
        }
        let task = Task::new(title, description, raw_date, priority)?;
        let id = task.id();
        self.projects[index].add_task(task);
        info!("event=task_add module=service status=ok project_index={index} task_id={id}");
        self.persist()?;
        Ok(id)
    }

    /// Removes the task at `task_index` in the selected project.
    pub fn delete_task(&mut self, task_index: usize) -> StoreResult<Task> {
        let index = self.require_selected()?;
        let project = &mut self.projects[index];
        let task_count = project.task_count();
        let removed = project.remove_task(task_index).ok_or_else(|| {
            violation(format!(
                "task index {task_index} out of range for {task_count} tasks"
            ))
        })?;
        info!(
            "event=task_delete module=service status=ok project_index={index} task_id={}",
            removed.id()
        );
        self.persist()?;
        Ok(removed)
    }

    fn require_selected(&self) -> StoreResult<usize> {
        self.selected
            .filter(|index| *index < self.projects.len())
            .ok_or_else(|| violation("no project selected"))
    }

    fn persist(&mut self) -> StoreResult<()> {
        let blob = Snapshot::from_projects(&self.projects).encode()?;
        if let Err(err) = self.storage.set(PROJECTS_KEY, &blob) {
            error!(
                "event=store_persist module=service status=error error_code=storage_write_failed error={err}"
            );
            return Err(err.into());
        }
        debug!(
            "event=store_persist module=service status=ok bytes={}",
            blob.len()
        );
        Ok(())
    }
}

fn violation(message: impl Into<String>) -> StoreError {
    StoreError::PreconditionViolation(message.into())
}

#[cfg(test)]
mod tests {
    use super::{Store, StoreError};
    use crate::repo::kv_repo::{KvStore, MemoryKvStore, RepoError, RepoResult};

    /// Storage whose writes always fail.
    struct ReadOnlyKv;

    impl KvStore for ReadOnlyKv {
        fn get(&self, _key: &str) -> RepoResult<Option<String>> {
            Ok(Some(r#"{"projects":[{"name":"P","tasks":[]}]}"#.to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> RepoResult<()> {
            Err(RepoError::InvalidKey("read-only".to_string()))
        }
    }

    #[test]
    fn write_failures_surface_as_repo_errors() {
        let mut store = Store::open(ReadOnlyKv).unwrap();
        let err = store.add_project("New").unwrap_err();
        assert!(matches!(err, StoreError::Repo(_)));
    }

    #[test]
    fn blank_project_name_is_rejected_without_mutation() {
        let mut store = Store::open(MemoryKvStore::new()).unwrap();
        let err = store.add_project("   ").unwrap_err();
        assert!(matches!(err, StoreError::PreconditionViolation(_)));
        assert_eq!(store.projects().len(), 1);
    }
}
