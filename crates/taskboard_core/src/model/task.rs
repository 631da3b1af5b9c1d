//! Task domain model.
//!
//! # Responsibility
//! - Define a single unit of work inside a project.
//! - Validate the due date at construction time.
//!
//! # Invariants
//! - `id` is non-nil and never reused for another task.
//! - `due_date()` is derived from `raw_date()` and cannot drift from it.
//! - A task is immutable after construction.

use crate::model::due_date::DueDate;
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier of a task.
pub type TaskId = Uuid;

/// Validation failures raised while constructing a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    /// Due date input is not a `YYYY-MM-DD` calendar date.
    #[error("invalid due date `{0}`; expected YYYY-MM-DD")]
    InvalidDate(String),
    /// Caller supplied the nil UUID as task id.
    #[error("task id cannot be nil")]
    NilId,
}

/// A unit of work with a due date and an opaque priority label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    raw_date: DueDate,
    priority: String,
}

impl Task {
    /// Creates a task with a fresh id from a `YYYY-MM-DD` date string.
    ///
    /// # Errors
    /// - Returns `InvalidDate` when `raw_date` is not a calendar date.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        raw_date: &str,
        priority: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        let date = DueDate::parse_canonical(raw_date)
            .ok_or_else(|| TaskValidationError::InvalidDate(raw_date.to_string()))?;
        Ok(Self::with_date(title, description, date, priority))
    }

    /// Creates a task with a fresh id from an already-parsed date.
    pub fn with_date(
        title: impl Into<String>,
        description: impl Into<String>,
        raw_date: DueDate,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            raw_date,
            priority: priority.into(),
        }
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Used by reconciliation to keep ids stable across reloads.
    ///
    /// # Errors
    /// - Returns `NilId` when `id` is the nil UUID.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        raw_date: DueDate,
        priority: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            raw_date,
            priority: priority.into(),
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Canonical due date.
    pub fn raw_date(&self) -> DueDate {
        self.raw_date
    }

    /// Due date rendered as `DD/MM/YYYY`.
    pub fn due_date(&self) -> String {
        self.raw_date.display()
    }

    pub fn priority(&self) -> &str {
        &self.priority
    }
}
