//! Project domain model.
//!
//! # Responsibility
//! - Own an ordered task sequence for one project.
//!
//! # Invariants
//! - Insertion order is display order.
//! - No two tasks in one project share an id.

use crate::model::task::{Task, TaskId};

/// Named, ordered collection of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    tasks: Vec<Task>,
}

impl Project {
    /// Creates a project with no tasks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Appends a task to the end of the sequence.
    ///
    /// Ids minted by `Task::new` are fresh, so no uniqueness scan runs in
    /// release builds. Callers restoring persisted ids must check
    /// `contains_task` first.
    pub fn add_task(&mut self, task: Task) {
        debug_assert!(
            !self.contains_task(task.id()),
            "duplicate task id {} in project",
            task.id()
        );
        self.tasks.push(task);
    }

    /// Removes the task at `index`, keeping the order of the rest.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn remove_task(&mut self, index: usize) -> Option<Task> {
        if index < self.tasks.len() {
            Some(self.tasks.remove(index))
        } else {
            None
        }
    }

    pub fn contains_task(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id() == id)
    }
}
