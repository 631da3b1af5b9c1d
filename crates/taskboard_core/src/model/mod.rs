//! Project/task domain model.
//!
//! # Responsibility
//! - Define the entities the store mutates and the reconciler rebuilds.
//! - Keep date normalization in one value type.
//!
//! # Invariants
//! - A task's display date is always derived from its canonical date.
//! - Task ids are unique within one project.

pub mod due_date;
pub mod project;
pub mod task;
