//! Core domain logic for Taskboard.
//! This crate is the single source of truth for project/task invariants
//! and for how persisted state is reconciled into them.

pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::due_date::DueDate;
pub use model::project::Project;
pub use model::task::{Task, TaskId, TaskValidationError};
pub use persist::reconcile::{
    reconcile, reconcile_with_report, reconcile_with_today, try_reconcile, DateSource,
    ReconcileError, ReconcileReport, UNNAMED_PROJECT,
};
pub use persist::snapshot::{Snapshot, StoredProject, StoredTask, PROJECTS_KEY};
pub use repo::kv_repo::{KvStore, MemoryKvStore, RepoError, RepoResult, SqliteKvStore};
pub use service::store::{Store, StoreError, StoreResult, DEFAULT_PROJECT_NAME};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
