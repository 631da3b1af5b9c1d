//! Reconciliation of persisted snapshots into domain entities.
//!
//! # Responsibility
//! - Turn the stored blob (or its absence) into an ordered project list.
//! - Migrate legacy date shapes through an explicit `DateSource` decision.
//! - Keep persisted task ids stable when they are usable.
//!
//! # Invariants
//! - Absent, blank or `null` input yields an empty list.
//! - Corrupt input yields an empty list and a warning, never an error.
//! - Rebuilt projects never contain duplicate task ids.

use crate::model::due_date::DueDate;
use crate::model::project::Project;
use crate::model::task::{Task, TaskId};
use crate::persist::snapshot::{Snapshot, StoredProject, StoredTask};
use log::{info, warn};
use thiserror::Error;
use uuid::Uuid;

/// Name given to a stored project that has no usable name.
pub const UNNAMED_PROJECT: &str = "Untitled";

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Stored blob is not a decodable project snapshot.
    #[error("corrupt persisted state: {0}")]
    CorruptState(String),
}

/// Where a rebuilt task takes its due date from, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// Entry carries a parseable `rawDate`.
    Canonical(DueDate),
    /// Entry carries only a `DD/MM/YYYY` `dueDate`.
    LegacyDisplay(DueDate),
    /// Nothing usable; the task is due today.
    Today,
}

impl DateSource {
    pub fn classify(entry: &StoredTask) -> Self {
        if let Some(date) = entry.raw_date.as_deref().and_then(DueDate::parse_canonical) {
            return Self::Canonical(date);
        }
        if let Some(date) = entry
            .due_date
            .as_deref()
            .filter(|value| value.contains('/'))
            .and_then(DueDate::parse_legacy_display)
        {
            return Self::LegacyDisplay(date);
        }
        Self::Today
    }

    pub fn resolve(self, today: DueDate) -> DueDate {
        match self {
            Self::Canonical(date) | Self::LegacyDisplay(date) => date,
            Self::Today => today,
        }
    }
}

/// Counters describing one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub projects: usize,
    pub tasks: usize,
    pub canonical_dates: usize,
    pub legacy_dates: usize,
    pub defaulted_dates: usize,
    /// Tasks whose persisted id was missing, invalid or duplicated.
    pub minted_ids: usize,
    /// Blob was the bare array written by early builds.
    pub bare_shape: bool,
    /// Blob did not decode and was treated as empty.
    pub corrupt: bool,
}

impl ReconcileReport {
    /// Whether the rebuilt state differs from what is stored and should be
    /// written back so that a later load sees the same ids and dates.
    pub fn needs_rewrite(&self) -> bool {
        self.bare_shape
            || self.minted_ids > 0
            || self.legacy_dates > 0
            || self.defaulted_dates > 0
    }
}

/// Rebuilds projects from a stored blob, dating fallbacks with today's UTC date.
pub fn reconcile(blob: Option<&str>) -> Vec<Project> {
    reconcile_with_today(blob, DueDate::today())
}

/// Same as `reconcile` with an explicit "today" for the last-resort date.
pub fn reconcile_with_today(blob: Option<&str>, today: DueDate) -> Vec<Project> {
    reconcile_with_report(blob, today).0
}

/// Rebuilds projects and reports what had to be migrated.
///
/// Corrupt input is logged, flagged in the report and yields no projects.
pub fn reconcile_with_report(
    blob: Option<&str>,
    today: DueDate,
) -> (Vec<Project>, ReconcileReport) {
    match try_reconcile(blob, today) {
        Ok((projects, report)) => {
            info!(
                "event=reconcile module=persist status=ok projects={} tasks={} canonical_dates={} legacy_dates={} defaulted_dates={} minted_ids={} bare_shape={}",
                report.projects,
                report.tasks,
                report.canonical_dates,
                report.legacy_dates,
                report.defaulted_dates,
                report.minted_ids,
                report.bare_shape
            );
            (projects, report)
        }
        Err(err) => {
            warn!(
                "event=reconcile module=persist status=error error_code=corrupt_state fallback=empty error={}",
                err
            );
            let report = ReconcileReport {
                corrupt: true,
                ..ReconcileReport::default()
            };
            (Vec::new(), report)
        }
    }
}

/// Fallible core of reconciliation, exposing the report and the error.
///
/// # Errors
/// - `CorruptState` when the blob does not decode as a snapshot.
pub fn try_reconcile(
    blob: Option<&str>,
    today: DueDate,
) -> Result<(Vec<Project>, ReconcileReport), ReconcileError> {
    let mut report = ReconcileReport::default();
    let Some(blob) = blob.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok((Vec::new(), report));
    };
    if blob == "null" {
        return Ok((Vec::new(), report));
    }

    let snapshot =
        Snapshot::decode(blob).map_err(|err| ReconcileError::CorruptState(err.to_string()))?;
    report.bare_shape = snapshot.bare_shape;

    let projects: Vec<Project> = snapshot
        .projects
        .into_iter()
        .map(|stored| reconcile_project(stored, today, &mut report))
        .collect();
    report.projects = projects.len();
    Ok((projects, report))
}

fn reconcile_project(
    stored: StoredProject,
    today: DueDate,
    report: &mut ReconcileReport,
) -> Project {
    let name = stored
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNNAMED_PROJECT.to_string());
    let mut project = Project::new(name);
    for entry in stored.tasks {
        let task = reconcile_task(entry, today, &project, report);
        project.add_task(task);
    }
    project
}

fn reconcile_task(
    entry: StoredTask,
    today: DueDate,
    project: &Project,
    report: &mut ReconcileReport,
) -> Task {
    let source = DateSource::classify(&entry);
    match source {
        DateSource::Canonical(_) => report.canonical_dates += 1,
        DateSource::LegacyDisplay(_) => report.legacy_dates += 1,
        DateSource::Today => report.defaulted_dates += 1,
    }
    report.tasks += 1;

    let date = source.resolve(today);
    let title = entry.title.unwrap_or_default();
    let description = entry.description.unwrap_or_default();
    let priority = entry.priority.unwrap_or_default();

    let preserved = preserved_id(entry.id.as_deref(), project)
        .and_then(|id| Task::with_id(id, &title, &description, date, &priority).ok());
    match preserved {
        Some(task) => task,
        None => {
            report.minted_ids += 1;
            Task::with_date(title, description, date, priority)
        }
    }
}

/// Parses a stored id, refusing one already used in `project`.
///
/// Nil ids are refused later by `Task::with_id`.
fn preserved_id(raw: Option<&str>, project: &Project) -> Option<TaskId> {
    let id = Uuid::parse_str(raw?.trim()).ok()?;
    if project.contains_task(id) {
        return None;
    }
    Some(id)
}
