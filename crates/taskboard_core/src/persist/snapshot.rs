//! JSON wire shape of persisted projects.
//!
//! Reading is lenient: scalar task fields accept any JSON scalar, missing
//! fields fall back to empty, and list entries that are not objects are
//! dropped one at a time. Writing always emits every field as a string.

use crate::model::project::Project;
use crate::model::task::Task;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Storage key holding the serialized project list.
pub const PROJECTS_KEY: &str = "projects";

/// Top-level persisted envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(deserialize_with = "lenient_entries")]
    pub projects: Vec<StoredProject>,
    /// Set when the blob was the bare array written by early builds.
    #[serde(skip)]
    pub bare_shape: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProject {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub tasks: Vec<StoredTask>,
}

/// Persisted task entry.
///
/// `raw_date` and `due_date` are both optional on read: entries written
/// before the canonical field existed only carry `dueDate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTask {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub raw_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub priority: Option<String>,
}

/// Shapes accepted on read.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotShape {
    Envelope(Snapshot),
    Bare(#[serde(deserialize_with = "lenient_entries")] Vec<StoredProject>),
}

impl Snapshot {
    /// Captures the full project list for persistence.
    pub fn from_projects(projects: &[Project]) -> Self {
        Self {
            projects: projects.iter().map(StoredProject::from).collect(),
            bare_shape: false,
        }
    }

    /// Decodes either the envelope or the legacy bare-array shape.
    pub fn decode(blob: &str) -> serde_json::Result<Self> {
        let shape: SnapshotShape = serde_json::from_str(blob)?;
        Ok(match shape {
            SnapshotShape::Envelope(snapshot) => snapshot,
            SnapshotShape::Bare(projects) => Self {
                projects,
                bare_shape: true,
            },
        })
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&Project> for StoredProject {
    fn from(project: &Project) -> Self {
        Self {
            name: Some(project.name().to_string()),
            tasks: project.tasks().iter().map(StoredTask::from).collect(),
        }
    }
}

impl From<&Task> for StoredTask {
    fn from(task: &Task) -> Self {
        Self {
            id: Some(task.id().to_string()),
            title: Some(task.title().to_string()),
            description: Some(task.description().to_string()),
            raw_date: Some(task.raw_date().canonical()),
            due_date: Some(task.due_date()),
            priority: Some(task.priority().to_string()),
        }
    }
}

/// Reads any JSON scalar as text; `null`, arrays and objects read as `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Reads a list, dropping entries that do not decode instead of failing it.
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    let total = values.len();
    let entries: Vec<T> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if entries.len() < total {
        warn!(
            "event=snapshot_decode module=persist status=partial dropped_entries={}",
            total - entries.len()
        );
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::{Snapshot, StoredTask};
    use crate::model::project::Project;
    use crate::model::task::Task;

    #[test]
    fn encode_writes_envelope_with_camel_case_task_fields() {
        let mut project = Project::new("Home");
        let task = Task::new("Laundry", "whites", "2024-03-05", "high").unwrap();
        let task_id = task.id();
        project.add_task(task);

        let blob = Snapshot::from_projects(&[project]).encode().unwrap();
        let json: serde_json::Value = serde_json::from_str(&blob).unwrap();

        let stored = &json["projects"][0]["tasks"][0];
        assert_eq!(json["projects"][0]["name"], "Home");
        assert_eq!(stored["id"], task_id.to_string());
        assert_eq!(stored["title"], "Laundry");
        assert_eq!(stored["description"], "whites");
        assert_eq!(stored["rawDate"], "2024-03-05");
        assert_eq!(stored["dueDate"], "05/03/2024");
        assert_eq!(stored["priority"], "high");
        assert!(json.get("bare_shape").is_none());
    }

    #[test]
    fn decode_accepts_bare_array_shape() {
        let blob = r#"[{"name":"Old","tasks":[{"title":"t","dueDate":"01/02/2023"}]}]"#;
        let snapshot = Snapshot::decode(blob).unwrap();

        assert!(snapshot.bare_shape);
        assert_eq!(snapshot.projects.len(), 1);
        assert_eq!(snapshot.projects[0].name.as_deref(), Some("Old"));
        let task: &StoredTask = &snapshot.projects[0].tasks[0];
        assert_eq!(task.raw_date, None);
        assert_eq!(task.due_date.as_deref(), Some("01/02/2023"));
        assert_eq!(task.description, None);
    }

    #[test]
    fn decode_tolerates_null_optional_fields() {
        let blob = r#"{"projects":[{"name":"P","tasks":[
            {"id":null,"title":"t","description":null,"rawDate":null,"dueDate":null,"priority":null}
        ]}]}"#;
        let snapshot = Snapshot::decode(blob).unwrap();
        assert!(!snapshot.bare_shape);
        assert_eq!(snapshot.projects[0].tasks[0].title.as_deref(), Some("t"));
    }

    #[test]
    fn decode_reads_scalar_fields_as_text() {
        let blob = r#"[{"name":7,"tasks":[{"title":42,"priority":2,"description":true}]}]"#;
        let snapshot = Snapshot::decode(blob).unwrap();

        let task = &snapshot.projects[0].tasks[0];
        assert_eq!(snapshot.projects[0].name.as_deref(), Some("7"));
        assert_eq!(task.title.as_deref(), Some("42"));
        assert_eq!(task.priority.as_deref(), Some("2"));
        assert_eq!(task.description.as_deref(), Some("true"));
    }

    #[test]
    fn decode_drops_only_non_object_entries() {
        let blob = r#"{"projects":[
            {"name":"Keep","tasks":[2,{"title":"ok"},null]},
            "stray",
            {"tasks":[]}
        ]}"#;
        let snapshot = Snapshot::decode(blob).unwrap();

        assert_eq!(snapshot.projects.len(), 2);
        assert_eq!(snapshot.projects[0].tasks.len(), 1);
        assert_eq!(snapshot.projects[1].name, None);
    }

    #[test]
    fn decode_rejects_non_list_projects() {
        assert!(Snapshot::decode(r#"{"projects":12}"#).is_err());
        assert!(Snapshot::decode("\"text\"").is_err());
    }
}
