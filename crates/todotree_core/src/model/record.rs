//! Flat project/section/task records.
//!
//! # Responsibility
//! - Decode records as the sync API sends them, keeping unknown attributes.
//! - Resolve which parent a record hangs under.
//! - Present the three record collections in one fixed processing order.
//!
//! # Invariants
//! - Processing order is projects, then sections, then tasks; input order is
//!   kept within each collection.
//! - `id` may be absent on input; the tree builder rejects such records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

/// Opaque record identifier.
///
/// Accepts a JSON string or integer on input; integers are kept in decimal
/// form so `7` and `"7"` name the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RecordId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Text(String),
    Integer(i64),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawRecordId::deserialize(deserializer)? {
            RawRecordId::Text(value) => Self(value),
            RawRecordId::Integer(value) => Self(value.to_string()),
        })
    }
}

/// Record category, distinguished by the collection a record arrives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Project,
    Section,
    Task,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Section => "section",
            Self::Task => "task",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of one record in the input change-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordOrigin {
    pub kind: RecordKind,
    /// Zero-based index within the collection of `kind`.
    pub position: usize,
}

/// Todoist label. Carried on the change-set but never placed in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Project, possibly nested under another project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub child_order: i64,
    /// Parent project for subprojects.
    pub parent_id: Option<RecordId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Section inside one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub section_order: i64,
    /// Owning project.
    pub project_id: Option<RecordId>,
    /// Generic parent link, used when `project_id` is absent.
    pub parent_id: Option<RecordId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Task (sync API "item"), under a task, a section, or a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<RecordId>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub child_order: i64,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Parent task for subtasks.
    pub parent_id: Option<RecordId>,
    pub section_id: Option<RecordId>,
    pub project_id: Option<RecordId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            child_order: 0,
            parent_id: None,
            extra: Map::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<RecordId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

impl Section {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            section_order: 0,
            project_id: None,
            parent_id: None,
            extra: Map::new(),
        }
    }

    pub fn in_project(mut self, project_id: impl Into<RecordId>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

impl Task {
    pub fn new(id: impl Into<RecordId>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            content: content.into(),
            child_order: 0,
            labels: Vec::new(),
            parent_id: None,
            section_id: None,
            project_id: None,
            extra: Map::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<RecordId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn in_section(mut self, section_id: impl Into<RecordId>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    pub fn in_project(mut self, project_id: impl Into<RecordId>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

/// Read access shared by all tree-placed record kinds.
pub trait FlatRecord {
    fn kind(&self) -> RecordKind;
    fn id(&self) -> Option<&RecordId>;
    /// Identifier of the record this one hangs under, if any.
    fn parent_id(&self) -> Option<&RecordId>;
    /// Projects and sections use `name`, tasks use `content`.
    fn display_name(&self) -> &str;
    fn to_record(&self) -> Record;
}

impl FlatRecord for Project {
    fn kind(&self) -> RecordKind {
        RecordKind::Project
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn parent_id(&self) -> Option<&RecordId> {
        self.parent_id.as_ref()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_record(&self) -> Record {
        Record::Project(self.clone())
    }
}

impl FlatRecord for Section {
    fn kind(&self) -> RecordKind {
        RecordKind::Section
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn parent_id(&self) -> Option<&RecordId> {
        self.project_id.as_ref().or(self.parent_id.as_ref())
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_record(&self) -> Record {
        Record::Section(self.clone())
    }
}

impl FlatRecord for Task {
    fn kind(&self) -> RecordKind {
        RecordKind::Task
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    // Subtask link wins over section, section over project.
    fn parent_id(&self) -> Option<&RecordId> {
        self.parent_id
            .as_ref()
            .or(self.section_id.as_ref())
            .or(self.project_id.as_ref())
    }

    fn display_name(&self) -> &str {
        &self.content
    }

    fn to_record(&self) -> Record {
        Record::Task(self.clone())
    }
}

/// One record of any tree-placed kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Project(Project),
    Section(Section),
    Task(Task),
}

impl Record {
    pub fn as_project(&self) -> Option<&Project> {
        match self {
            Self::Project(project) => Some(project),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Self::Section(section) => Some(section),
            _ => None,
        }
    }

    pub fn as_task(&self) -> Option<&Task> {
        match self {
            Self::Task(task) => Some(task),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn FlatRecord {
        match self {
            Self::Project(project) => project,
            Self::Section(section) => section,
            Self::Task(task) => task,
        }
    }
}

impl FlatRecord for Record {
    fn kind(&self) -> RecordKind {
        self.inner().kind()
    }

    fn id(&self) -> Option<&RecordId> {
        self.inner().id()
    }

    fn parent_id(&self) -> Option<&RecordId> {
        self.inner().parent_id()
    }

    fn display_name(&self) -> &str {
        self.inner().display_name()
    }

    fn to_record(&self) -> Record {
        self.clone()
    }
}

/// Flat collections delivered by one sync cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    /// Continuation token for the next incremental request.
    pub sync_token: Option<String>,
    pub full_sync: bool,
    pub labels: Vec<Label>,
    pub projects: Vec<Project>,
    pub sections: Vec<Section>,
    pub tasks: Vec<Task>,
}

impl ChangeSet {
    /// Creates a change-set from the three tree-placed collections.
    pub fn new(projects: Vec<Project>, sections: Vec<Section>, tasks: Vec<Task>) -> Self {
        Self {
            projects,
            sections,
            tasks,
            ..Self::default()
        }
    }

    /// Total number of tree-placed records.
    pub fn record_count(&self) -> usize {
        self.projects.len() + self.sections.len() + self.tasks.len()
    }

    /// Returns whether no tree-placed or label record is present.
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0 && self.labels.is_empty()
    }

    /// Iterates tree-placed records in processing order.
    pub fn records(&self) -> impl Iterator<Item = (RecordOrigin, &dyn FlatRecord)> + '_ {
        let projects = self
            .projects
            .iter()
            .enumerate()
            .map(|(position, record)| tag(RecordKind::Project, position, record));
        let sections = self
            .sections
            .iter()
            .enumerate()
            .map(|(position, record)| tag(RecordKind::Section, position, record));
        let tasks = self
            .tasks
            .iter()
            .enumerate()
            .map(|(position, record)| tag(RecordKind::Task, position, record));
        projects.chain(sections).chain(tasks)
    }
}

fn tag(
    kind: RecordKind,
    position: usize,
    record: &dyn FlatRecord,
) -> (RecordOrigin, &dyn FlatRecord) {
    (RecordOrigin { kind, position }, record)
}

#[cfg(test)]
mod tests {
    use super::{ChangeSet, FlatRecord, Project, RecordId, RecordKind, Section, Task};
    use serde_json::json;

    #[test]
    fn record_id_accepts_string_and_integer() {
        let text: RecordId = serde_json::from_value(json!("2203306141")).unwrap();
        let number: RecordId = serde_json::from_value(json!(2203306141_i64)).unwrap();
        assert_eq!(text, number);
        assert_eq!(number.as_str(), "2203306141");
    }

    #[test]
    fn task_parent_prefers_task_then_section_then_project() {
        let task = Task::new("t1", "write").in_project("p1").in_section("s1");
        assert_eq!(task.parent_id().map(RecordId::as_str), Some("s1"));

        let subtask = task.clone().with_parent("t0");
        assert_eq!(subtask.parent_id().map(RecordId::as_str), Some("t0"));

        let direct = Task::new("t2", "read").in_project("p1");
        assert_eq!(direct.parent_id().map(RecordId::as_str), Some("p1"));
    }

    #[test]
    fn section_parent_reads_project_id_then_parent_id() {
        let both: Section =
            serde_json::from_value(json!({"id": "S1", "project_id": "P1", "parent_id": null}))
                .unwrap();
        assert_eq!(both.parent_id().map(RecordId::as_str), Some("P1"));

        let generic: Section =
            serde_json::from_value(json!({"id": "S1", "parent_id": "P1"})).unwrap();
        assert_eq!(generic.project_id, None);
        assert_eq!(generic.parent_id().map(RecordId::as_str), Some("P1"));

        let neither: Section = serde_json::from_value(json!({"id": "S1"})).unwrap();
        assert_eq!(neither.parent_id(), None);
    }

    #[test]
    fn unknown_attributes_pass_through() {
        let value = json!({"id": 1, "name": "Inbox", "color": "berry_red", "is_archived": false});
        let project: Project = serde_json::from_value(value).unwrap();
        assert_eq!(project.extra["color"], "berry_red");

        let round_trip = serde_json::to_value(&project).unwrap();
        assert_eq!(round_trip["color"], "berry_red");
        assert_eq!(round_trip["is_archived"], false);
    }

    #[test]
    fn records_follow_processing_order() {
        let change_set = ChangeSet::new(
            vec![Project::new("p", "Home")],
            vec![Section::new("s", "Later")],
            vec![Task::new("t1", "a"), Task::new("t2", "b")],
        );
        let order: Vec<(RecordKind, usize)> = change_set
            .records()
            .map(|(origin, _)| (origin.kind, origin.position))
            .collect();
        assert_eq!(
            order,
            vec![
                (RecordKind::Project, 0),
                (RecordKind::Section, 0),
                (RecordKind::Task, 0),
                (RecordKind::Task, 1),
            ]
        );
    }
}
