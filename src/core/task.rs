//! Task data model for prioritization.
//!
//! Tasks arrive from the task store as loosely-typed records
//! ([`TaskInput`]) and are validated once into [`Task`] values, which the
//! analysis pipeline treats as immutable.

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// Longest title the task store accepts.
pub const MAX_TITLE_LEN: usize = 200;

/// Largest effort estimate accepted, in hours.
pub const MAX_ESTIMATED_HOURS: f64 = 10_000.0;

/// Importance assumed when a record leaves it out.
pub const DEFAULT_IMPORTANCE: u8 = 5;

/// Identity of a task, assigned by the task store.
///
/// Ids may be integers or strings. A string holding a canonical integer
/// (`"12"`, not `"012"`) is normalized to [`TaskId::Num`], so references
/// written either way resolve to the same task. Numeric ids order before
/// textual ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawTaskId")]
pub enum TaskId {
    Num(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTaskId {
    Num(i64),
    Text(String),
}

impl From<RawTaskId> for TaskId {
    fn from(raw: RawTaskId) -> Self {
        match raw {
            RawTaskId::Num(n) => TaskId::Num(n),
            RawTaskId::Text(s) => TaskId::from(s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        TaskId::Num(n)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => TaskId::Num(n),
            _ => TaskId::Text(s),
        }
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::from(s.to_string())
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TaskId::Num(n) => serializer.serialize_i64(*n),
            TaskId::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskId::Num(n) => write!(f, "{}", n),
            TaskId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A task record as received from the task store, before validation.
///
/// Every field is optional so that defaults and error messages are decided
/// in one place ([`Task::try_from`]) rather than by the deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub id: Option<TaskId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub importance: Option<i64>,
    #[serde(default)]
    pub dependencies: Option<Vec<TaskId>>,
}

/// A validated task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Identity assigned by the task store.
    pub id: TaskId,
    /// Display text, never blank.
    pub title: String,
    /// Calendar due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Estimated effort in hours; 0 means unestimated.
    pub estimated_hours: f64,
    /// Importance from 1 (lowest) to 10 (highest).
    pub importance: u8,
    /// Ids of the tasks this one depends on, without duplicates.
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// Create a task with default effort and importance and no due date.
    pub fn new(id: impl Into<TaskId>, title: &str) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            due_date: None,
            estimated_hours: 0.0,
            importance: DEFAULT_IMPORTANCE,
            dependencies: Vec::new(),
        }
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_importance(mut self, importance: u8) -> Self {
        self.importance = importance;
        self
    }

    /// Add a dependency reference. Repeated references are collapsed.
    pub fn depends_on(mut self, id: impl Into<TaskId>) -> Self {
        let id = id.into();
        if !self.dependencies.contains(&id) {
            self.dependencies.push(id);
        }
        self
    }

    /// Check the field constraints a task must satisfy before analysis.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidTask(format!("task {}: {}", self.id, msg)));

        if self.title.trim().is_empty() {
            return invalid("title must not be empty".to_string());
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return invalid(format!("title exceeds {} characters", MAX_TITLE_LEN));
        }
        if !(1..=10).contains(&self.importance) {
            return invalid(format!(
                "importance must be between 1 and 10, got {}",
                self.importance
            ));
        }
        if !self.estimated_hours.is_finite() || self.estimated_hours < 0.0 {
            return invalid(format!(
                "estimated hours cannot be negative, got {}",
                self.estimated_hours
            ));
        }
        if self.estimated_hours > MAX_ESTIMATED_HOURS {
            return invalid(format!(
                "estimated hours cannot exceed {}, got {}",
                MAX_ESTIMATED_HOURS, self.estimated_hours
            ));
        }
        if let Some(due) = self.due_date {
            if !(1..=9999).contains(&due.year()) {
                return invalid(format!("due date {} is out of range", due));
            }
        }
        if self.dependencies.contains(&self.id) {
            return invalid("task cannot depend on itself".to_string());
        }
        Ok(())
    }

    /// Whole days from `today` until the due date; negative when overdue.
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.days_until_due(today).is_some_and(|days| days < 0)
    }
}

impl TryFrom<TaskInput> for Task {
    type Error = Error;

    fn try_from(input: TaskInput) -> Result<Self> {
        let id = input
            .id
            .ok_or_else(|| Error::InvalidTask("task is missing its id".to_string()))?;

        let title = input
            .title
            .ok_or_else(|| Error::InvalidTask(format!("task {}: title is required", id)))?;

        let due_date = match input.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            // A malformed date inside a record is a defect of that task.
            Some(raw) => Some(parse_due_date(raw).map_err(|err| match err {
                Error::InvalidDate(msg) => {
                    Error::InvalidTask(format!("task {}: due date {}", id, msg))
                }
                other => other,
            })?),
        };

        let importance = match input.importance {
            None => DEFAULT_IMPORTANCE,
            Some(value) => u8::try_from(value)
                .ok()
                .filter(|v| (1..=10).contains(v))
                .ok_or_else(|| {
                    Error::InvalidTask(format!(
                        "task {}: importance must be between 1 and 10, got {}",
                        id, value
                    ))
                })?,
        };

        let mut task = Task::new(id, &title).with_importance(importance);
        task.due_date = due_date;
        task.estimated_hours = input.estimated_hours.unwrap_or(0.0);
        for dep in input.dependencies.unwrap_or_default() {
            task = task.depends_on(dep);
        }

        task.validate()?;
        Ok(task)
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_due_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        Error::InvalidDate(format!("'{}' must be in YYYY-MM-DD format", raw))
    })
}

/// Reject task sets in which two tasks share an id.
pub fn ensure_unique_ids(tasks: &[Task]) -> Result<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(&task.id) {
            return Err(Error::InvalidTask(format!("duplicate task id {}", task.id)));
        }
    }
    Ok(())
}

/// Parse and validate a JSON array of task records.
pub fn tasks_from_json(json: &str) -> Result<Vec<Task>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(Error::InvalidTask("expected a list of tasks".to_string()));
    }
    let inputs: Vec<TaskInput> = serde_json::from_value(value)?;
    let tasks = inputs
        .into_iter()
        .map(Task::try_from)
        .collect::<Result<Vec<_>>>()?;
    ensure_unique_ids(&tasks)?;
    Ok(tasks)
}
