//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - A fixed analysis date
//! - Predefined task sets

use chrono::{Duration, NaiveDate};

use taskrank::core::task::{parse_due_date, Task, TaskId};
use taskrank::{Analysis, Analyzer, Strategy};

/// The date every integration test analyzes against.
pub fn today() -> NaiveDate {
    parse_due_date("2025-06-01").unwrap()
}

pub fn due_in(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

/// Run the default analyzer and panic on failure.
pub fn analyze(tasks: &[Task], strategy: Strategy) -> Analysis {
    Analyzer::default()
        .analyze(tasks, strategy, today())
        .unwrap_or_else(|e| panic!("analysis failed under {}: {}", strategy, e))
}

/// Result ids in ranked order.
pub fn ranked_ids(analysis: &Analysis) -> Vec<TaskId> {
    analysis.results.iter().map(|r| r.task.id.clone()).collect()
}

/// Score of the task with `id`.
pub fn score_of(analysis: &Analysis, id: impl Into<TaskId>) -> f64 {
    let id = id.into();
    analysis
        .results
        .iter()
        .find(|r| r.task.id == id)
        .map(|r| r.score)
        .unwrap_or_else(|| panic!("task {} missing from results", id))
}

/// A small web project backlog with a diamond dependency.
///
/// ```text
///   1 schema
///   ├── 2 api
///   │   └── 4 frontend
///   └── 3 migrations
///       └── 4 frontend
///   5 docs (independent)
/// ```
pub fn web_project() -> Vec<Task> {
    vec![
        Task::new(1, "Design database schema")
            .with_due_date(due_in(3))
            .with_hours(4.0)
            .with_importance(8),
        Task::new(2, "Build REST API")
            .with_due_date(due_in(7))
            .with_hours(12.0)
            .with_importance(7)
            .depends_on(1),
        Task::new(3, "Write migrations")
            .with_due_date(due_in(5))
            .with_hours(2.0)
            .with_importance(6)
            .depends_on(1),
        Task::new(4, "Wire up frontend")
            .with_due_date(due_in(14))
            .with_hours(16.0)
            .with_importance(6)
            .depends_on(2)
            .depends_on(3),
        Task::new(5, "Update docs").with_hours(1.0),
    ]
}

/// The same backlog as JSON the way the task store sends it, with mixed
/// id representations and an omitted importance.
pub const WEB_PROJECT_JSON: &str = r#"[
  {"id": 1, "title": "Design database schema", "due_date": "2025-06-04",
   "estimated_hours": 4, "importance": 8, "dependencies": []},
  {"id": "2", "title": "Build REST API", "due_date": "2025-06-08",
   "estimated_hours": 12, "importance": 7, "dependencies": [1]},
  {"id": 3, "title": "Write migrations", "due_date": "2025-06-06",
   "estimated_hours": 2, "importance": 6, "dependencies": ["1"]},
  {"id": 4, "title": "Wire up frontend", "due_date": "2025-06-15",
   "estimated_hours": 16, "importance": 6, "dependencies": [2, 3]},
  {"id": 5, "title": "Update docs", "estimated_hours": 1}
]"#;

/// Two disjoint two-task cycles plus an innocent bystander.
pub fn two_cycles() -> Vec<Task> {
    vec![
        Task::new(1, "a").depends_on(2),
        Task::new(2, "b").depends_on(1),
        Task::new(3, "c").depends_on(4),
        Task::new(4, "d").depends_on(3),
        Task::new(5, "e"),
    ]
}
