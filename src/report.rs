//! JSON response shapes for analysis callers.
//!
//! Success and failure bodies mirror what the task UI consumes: a `tasks`
//! array with `priority_score` and `explanation` per task, or an object with
//! a textual `code` and `error` so callers can tell failures apart without
//! relying on transport status codes.

use crate::analysis::{Analysis, GraphDiagnostics, ScoredTask};
use crate::core::dag::UnresolvedDependency;
use crate::core::task::TaskId;
use crate::error::Error;
use crate::scoring::Strategy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    pub id: TaskId,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: f64,
    pub importance: u8,
    pub dependencies: Vec<TaskId>,
    pub priority_score: f64,
    pub explanation: String,
    pub depth: usize,
    pub dependent_count: usize,
    pub satisfied: bool,
}

impl From<&ScoredTask> for TaskReport {
    fn from(scored: &ScoredTask) -> Self {
        Self {
            id: scored.task.id.clone(),
            title: scored.task.title.clone(),
            due_date: scored.task.due_date,
            estimated_hours: scored.task.estimated_hours,
            importance: scored.task.importance,
            dependencies: scored.task.dependencies.clone(),
            priority_score: scored.score,
            explanation: scored.explanation.clone(),
            depth: scored.metrics.depth,
            dependent_count: scored.metrics.dependent_count,
            satisfied: scored.metrics.satisfied,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub tasks: Vec<TaskReport>,
    pub strategy: Strategy,
    pub total_tasks: usize,
    pub warnings: Vec<String>,
}

impl From<&Analysis> for AnalysisResponse {
    fn from(analysis: &Analysis) -> Self {
        Self {
            tasks: analysis.results.iter().map(TaskReport::from).collect(),
            strategy: analysis.strategy,
            total_tasks: analysis.total_tasks,
            warnings: warning_lines(&analysis.warnings),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycles: Option<Vec<Vec<TaskId>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        let (error, cycles, strategy) = match err {
            Error::CyclicDependency(report) => (
                format!(
                    "Circular dependencies detected: break {} cycle(s) before prioritizing",
                    report.len()
                ),
                Some(report.cycles().to_vec()),
                None,
            ),
            Error::UnknownStrategy(name) => (
                format!(
                    "Unknown strategy '{}'; expected one of: {}",
                    name,
                    Strategy::ALL.map(|s| s.as_str()).join(", ")
                ),
                None,
                Some(name.clone()),
            ),
            other => (other.to_string(), None, None),
        };
        Self {
            code: err.code().to_string(),
            error,
            cycles,
            strategy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub ok: bool,
    pub warnings: Vec<String>,
    pub cycles: Vec<Vec<TaskId>>,
}

impl From<&GraphDiagnostics> for CheckResponse {
    fn from(diagnostics: &GraphDiagnostics) -> Self {
        Self {
            ok: diagnostics.cycles.is_empty(),
            warnings: warning_lines(&diagnostics.unresolved),
            cycles: diagnostics.cycles.cycles().to_vec(),
        }
    }
}

fn warning_lines(unresolved: &[UnresolvedDependency]) -> Vec<String> {
    unresolved.iter().map(ToString::to_string).collect()
}
