//! Analysis orchestration.
//!
//! Pipeline for one call: validate input, build the dependency graph, detect
//! cycles (and stop if there are any), compute graph metrics, score every
//! task, then sort by score. Scoring never runs on a graph known to be cyclic.

use crate::core::cycle::{detect_cycles, CycleReport};
use crate::core::dag::{TaskGraph, UnresolvedDependency};
use crate::core::metrics::{compute_metrics, GraphMetrics};
use crate::core::task::{ensure_unique_ids, Task, TaskId};
use crate::error::{Error, Result};
use crate::scoring::{score_task, Strategy};
use crate::{tlog, tlog_debug, tlog_trace};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Knobs that are not part of the task data itself.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {
    /// Task ids to treat as complete when deciding whether a task's
    /// dependencies are satisfied. Empty by default: every dependency
    /// counts as unfinished.
    pub completed: HashSet<TaskId>,
}

/// One ranked task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    pub task: Task,
    pub score: f64,
    pub explanation: String,
    pub metrics: GraphMetrics,
}

/// Outcome of a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Tasks by descending score; equal scores keep input order.
    pub results: Vec<ScoredTask>,
    pub strategy: Strategy,
    pub total_tasks: usize,
    /// Dependency references that did not resolve. Their edges were dropped.
    pub warnings: Vec<UnresolvedDependency>,
}

/// Graph problems found without scoring anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDiagnostics {
    pub unresolved: Vec<UnresolvedDependency>,
    pub cycles: CycleReport,
}

impl GraphDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.cycles.is_empty()
    }
}

/// Source of the analysis date.
///
/// The date is read once per call and then passed down, so a single analysis
/// never straddles midnight.
pub struct AnalysisClock;

impl AnalysisClock {
    pub fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Runs the analysis pipeline. Holds no per-call state, so one analyzer can
/// serve any number of independent calls, including concurrently.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Analyze under a strategy given by name.
    ///
    /// # Errors
    /// `UnknownStrategy` if the name matches no strategy; otherwise as
    /// [`Analyzer::analyze`].
    pub fn analyze_named(
        &self,
        tasks: &[Task],
        strategy: &str,
        today: NaiveDate,
    ) -> Result<Analysis> {
        let strategy: Strategy = strategy.parse()?;
        self.analyze(tasks, strategy, today)
    }

    /// Rank `tasks` under `strategy` as of `today`.
    ///
    /// # Errors
    /// - `InvalidTask` if a task breaks a field constraint or two tasks share an id
    /// - `CyclicDependency` with every cycle found, if the graph is cyclic
    pub fn analyze(
        &self,
        tasks: &[Task],
        strategy: Strategy,
        today: NaiveDate,
    ) -> Result<Analysis> {
        tlog!(
            "Analyzing {} task(s) with strategy {} as of {}",
            tasks.len(),
            strategy,
            today
        );
        validate(tasks)?;

        let graph = TaskGraph::build(tasks);
        tlog_debug!("Built {:?}", graph);

        let cycles = detect_cycles(&graph);
        if !cycles.is_empty() {
            tlog!("Analysis aborted: {} dependency cycle(s)", cycles.len());
            return Err(Error::CyclicDependency(cycles));
        }

        let metrics = compute_metrics(&graph, &self.options.completed)?;

        let mut results: Vec<ScoredTask> = tasks
            .iter()
            .zip(metrics)
            .map(|(task, metrics)| {
                let score = score_task(strategy, task, &metrics, today);
                tlog_trace!(
                    "Task {} scored {:.4}: {}",
                    task.id,
                    score.value,
                    score.explanation
                );
                ScoredTask {
                    task: task.clone(),
                    score: score.value,
                    explanation: score.explanation,
                    metrics,
                }
            })
            .collect();

        // Stable: ties keep input order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(Analysis {
            total_tasks: results.len(),
            results,
            strategy,
            warnings: graph.unresolved().to_vec(),
        })
    }

    /// Build the graph and report unresolved references and cycles only.
    pub fn check(&self, tasks: &[Task]) -> Result<GraphDiagnostics> {
        validate(tasks)?;
        let graph = TaskGraph::build(tasks);
        Ok(GraphDiagnostics {
            unresolved: graph.unresolved().to_vec(),
            cycles: detect_cycles(&graph),
        })
    }
}

fn validate(tasks: &[Task]) -> Result<()> {
    tasks.iter().try_for_each(Task::validate)?;
    ensure_unique_ids(tasks)
}
