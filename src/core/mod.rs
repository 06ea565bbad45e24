//! Core domain models and graph algorithms for task prioritization.
//!
//! Leaves first: the task model, the dependency graph built from it, cycle
//! detection over that graph, and the derived per-task metrics that scoring
//! consumes.

pub mod cycle;
pub mod dag;
pub mod metrics;
pub mod task;

pub use cycle::{detect_cycles, CycleReport};
pub use dag::{TaskGraph, UnresolvedDependency};
pub use metrics::{compute_metrics, GraphMetrics};
pub use task::{Task, TaskId, TaskInput};
