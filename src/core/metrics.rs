//! Per-task graph metrics used by the scoring strategies.
//!
//! Requires an acyclic graph; the analyzer runs cycle detection first.

use crate::core::cycle::detect_cycles;
use crate::core::dag::TaskGraph;
use crate::core::task::TaskId;
use crate::error::{Error, Result};
use crate::tlog_debug;
use petgraph::algo::toposort;
use petgraph::visit::{Bfs, Reversed};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Derived graph facts for one task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetrics {
    /// Longest dependency chain below this task; 0 when it has none.
    pub depth: usize,
    /// Number of tasks that depend on this one, directly or transitively.
    pub dependent_count: usize,
    /// Resolved dependencies not yet complete.
    pub pending_dependencies: usize,
    /// True when every resolved dependency is complete (or there are none).
    pub satisfied: bool,
}

/// Compute metrics for every task, indexed by node index (input order).
///
/// `completed` holds ids the caller treats as done. With an empty set, any
/// task that has a resolved dependency is unsatisfied.
pub fn compute_metrics(
    graph: &TaskGraph<'_>,
    completed: &HashSet<TaskId>,
) -> Result<Vec<GraphMetrics>> {
    let order = toposort(graph.graph(), None)
        .map_err(|_| Error::CyclicDependency(detect_cycles(graph)))?;

    // Edges point at dependencies, so walking the topological order backwards
    // visits every dependency before its dependents.
    let mut depth = vec![0usize; graph.task_count()];
    for &node in order.iter().rev() {
        depth[node.index()] = graph
            .dependencies_of(node)
            .iter()
            .map(|dep| depth[dep.index()] + 1)
            .max()
            .unwrap_or(0);
    }

    let reversed = Reversed(graph.graph());
    let metrics: Vec<GraphMetrics> = graph
        .node_indices()
        .map(|node| {
            let mut bfs = Bfs::new(reversed, node);
            let mut reached = 0usize;
            while bfs.next(reversed).is_some() {
                reached += 1;
            }

            let pending_dependencies = graph
                .dependencies_of(node)
                .iter()
                .filter(|dep| !completed.contains(&graph.task(**dep).id))
                .count();

            GraphMetrics {
                depth: depth[node.index()],
                // The start node is part of the walk.
                dependent_count: reached.saturating_sub(1),
                pending_dependencies,
                satisfied: pending_dependencies == 0,
            }
        })
        .collect();

    tlog_debug!(
        "Metrics computed for {} task(s), max depth {}",
        metrics.len(),
        metrics.iter().map(|m| m.depth).max().unwrap_or(0)
    );
    Ok(metrics)
}
