//! Dependency graph construction.
//!
//! [`TaskGraph`] resolves each task's dependency references into petgraph
//! node indices once, up front. Node indices are assigned in input order, so
//! `NodeIndex::index()` doubles as a dense arena index into the task slice
//! and into any per-task marker or metric vectors.

use crate::core::task::{Task, TaskId};
use crate::tlog_warn;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A dependency reference that names no task in the input set.
///
/// The edge is dropped from the graph; the record is surfaced as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedDependency {
    /// The task holding the reference.
    pub task: TaskId,
    /// The id that could not be found.
    pub missing: TaskId,
}

impl std::fmt::Display for UnresolvedDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "task {} depends on unknown task {}",
            self.task, self.missing
        )
    }
}

/// The dependency graph for one analysis call.
///
/// An edge `a -> b` means "a depends on b".
pub struct TaskGraph<'a> {
    graph: DiGraph<&'a Task, ()>,
    task_index: HashMap<&'a TaskId, NodeIndex>,
    unresolved: Vec<UnresolvedDependency>,
}

impl<'a> TaskGraph<'a> {
    /// Build the graph from a task slice.
    ///
    /// Every task becomes a node, even when none of its references resolve.
    /// Ids are expected to be unique; on a repeat the first task wins.
    pub fn build(tasks: &'a [Task]) -> Self {
        let mut graph = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut task_index = HashMap::with_capacity(tasks.len());

        for task in tasks {
            let index = graph.add_node(task);
            task_index.entry(&task.id).or_insert(index);
        }

        let mut unresolved = Vec::new();
        for (position, task) in tasks.iter().enumerate() {
            let from = NodeIndex::new(position);
            for dep in &task.dependencies {
                match task_index.get(dep) {
                    Some(&to) => {
                        graph.add_edge(from, to, ());
                    }
                    None => {
                        tlog_warn!("Task {} references unknown dependency {}", task.id, dep);
                        unresolved.push(UnresolvedDependency {
                            task: task.id.clone(),
                            missing: dep.clone(),
                        });
                    }
                }
            }
        }

        Self {
            graph,
            task_index,
            unresolved,
        }
    }

    /// Number of tasks (nodes).
    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of resolved dependency edges.
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_index(&self, id: &TaskId) -> Option<NodeIndex> {
        self.task_index.get(id).copied()
    }

    /// The task stored at a node.
    ///
    /// # Panics
    /// Panics if `index` did not come from this graph.
    pub fn task(&self, index: NodeIndex) -> &'a Task {
        self.graph[index]
    }

    /// Resolved dependencies of a task, in ascending id order.
    pub fn dependencies_of(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_neighbors(index, Direction::Outgoing)
    }

    /// Tasks that directly depend on this one, in ascending id order.
    pub fn dependents_of(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_neighbors(index, Direction::Incoming)
    }

    /// References that did not resolve, in input order.
    pub fn unresolved(&self) -> &[UnresolvedDependency] {
        &self.unresolved
    }

    /// All node indices, in input order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Node indices sorted by task id, for deterministic traversals.
    pub fn nodes_by_id(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        nodes.sort_by(|a, b| self.graph[*a].id.cmp(&self.graph[*b].id));
        nodes
    }

    /// Get the underlying graph for algorithms that need direct access.
    pub fn graph(&self) -> &DiGraph<&'a Task, ()> {
        &self.graph
    }

    fn sorted_neighbors(&self, index: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors_directed(index, dir).collect();
        neighbors.sort_by(|a, b| self.graph[*a].id.cmp(&self.graph[*b].id));
        neighbors.dedup();
        neighbors
    }
}

impl std::fmt::Debug for TaskGraph<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGraph")
            .field("tasks", &self.task_count())
            .field("dependencies", &self.dependency_count())
            .field("unresolved", &self.unresolved.len())
            .finish()
    }
}
