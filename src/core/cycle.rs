//! Cycle detection over the dependency graph.
//!
//! The search is an iterative depth-first traversal with an explicit frame
//! stack, so deep dependency chains cannot overflow the call stack. Two
//! marker vectors indexed by the dense node index track state:
//!
//! - `on_stack`: the node is on the current traversal path
//! - `explored`: every path out of the node has been followed
//!
//! An edge to an `on_stack` node closes a cycle made of the path segment from
//! that node to the current one. The traversal keeps going afterwards so that
//! every cycle reachable this way is reported, not just the first.

use crate::core::dag::TaskGraph;
use crate::core::task::TaskId;
use crate::tlog_debug;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// All dependency cycles found in a task set.
///
/// Each cycle lists its members in dependency order, starting from its lowest
/// id and without repeating that id at the end. Cycles are sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleReport {
    cycles: Vec<Vec<TaskId>>,
}

impl CycleReport {
    pub fn new(mut cycles: Vec<Vec<TaskId>>) -> Self {
        cycles.sort();
        cycles.dedup();
        Self { cycles }
    }

    pub fn cycles(&self) -> &[Vec<TaskId>] {
        &self.cycles
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }
}

impl std::fmt::Display for CycleReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, cycle) in self.cycles.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            for id in cycle {
                write!(f, "{} -> ", id)?;
            }
            if let Some(first) = cycle.first() {
                write!(f, "{}", first)?;
            }
        }
        Ok(())
    }
}

struct Frame {
    node: NodeIndex,
    deps: Vec<NodeIndex>,
    cursor: usize,
}

/// Find every dependency cycle reachable by the traversal.
///
/// Roots and neighbors are visited in ascending id order, so the result only
/// depends on the task set, not on input order.
pub fn detect_cycles(graph: &TaskGraph<'_>) -> CycleReport {
    let n = graph.task_count();
    let mut explored = vec![false; n];
    let mut on_stack = vec![false; n];
    let mut found: Vec<Vec<TaskId>> = Vec::new();

    for root in graph.nodes_by_id() {
        if explored[root.index()] {
            continue;
        }

        on_stack[root.index()] = true;
        let mut stack = vec![Frame {
            node: root,
            deps: graph.dependencies_of(root),
            cursor: 0,
        }];

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };

            let next = frame.deps.get(frame.cursor).copied();
            frame.cursor += 1;

            match next {
                Some(next) if on_stack[next.index()] => {
                    if let Some(start) = stack.iter().position(|f| f.node == next) {
                        let members: Vec<NodeIndex> =
                            stack[start..].iter().map(|f| f.node).collect();
                        found.push(normalize(graph, &members));
                    }
                }
                Some(next) if !explored[next.index()] => {
                    on_stack[next.index()] = true;
                    stack.push(Frame {
                        node: next,
                        deps: graph.dependencies_of(next),
                        cursor: 0,
                    });
                }
                Some(_) => {}
                None => {
                    on_stack[frame.node.index()] = false;
                    explored[frame.node.index()] = true;
                    stack.pop();
                }
            }
        }
    }

    let report = CycleReport::new(found);
    tlog_debug!("Cycle detection: {} task(s), {} cycle(s)", n, report.len());
    report
}

/// Rotate a cycle so it starts at its lowest id.
fn normalize(graph: &TaskGraph<'_>, members: &[NodeIndex]) -> Vec<TaskId> {
    let mut ids: Vec<TaskId> = members
        .iter()
        .map(|&n| graph.task(n).id.clone())
        .collect();
    let lowest = ids
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    ids.rotate_left(lowest);
    ids
}
