//! Cycle enumeration over the dependency relation.
//!
//! Detection is a depth-first traversal with on-stack tracking, implemented
//! with an explicit frame stack so deep graphs cannot exhaust the thread
//! stack. A back edge to a node on the active path closes a cycle; the path
//! segment from that node's first occurrence to the current position is the
//! reported cycle.

use crate::{DependencyGraph, TaskNode};
use petgraph::graph::NodeIndex;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// An ordered closed walk of task identifiers under the dependency relation.
///
/// The path starts at the task where the cycle was re-entered and lists each
/// member once: `[A, B, C]` describes A depending on B, B on C, and C back
/// on A.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Task identifiers in traversal order, starting at the re-entry task.
    pub path: Vec<String>,
}

impl Cycle {
    /// Create a cycle from an ordered identifier path.
    #[must_use]
    pub fn new(path: Vec<String>) -> Self {
        Self { path }
    }

    /// Number of tasks participating in the cycle.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.path.len()
    }

    /// Whether the cycle is a task depending on itself.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.path.len() == 1
    }

    /// Whether the given task participates in this cycle.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.path.iter().any(|member| member == id)
    }

    /// The task at which the cycle was re-entered, if the path is nonempty.
    #[must_use]
    pub fn entry_point(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

impl fmt::Display for Cycle {
    /// Renders the closed walk with the entry task repeated at the end,
    /// e.g. `a -> b -> c -> a`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{id}")?;
        }
        if let Some(first) = self.path.first() {
            write!(f, " -> {first}")?;
        }
        Ok(())
    }
}

impl<T: TaskNode> DependencyGraph<T> {
    /// Enumerate every dependency cycle found in one detection pass.
    ///
    /// Each task is tried as a traversal root in insertion order, so cycles
    /// in disconnected parts of the graph are all found; dependency
    /// successors are followed in declared order, making the result
    /// deterministic for a given construction order. Traversal state lives
    /// entirely in this call, so repeated invocations return identical
    /// results and concurrent invocations do not interfere.
    ///
    /// Overlapping cycles through a shared task are reported once per
    /// discovery and are not deduplicated. Subgraphs already explored from
    /// an earlier root are skipped as known acyclic, so the pass finds at
    /// least one cycle per cyclic component rather than every elementary
    /// cycle.
    #[must_use]
    pub fn cycles(&self) -> Vec<Cycle> {
        let mut cycles = Vec::new();
        let mut visited: HashSet<NodeIndex> = HashSet::new();

        for root in self.node_indices() {
            if !visited.contains(&root) {
                self.collect_cycles_from(root, &mut visited, &mut cycles);
            }
        }

        cycles
    }

    /// Iterative DFS from `root`, appending every cycle closed by a back
    /// edge to `cycles`.
    fn collect_cycles_from(
        &self,
        root: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        cycles: &mut Vec<Cycle>,
    ) {
        // Explicit stack of (node, resolved successors, next successor index).
        let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();
        let mut path: Vec<NodeIndex> = Vec::new();
        let mut on_path: HashSet<NodeIndex> = HashSet::new();

        visited.insert(root);
        on_path.insert(root);
        path.push(root);
        stack.push((root, self.dependency_successors(root), 0));

        while let Some(frame) = stack.last_mut() {
            let (node, successors, next) = frame;

            if *next >= successors.len() {
                // Fully explored: leave the active path but stay visited.
                let node = *node;
                stack.pop();
                path.pop();
                on_path.remove(&node);
                continue;
            }

            let successor = successors[*next];
            *next += 1;

            if on_path.contains(&successor) {
                // Back edge: the path from the first occurrence of the
                // successor to the current node is a closed walk. The
                // successor is not descended into again.
                if let Some(start) = path.iter().position(|&n| n == successor) {
                    let ids: Vec<String> = path[start..]
                        .iter()
                        .map(|&index| self.id_of(index).to_string())
                        .collect();
                    let cycle = Cycle::new(ids);
                    debug!("Detected dependency cycle: {}", cycle);
                    cycles.push(cycle);
                }
            } else if !visited.contains(&successor) {
                visited.insert(successor);
                on_path.insert(successor);
                path.push(successor);
                stack.push((successor, self.dependency_successors(successor), 0));
            }
        }
    }
}
