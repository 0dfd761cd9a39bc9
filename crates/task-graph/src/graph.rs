//! Dependency graph builder using petgraph.
//!
//! This module assembles a directed graph from a keyed collection of task
//! records. Edges point from a task to each of its resolvable dependencies;
//! references to tasks absent from the collection are recorded as dangling
//! and never become edges.

use crate::{Error, Result, TaskNode};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::IntoNodeReferences;
use std::collections::HashMap;
use tracing::debug;

/// A node in the dependency graph.
#[derive(Debug, Clone)]
pub struct GraphNode<T> {
    /// Identifier of the task.
    pub id: String,
    /// The task record.
    pub task: T,
}

/// A dependency declaration that references a task absent from the graph.
///
/// Dangling references are not errors: the edge is simply skipped during
/// linking. They are kept on the graph so the consuming layer can surface
/// them in a [`ValidationReport`](crate::ValidationReport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingDependency {
    /// The task that declared the dependency.
    pub task: String,
    /// The identifier that did not resolve to any task.
    pub dependency: String,
}

/// Dependency graph over a keyed collection of task records.
///
/// The graph is generic over any record type implementing [`TaskNode`]. It
/// is built once from `(identifier, record)` pairs and queried read-only
/// afterwards; every detection call allocates its own traversal state, so a
/// shared `&DependencyGraph` is usable from multiple threads concurrently.
pub struct DependencyGraph<T: TaskNode> {
    /// The directed graph of tasks. Edges point from task to dependency.
    graph: DiGraph<GraphNode<T>, ()>,
    /// Map from task identifiers to node indices.
    id_to_node: HashMap<String, NodeIndex>,
    /// Dependency references that did not resolve during linking.
    dangling: Vec<DanglingDependency>,
}

impl<T: TaskNode> DependencyGraph<T> {
    /// Create a new empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_to_node: HashMap::new(),
            dangling: Vec::new(),
        }
    }

    /// Build a graph from `(identifier, record)` pairs.
    ///
    /// Insertion order of the pairs is preserved for all iteration and
    /// traversal, so detection results are deterministic for a given input
    /// order. Dependency references that do not resolve to a supplied
    /// identifier are skipped and recorded (see
    /// [`dangling_dependencies`](Self::dangling_dependencies)).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTask`] if two records share an identifier.
    pub fn from_tasks<I>(tasks: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, T)>,
    {
        let mut graph = Self::new();
        for (id, task) in tasks {
            graph.insert(id, task)?;
        }
        graph.link_dependencies();
        Ok(graph)
    }

    /// Add a single task node, rejecting duplicate identifiers.
    fn insert(&mut self, id: String, task: T) -> Result<NodeIndex> {
        if self.id_to_node.contains_key(&id) {
            return Err(Error::DuplicateTask { id });
        }

        debug!("Added task node '{}'", id);
        let index = self.graph.add_node(GraphNode {
            id: id.clone(),
            task,
        });
        self.id_to_node.insert(id, index);
        Ok(index)
    }

    /// Wire dependency edges after all nodes have been added.
    ///
    /// Unresolvable references terminate that edge only: they are logged,
    /// recorded as dangling, and otherwise ignored.
    fn link_dependencies(&mut self) {
        let mut edges = Vec::new();

        for (index, node) in self.graph.node_references() {
            for dep in node.task.dependency_ids() {
                if let Some(&target) = self.id_to_node.get(dep) {
                    edges.push((index, target));
                } else {
                    debug!(
                        "Task '{}' depends on unknown task '{}'; treating as absent edge",
                        node.id, dep
                    );
                    self.dangling.push(DanglingDependency {
                        task: node.id.clone(),
                        dependency: dep.to_string(),
                    });
                }
            }
        }

        for (from, to) in edges {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Check whether the dependency relation contains at least one cycle.
    ///
    /// Every task is considered, so cycles in disconnected parts of the
    /// graph are found. This only answers the boolean question; use
    /// [`cycles`](Self::cycles) to enumerate the offending paths.
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Number of tasks in the graph.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of resolved dependency edges in the graph.
    ///
    /// Dangling references are not edges and do not count.
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph contains no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Check if a task exists in the graph.
    #[must_use]
    pub fn contains_task(&self, id: &str) -> bool {
        self.id_to_node.contains_key(id)
    }

    /// Look up a task record by identifier.
    #[must_use]
    pub fn task(&self, id: &str) -> Option<&T> {
        self.id_to_node.get(id).map(|&index| &self.graph[index].task)
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode<T>> {
        self.graph.node_weights()
    }

    /// Iterate over all task identifiers in insertion order.
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes().map(|node| node.id.as_str())
    }

    /// Dependency references that did not resolve during construction.
    #[must_use]
    pub fn dangling_dependencies(&self) -> &[DanglingDependency] {
        &self.dangling
    }

    /// Node indices in insertion order.
    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Resolved dependency targets of a node, in declared order.
    ///
    /// Dangling references resolve to nothing and are omitted, so the
    /// traversal in [`cycles`](Self::cycles) never leaves the graph.
    pub(crate) fn dependency_successors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.graph[index]
            .task
            .dependency_ids()
            .filter_map(|dep| self.id_to_node.get(dep).copied())
            .collect()
    }

    /// Identifier of the task stored at `index`.
    pub(crate) fn id_of(&self, index: NodeIndex) -> &str {
        &self.graph[index].id
    }
}

impl<T: TaskNode> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}
