//! Insertion-ordered task collection keyed by identifier.

use crate::Task;
use indexmap::IndexMap;
use tasklens_graph::DependencyGraph;
use tracing::debug;

/// Error raised while building a task set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskSetError {
    /// Two records carried the same identifier.
    #[error("duplicate task identifier '{id}'")]
    DuplicateTaskId {
        /// The identifier that appeared more than once.
        id: String,
    },
}

/// An insertion-ordered collection of tasks with unique identifiers.
///
/// Iteration and identifier listing follow insertion order, which makes
/// downstream dependency analysis deterministic for a given input order.
#[derive(Debug, Clone, Default)]
pub struct TaskSet {
    tasks: IndexMap<String, Task>,
}

impl TaskSet {
    /// Create an empty task set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: IndexMap::new(),
        }
    }

    /// Build a task set from a sequence of records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSetError::DuplicateTaskId`] if two records carry the
    /// same identifier.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Result<Self, TaskSetError> {
        let mut set = Self::new();
        for task in tasks {
            set.insert(task)?;
        }
        Ok(set)
    }

    /// Add a task to the set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSetError::DuplicateTaskId`] if a task with the same
    /// identifier is already present.
    pub fn insert(&mut self, task: Task) -> Result<(), TaskSetError> {
        if self.tasks.contains_key(&task.id) {
            return Err(TaskSetError::DuplicateTaskId {
                id: task.id.clone(),
            });
        }

        debug!(
            "Added task '{}' with {} dependencies",
            task.id,
            task.dependencies.len()
        );
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Number of tasks in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the set contains no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether a task with the given identifier is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    /// Look up a task by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Iterate over task identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// Iterate over tasks in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Build a dependency graph over the tasks in this set.
    ///
    /// Records are cloned into the graph in insertion order, so detection
    /// results are deterministic for a given set.
    ///
    /// # Errors
    ///
    /// Propagates graph construction errors. Identifier uniqueness is
    /// already enforced by the set, so construction does not fail in
    /// practice.
    pub fn dependency_graph(&self) -> tasklens_graph::Result<DependencyGraph<Task>> {
        DependencyGraph::from_tasks(
            self.tasks
                .iter()
                .map(|(id, task)| (id.clone(), task.clone())),
        )
    }
}
