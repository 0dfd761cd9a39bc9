//! Graph validation built on cycle detection.

use crate::{Cycle, DanglingDependency, DependencyGraph, TaskNode};
use std::collections::BTreeSet;
use tracing::debug;

/// Outcome of validating a dependency graph.
///
/// A graph is valid exactly when it contains no dependency cycles. Dangling
/// dependency references are carried for inspection but do not affect
/// validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Whether the graph is free of dependency cycles.
    pub is_valid: bool,
    /// Every cycle found during detection, in discovery order.
    pub cycles: Vec<Cycle>,
    /// Dependency references that named no known task.
    pub dangling: Vec<DanglingDependency>,
}

impl ValidationReport {
    /// Distinct identifiers of tasks participating in at least one cycle,
    /// in sorted order.
    #[must_use]
    pub fn cyclic_task_ids(&self) -> BTreeSet<&str> {
        self.cycles
            .iter()
            .flat_map(|cycle| cycle.path.iter().map(String::as_str))
            .collect()
    }
}

impl<T: TaskNode> DependencyGraph<T> {
    /// Run cycle detection and collect the findings into a report.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let cycles = self.cycles();
        if !cycles.is_empty() {
            debug!("Validation found {} dependency cycle(s)", cycles.len());
        }

        ValidationReport {
            is_valid: cycles.is_empty(),
            cycles,
            dangling: self.dangling_dependencies().to_vec(),
        }
    }
}
