//! Task dependency graph construction and cycle detection for tasklens.
//!
//! This crate builds a directed dependency graph from a keyed collection of
//! task records and reports circular dependency chains among them. It is the
//! algorithmic core consumed by the scoring/suggestion pipeline: the
//! surrounding layers feed it task records and use the detected cycles to
//! warn about or exclude cyclic tasks.
//!
//! # Key Types
//!
//! - [`DependencyGraph`]: the graph structure for building and querying task
//!   dependencies
//! - [`TaskNode`]: trait that task record types implement to participate in
//!   a graph
//! - [`Cycle`]: an ordered closed walk of task identifiers
//! - [`ValidationReport`]: cycles and dangling references rolled up for the
//!   consuming pipeline
//!
//! # Example
//!
//! ```
//! use tasklens_graph::{DependencyGraph, TaskNode};
//!
//! struct Record {
//!     deps: Vec<String>,
//! }
//!
//! impl TaskNode for Record {
//!     fn dependency_ids(&self) -> impl Iterator<Item = &str> {
//!         self.deps.iter().map(String::as_str)
//!     }
//! }
//!
//! # fn main() -> Result<(), tasklens_graph::Error> {
//! let graph = DependencyGraph::from_tasks([
//!     ("deploy".to_string(), Record { deps: vec!["test".into()] }),
//!     ("test".to_string(), Record { deps: vec!["deploy".into()] }),
//! ])?;
//!
//! assert!(graph.has_cycle());
//! assert_eq!(graph.cycles()[0].path, vec!["deploy", "test"]);
//! # Ok(())
//! # }
//! ```

mod cycles;
mod error;
mod graph;
mod validation;

pub use cycles::Cycle;
pub use error::{Error, Result};
pub use graph::{DanglingDependency, DependencyGraph, GraphNode};
pub use validation::ValidationReport;

/// Trait for task records that can be stored in a dependency graph.
///
/// Implement this trait for your record type to enable it to be stored in a
/// [`DependencyGraph`] and traversed during cycle detection. The graph only
/// reads records through this trait; it never mutates them.
pub trait TaskNode {
    /// Identifiers of the tasks this task depends on, in declared order.
    ///
    /// Returned identifiers may reference tasks that are absent from the
    /// graph; such dangling references are skipped during edge linking and
    /// recorded on the graph rather than treated as errors.
    fn dependency_ids(&self) -> impl Iterator<Item = &str>;
}
