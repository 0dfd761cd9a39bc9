//! Task record model and collection types for the tasklens analyzer.
//!
//! This crate defines the payload-facing [`Task`] record and the
//! insertion-ordered [`TaskSet`] collection the analysis pipeline builds
//! before handing tasks to dependency analysis in `tasklens-graph`.
//!
//! # Key Types
//!
//! - [`Task`]: a single task record with scheduling attributes and declared
//!   dependencies
//! - [`TaskSet`]: an insertion-ordered, uniqueness-enforcing collection of
//!   tasks keyed by identifier
//!
//! # Example
//!
//! ```
//! use tasklens_core::{Task, TaskSet};
//!
//! let records: Vec<Task> = serde_json::from_str(
//!     r#"[
//!         {"id": "deploy", "dependencies": ["test"]},
//!         {"id": "test", "dependencies": ["deploy"]}
//!     ]"#,
//! )?;
//!
//! let tasks = TaskSet::from_tasks(records)?;
//! let graph = tasks.dependency_graph()?;
//!
//! assert!(graph.has_cycle());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod set;
mod task;

pub use set::{TaskSet, TaskSetError};
pub use task::Task;
