//! Task record model matching the analyzer payload schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tasklens_graph::TaskNode;

/// A unit of work with scheduling attributes and dependency declarations.
///
/// Every field beyond `id` is optional in payloads. The scheduling fields
/// (`importance`, `estimated_hours`, `due_date`) are passive data consumed
/// by the scoring layer; dependency analysis reads only `id` and
/// `dependencies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,

    /// Short human-readable title.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Importance on a 1 to 10 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<u8>,

    /// Estimated effort in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    /// Calendar date the task is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Identifiers of tasks that must complete first, in declared order.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Task {
    /// Create a task with the given identifier and every other field unset.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: None,
            importance: None,
            estimated_hours: None,
            due_date: None,
            dependencies: vec![],
        }
    }
}

impl TaskNode for Task {
    fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(String::as_str)
    }
}
