//! Error types for dependency graph construction.

/// Result type for dependency graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a dependency graph.
///
/// Detection itself never fails: dangling dependency references are treated
/// as absent edges, not errors. The only caller contract enforced at runtime
/// is identifier uniqueness during construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Two task records were supplied under the same identifier.
    #[error("duplicate task identifier '{id}'")]
    DuplicateTask {
        /// The identifier that appeared more than once.
        id: String,
    },
}
