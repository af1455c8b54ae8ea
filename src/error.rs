/// Errors surfaced by the core tree operations.
///
/// A failed call never leaves partially merged output behind; inputs are
/// untouched, so callers need no rollback.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// The input value does not have the expected tree shape.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    /// The input nests deeper than the configured recursion limit.
    #[error("maximum nesting depth of {limit} exceeded")]
    DepthExceeded { limit: usize },
}

/// Convenience alias for core results.
pub type TreeResult<T> = Result<T, TreeError>;
