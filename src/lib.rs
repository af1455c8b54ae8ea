pub mod analyze;
pub mod canonical;
pub mod deep_equal;
pub mod error;
pub mod merge;
pub mod tree;

// Re-export functions if needed
pub use analyze::{analyze, Stats};
pub use canonical::canonicalize;
pub use error::{TreeError, TreeResult};
pub use merge::merge_trees;
