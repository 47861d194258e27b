/// The mapping multigraph and its candidate lists.
pub mod index;

/// Bounded breadth-first expansion over the mapping index.
pub mod traversal;

/// Analytical queries over a built index.
pub mod queries;

pub use index::{FuzzyCandidateSet, IndexSnapshot, MappingIndex};
pub use queries::{ConflictKind, IndexQueries, IndexStats, MappingConflict, NamespaceStats};
pub use traversal::GraphTraverser;
