//! Cross-namespace reference resolution.
//!
//! Answers point queries against a built [`crate::graph::MappingIndex`],
//! falling back to fuzzy anchoring and expanding transitively on request.

mod resolver;

pub use resolver::{ReferenceResolver, ResolveOptions};
