//! Resolution stage
//!
//! Signatures → function table (typed dependencies, output keys) and the
//! dependency graph derived from it.

mod graph;
mod table;

pub use graph::DependencyGraph;
pub use table::{FunctionTable, UnresolvedDependency};
