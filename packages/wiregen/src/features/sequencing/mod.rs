//! Sequencing stage: dependency graph → topological order

mod topo;

pub use topo::{NodeState, TopologicalOrder, TopologicalSequencer};
