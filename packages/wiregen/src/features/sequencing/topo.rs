//! Topological sequencer (Kahn's algorithm)
//!
//! The ready queue is FIFO and seeded in declaration order; dependents are
//! released in declaration order. The resulting order is therefore a pure
//! function of the declarations.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

use crate::errors::{Result, WiregenError};
use crate::features::resolution::DependencyGraph;

/// Sequencing state of one node; transitions only move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Still waiting for at least one dependency
    Unvisited,
    /// All dependencies ordered, queued
    Ready,
    /// Appended to the order
    Ordered,
}

/// Permutation of all functions respecting the dependency graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopologicalOrder {
    /// Graph node indices, dependencies first
    nodes: Vec<usize>,
    names: Vec<String>,
    #[serde(skip)]
    position: HashMap<String, usize>,
}

impl TopologicalOrder {
    /// Graph node indices in order
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a function in the order (its structure bit)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.position.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Orders a dependency graph or reports its cycles
pub struct TopologicalSequencer<'g> {
    graph: &'g DependencyGraph,
    states: Vec<NodeState>,
}

impl<'g> TopologicalSequencer<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self {
            graph,
            states: vec![NodeState::Unvisited; graph.node_count()],
        }
    }

    /// Compute the order.
    ///
    /// Fails with [`WiregenError::CycleDetected`] if any node cannot be
    /// ordered; the error lists every cyclic group and the nodes blocked
    /// behind them.
    pub fn sequence(mut self) -> Result<TopologicalOrder> {
        let count = self.graph.node_count();
        let mut in_degree: Vec<usize> = (0..count)
            .map(|node| self.graph.dependencies_of(node).len())
            .collect();

        let mut queue = VecDeque::new();
        for node in 0..count {
            if in_degree[node] == 0 {
                self.states[node] = NodeState::Ready;
                queue.push_back(node);
            }
        }

        let mut nodes = Vec::with_capacity(count);
        while let Some(node) = queue.pop_front() {
            self.states[node] = NodeState::Ordered;
            nodes.push(node);

            for &dependent in self.graph.dependents_of(node) {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    self.states[dependent] = NodeState::Ready;
                    queue.push_back(dependent);
                }
            }
        }

        if nodes.len() < count {
            return Err(self.cycle_error());
        }

        let names: Vec<String> = nodes
            .iter()
            .map(|&node| self.graph.name(node).to_string())
            .collect();
        let position = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        debug!("Ordered {} functions", nodes.len());
        Ok(TopologicalOrder {
            nodes,
            names,
            position,
        })
    }

    fn cycle_error(&self) -> WiregenError {
        let cycles = self.graph.cycles();
        let cyclic: Vec<usize> = cycles.iter().flatten().copied().collect();
        let blocked: Vec<String> = (0..self.graph.node_count())
            .filter(|&node| self.states[node] != NodeState::Ordered && !cyclic.contains(&node))
            .map(|node| self.graph.name(node).to_string())
            .collect();

        let cycles: Vec<Vec<String>> = cycles
            .into_iter()
            .map(|members| {
                members
                    .into_iter()
                    .map(|node| self.graph.name(node).to_string())
                    .collect()
            })
            .collect();

        warn!(
            "{} cyclic group(s), {} blocked function(s)",
            cycles.len(),
            blocked.len()
        );
        WiregenError::cycle(cycles, blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::features::extraction::SignatureExtractor;
    use crate::features::resolution::FunctionTable;
    use crate::shared::{FunctionKind, NamingConvention};

    fn graph(source: &str) -> DependencyGraph {
        let config = GeneratorConfig::default();
        let conv = NamingConvention::new(&config.naming, &config.emit);
        let set = SignatureExtractor::new(conv, &[FunctionKind::Construct]).extract(source);
        DependencyGraph::build(&FunctionTable::build(&set, &conv).unwrap())
    }

    fn order(source: &str) -> Vec<String> {
        let g = graph(source);
        TopologicalSequencer::new(&g)
            .sequence()
            .unwrap()
            .names()
            .to_vec()
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let names = order(
            "function construct_c(a) {}\nfunction construct_b() {}\nfunction construct_a() {}",
        );
        assert_eq!(names, vec!["construct_b", "construct_a", "construct_c"]);
    }

    #[test]
    fn test_dependencies_come_first() {
        let names = order(
            "function construct_z(y) {}\nfunction construct_y(x) {}\nfunction construct_x(text) {}",
        );
        assert_eq!(names, vec!["construct_x", "construct_y", "construct_z"]);
    }

    #[test]
    fn test_dependents_released_in_declaration_order() {
        let names = order(
            "function construct_root() {}\n\
             function construct_q(root) {}\n\
             function construct_p(root) {}",
        );
        assert_eq!(names, vec!["construct_root", "construct_q", "construct_p"]);
    }

    #[test]
    fn test_position_lookup() {
        let g = graph("function construct_b(a) {}\nfunction construct_a() {}");
        let order = TopologicalSequencer::new(&g).sequence().unwrap();
        assert_eq!(order.position("construct_a"), Some(0));
        assert_eq!(order.position("construct_b"), Some(1));
        assert_eq!(order.nodes(), &[1, 0]);
    }

    #[test]
    fn test_two_cycle_names_both() {
        let g = graph("function construct_a(b) {}\nfunction construct_b(a) {}");
        let err = TopologicalSequencer::new(&g).sequence().unwrap_err();
        assert_eq!(err.cycle_members(), vec!["construct_a", "construct_b"]);
    }

    #[test]
    fn test_blocked_nodes_reported() {
        let g = graph(
            "function construct_a(b) {}\n\
             function construct_b(a) {}\n\
             function construct_c(a) {}\n\
             function construct_d() {}",
        );
        match TopologicalSequencer::new(&g).sequence().unwrap_err() {
            WiregenError::CycleDetected { cycles, blocked } => {
                assert_eq!(cycles, vec![vec!["construct_a", "construct_b"]]);
                assert_eq!(blocked, vec!["construct_c"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cycle_message_follows_dependencies() {
        let g = graph(
            "function construct_a(c) {}\nfunction construct_b(a) {}\nfunction construct_c(b) {}",
        );
        let err = TopologicalSequencer::new(&g).sequence().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Dependency cycle detected: [construct_a -> construct_c -> construct_b -> construct_a]"
        );
    }

    #[test]
    fn test_scc_members_off_the_cycle_are_blocked() {
        let g = graph(
            "function construct_a(b, c) {}\n\
             function construct_b(a) {}\n\
             function construct_c(a) {}",
        );
        match TopologicalSequencer::new(&g).sequence().unwrap_err() {
            WiregenError::CycleDetected { cycles, blocked } => {
                assert_eq!(cycles, vec![vec!["construct_a", "construct_b"]]);
                assert_eq!(blocked, vec!["construct_c"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_graph() {
        assert!(order("const x = 1;").is_empty());
    }
}
