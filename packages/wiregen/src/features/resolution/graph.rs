//! Dependency graph with petgraph
//!
//! Directed graph where:
//! - Nodes are target functions, added in declaration order
//! - Edges represent dependencies (A → B means A needs B's output)
//!
//! Edge lists are kept separately in first-mention order so that every
//! traversal is deterministic; petgraph is used for SCC analysis.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};

use super::table::FunctionTable;

/// Function → distinct providers it depends on
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    node_of: HashMap<String, NodeIndex>,
    /// Providers per node, first-mention order, no duplicates
    dependencies: Vec<Vec<usize>>,
    /// Dependents per node, declaration order
    dependents: Vec<Vec<usize>>,
}

impl DependencyGraph {
    pub fn build(table: &FunctionTable) -> Self {
        let mut graph = DiGraph::with_capacity(table.len(), 0);
        let mut node_of = HashMap::with_capacity(table.len());

        for record in table.iter() {
            let idx = graph.add_node(record.name.clone());
            node_of.insert(record.name.clone(), idx);
        }

        let mut dependencies = vec![Vec::new(); table.len()];
        let mut dependents = vec![Vec::new(); table.len()];

        for (from, record) in table.iter().enumerate() {
            for provider in record.providers() {
                // Providers are table members by construction
                let Some(&to) = node_of.get(provider) else {
                    continue;
                };
                graph.add_edge(NodeIndex::new(from), to, ());
                dependencies[from].push(to.index());
                dependents[to.index()].push(from);
            }
        }

        Self {
            graph,
            node_of,
            dependencies,
            dependents,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Function name of a node
    pub fn name(&self, node: usize) -> &str {
        &self.graph[NodeIndex::new(node)]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.node_of.get(name).map(|idx| idx.index())
    }

    /// Nodes this node depends on
    pub fn dependencies_of(&self, node: usize) -> &[usize] {
        &self.dependencies[node]
    }

    /// Nodes depending on this node, declaration order
    pub fn dependents_of(&self, node: usize) -> &[usize] {
        &self.dependents[node]
    }

    /// One cycle per cyclic SCC (more than one member, or a self-loop).
    ///
    /// Each cycle is a dependency path: it starts at the earliest declared
    /// member, every node depends on the next, and the last depends on the
    /// first. Members of the SCC off that path are not listed. Cycles are
    /// sorted by their first node.
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let mut cycles: Vec<Vec<usize>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .filter_map(|scc| {
                let members: HashSet<usize> = scc.iter().map(|n| n.index()).collect();
                let start = *members.iter().min()?;
                Some(self.cycle_through(start, &members))
            })
            .collect();
        cycles.sort_by_key(|path| path[0]);
        cycles
    }

    /// Shortest dependency path from `start` back to itself within `members`
    fn cycle_through(&self, start: usize, members: &HashSet<usize>) -> Vec<usize> {
        let mut parent: HashMap<usize, usize> = HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for &dep in &self.dependencies[node] {
                if dep == start {
                    let mut path = vec![node];
                    let mut current = node;
                    while let Some(&prev) = parent.get(&current) {
                        path.push(prev);
                        current = prev;
                    }
                    path.reverse();
                    return path;
                }
                if members.contains(&dep) && !parent.contains_key(&dep) {
                    parent.insert(dep, node);
                    queue.push_back(dep);
                }
            }
        }

        vec![start]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::features::extraction::SignatureExtractor;
    use crate::shared::{FunctionKind, NamingConvention};

    fn graph(source: &str) -> DependencyGraph {
        let config = GeneratorConfig::default();
        let conv = NamingConvention::new(&config.naming, &config.emit);
        let set = SignatureExtractor::new(conv, &[FunctionKind::Construct]).extract(source);
        DependencyGraph::build(&FunctionTable::build(&set, &conv).unwrap())
    }

    #[test]
    fn test_edges_are_a_set() {
        let g = graph(
            "function construct_a() {}\nfunction construct_b(a, a, text) {}",
        );
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.dependencies_of(1), &[0]);
        assert_eq!(g.dependents_of(0), &[1]);
        assert_eq!(g.index_of("construct_b"), Some(1));
    }

    #[test]
    fn test_cycles_include_self_loops() {
        let g = graph(
            "function construct_x(x) {}\n\
             function construct_a(b) {}\n\
             function construct_b(a) {}\n\
             function construct_ok() {}",
        );
        assert_eq!(g.cycles(), vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_cycle_follows_dependency_edges() {
        // a needs c, c needs b, b needs a
        let g = graph(
            "function construct_a(c) {}\nfunction construct_b(a) {}\nfunction construct_c(b) {}",
        );
        assert_eq!(g.cycles(), vec![vec![0, 2, 1]]);
    }

    #[test]
    fn test_cycle_is_shortest_path_through_first_member() {
        let g = graph(
            "function construct_a(c, b) {}\n\
             function construct_b(a) {}\n\
             function construct_c(b) {}",
        );
        assert_eq!(g.cycles(), vec![vec![0, 1]]);
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let g = graph("function construct_a() {}\nfunction construct_b(a) {}");
        assert!(g.cycles().is_empty());
    }
}
