//! Petgraph view of a reference graph.
//!
//! Edges are kept in `ReferenceRecorder` as ordered sets; this module copies
//! them into a `DiGraph` when an algorithm needs one.
//!
//! | Operation | Algorithm |
//! |-----------|-----------|
//! | Cycle detection | Tarjan's SCC algorithm |
//! | DOT export | `petgraph::dot` |

use std::collections::BTreeMap;

use petgraph::algo::tarjan_scc;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::types::Cycle;

/// A directed graph over entity names.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    index: BTreeMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(from, to)` pairs. Nodes are created on first use.
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Add an edge; duplicates are ignored.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from = self.node(from);
        let to = self.node(to);
        self.graph.update_edge(from, to, ());
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Groups of entities that reach each other, each sorted, ordered by their
    /// first member. Self-references alone do not form a cycle.
    #[must_use]
    pub fn detect_cycles(&self) -> Vec<Cycle> {
        let mut cycles: Vec<Cycle> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut packages: Vec<String> = component
                    .into_iter()
                    .map(|idx| self.graph[idx].clone())
                    .collect();
                packages.sort();
                Cycle { packages }
            })
            .collect();
        cycles.sort_by(|a, b| a.packages.cmp(&b.packages));
        cycles
    }

    /// Graphviz rendering.
    #[must_use]
    pub fn to_dot(&self) -> String {
        // Dot renders through `Display`, which `()` lacks.
        let labelled = self.graph.map(|_, name| name.as_str(), |_, _| "");
        Dot::with_config(&labelled, &[Config::EdgeNoLabel]).to_string()
    }
}
