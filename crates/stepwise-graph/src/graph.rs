//! Undirected weighted graph model and validation.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use stepwise_trace::{Result, TraceError};

/// Index of an edge in [`Graph::edges`].
pub type EdgeId = usize;

/// Largest accepted edge weight. Keeps path sums far from overflow.
pub const MAX_WEIGHT: u64 = 1_000_000;

/// Largest accepted node count.
pub const MAX_NODES: usize = 256;

/// Largest accepted edge count. Kruskal records a frame per examined edge,
/// each holding the full component partition.
pub const MAX_EDGES: usize = 1024;

/// An undirected weighted edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default = "default_weight")]
    pub weight: u64,
}

fn default_weight() -> u64 {
    1
}

impl Edge {
    /// Create an edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: u64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// The endpoint opposite `node`.
    pub fn other(&self, node: &str) -> &str {
        if self.from == node {
            &self.to
        } else {
            &self.from
        }
    }

    /// Display label such as `A-B`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

/// A neighbor reached over a specific edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor<'a> {
    pub node: &'a str,
    pub edge: EdgeId,
    pub weight: u64,
}

/// Fixed graph topology supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Graph {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Create a graph from node ids and edges.
    pub fn new<S: Into<String>>(nodes: impl IntoIterator<Item = S>, edges: Vec<Edge>) -> Self {
        Self {
            nodes: nodes.into_iter().map(Into::into).collect(),
            edges,
        }
    }

    /// Whether `id` is a node of this graph.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n == id)
    }

    /// Check structural soundness.
    ///
    /// Rejects an empty node set, more than [`MAX_NODES`] nodes or
    /// [`MAX_EDGES`] edges, duplicate ids, dangling edge endpoints and weights
    /// above [`MAX_WEIGHT`].
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(TraceError::invalid("graph has no nodes"));
        }
        if self.nodes.len() > MAX_NODES {
            return Err(TraceError::InvalidInput(format!(
                "graph has {} nodes, at most {} are supported",
                self.nodes.len(),
                MAX_NODES
            )));
        }
        if self.edges.len() > MAX_EDGES {
            return Err(TraceError::InvalidInput(format!(
                "graph has {} edges, at most {} are supported",
                self.edges.len(),
                MAX_EDGES
            )));
        }

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if node.is_empty() {
                return Err(TraceError::invalid("node ids must not be empty"));
            }
            if !seen.insert(node.as_str()) {
                return Err(TraceError::InvalidInput(format!("duplicate node id {}", node)));
            }
        }

        for (id, edge) in self.edges.iter().enumerate() {
            for endpoint in [&edge.from, &edge.to] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(TraceError::UnknownNode(endpoint.clone()));
                }
            }
            if edge.weight > MAX_WEIGHT {
                return Err(TraceError::InvalidInput(format!(
                    "edge {} ({}) weight {} exceeds {}",
                    id,
                    edge.label(),
                    edge.weight,
                    MAX_WEIGHT
                )));
            }
        }
        Ok(())
    }

    /// Fail with [`TraceError::UnknownNode`] unless `id` exists.
    pub fn require(&self, id: &str) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(TraceError::UnknownNode(id.to_string()))
        }
    }

    /// Neighbors of `node`, ordered lexicographically by node id, then by edge id.
    pub fn neighbors(&self, node: &str) -> Vec<Neighbor<'_>> {
        let mut out: Vec<_> = self
            .edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.from == node || e.to == node)
            .map(|(edge, e)| Neighbor {
                node: e.other(node),
                edge,
                weight: e.weight,
            })
            .collect();
        out.sort_by(|a, b| a.node.cmp(b.node).then(a.edge.cmp(&b.edge)));
        out
    }

    /// Adjacency lists for every node, each ordered as [`Graph::neighbors`].
    pub(crate) fn adjacency(&self) -> BTreeMap<&str, Vec<Neighbor<'_>>> {
        self.nodes
            .iter()
            .map(|n| (n.as_str(), self.neighbors(n)))
            .collect()
    }

    /// Position of `id` in [`Graph::nodes`].
    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == id)
    }
}

/// The six-node weighted graph used by the playground demos.
///
/// Shortest path A to F is A, C, B, D, E, F (cost 13); the minimum spanning
/// tree also weighs 13.
pub fn demo_graph() -> Graph {
    Graph::new(
        ["A", "B", "C", "D", "E", "F"],
        vec![
            Edge::new("A", "B", 4),
            Edge::new("A", "C", 2),
            Edge::new("B", "C", 1),
            Edge::new("B", "D", 5),
            Edge::new("C", "D", 8),
            Edge::new("C", "E", 10),
            Edge::new("D", "E", 2),
            Edge::new("D", "F", 6),
            Edge::new("E", "F", 3),
        ],
    )
}

/// A cycle through `ids` in order, closing back to the first node; every
/// edge has weight 1.
pub fn ring_graph(ids: &[&str]) -> Graph {
    let n = ids.len();
    let edges = match n {
        0 | 1 => Vec::new(),
        2 => vec![Edge::new(ids[0], ids[1], 1)],
        _ => (0..n).map(|i| Edge::new(ids[i], ids[(i + 1) % n], 1)).collect(),
    };
    Graph::new(ids.iter().copied(), edges)
}
