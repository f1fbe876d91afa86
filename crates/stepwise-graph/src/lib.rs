//! Stepwise Graph Tracers
//!
//! Traversal, shortest paths and minimum spanning trees over small undirected
//! weighted graphs, recorded as [`GraphState`] traces.
//!
//! # Tie-breaking
//!
//! Neighbors are always considered in lexicographic order of node id (then by
//! edge id for parallel edges). Dijkstra breaks equal distances by discovery
//! order; Kruskal breaks equal weights by input order.
//!
//! # Unreachable goals
//!
//! Not an error. The trace simply ends without a path frame.

mod dijkstra;
mod graph;
mod kruskal;
mod search;
mod state;

use serde::{Deserialize, Serialize};
use stepwise_trace::{Result, Trace, TraceError};

pub use dijkstra::dijkstra;
pub use graph::{demo_graph, ring_graph, Edge, EdgeId, Graph, Neighbor, MAX_EDGES, MAX_NODES, MAX_WEIGHT};
pub use kruskal::{kruskal, UnionFind};
pub use search::{bfs, dfs};
pub use state::{found_path, GraphState};

/// The graph algorithms available for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
    Kruskal,
}

impl GraphAlgorithm {
    /// All variants in display order.
    pub const ALL: [GraphAlgorithm; 4] = [
        GraphAlgorithm::Bfs,
        GraphAlgorithm::Dfs,
        GraphAlgorithm::Dijkstra,
        GraphAlgorithm::Kruskal,
    ];

    /// Whether this algorithm needs a start node.
    pub fn needs_start(self) -> bool {
        !matches!(self, GraphAlgorithm::Kruskal)
    }

    /// Run this algorithm.
    ///
    /// Searches require `start`; Kruskal ignores `start` and `goal`.
    pub fn trace(self, graph: &Graph, start: Option<&str>, goal: Option<&str>) -> Result<Trace<GraphState>> {
        let require_start = || {
            start.ok_or_else(|| TraceError::InvalidInput(format!("{:?} requires a start node", self)))
        };
        match self {
            GraphAlgorithm::Bfs => bfs(graph, require_start()?, goal),
            GraphAlgorithm::Dfs => dfs(graph, require_start()?, goal),
            GraphAlgorithm::Dijkstra => dijkstra(graph, require_start()?, goal),
            GraphAlgorithm::Kruskal => kruskal(graph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[test]
    fn searches_require_a_start() {
        let graph = demo_graph();
        for algorithm in GraphAlgorithm::ALL {
            let result = algorithm.trace(&graph, None, None);
            assert_eq!(result.is_err(), algorithm.needs_start(), "{:?}", algorithm);
        }
    }

    #[test]
    fn empty_graph_fails_for_every_algorithm() {
        let graph = Graph::default();
        for algorithm in GraphAlgorithm::ALL {
            let err = algorithm.trace(&graph, Some("A"), None).unwrap_err();
            assert!(err.is_input_error());
        }
    }

    fn arbitrary_graph() -> impl Strategy<Value = (Graph, usize)> {
        (1usize..8).prop_flat_map(|n| {
            let edges = prop::collection::vec((0..n, 0..n, 1u64..20), 0..16);
            (Just(n), edges, 0..n)
        })
        .prop_map(|(n, edges, start)| {
            let names: Vec<String> = (0..n).map(|i| format!("N{}", i)).collect();
            let edges = edges
                .into_iter()
                .map(|(a, b, w)| Edge::new(names[a].clone(), names[b].clone(), w))
                .collect();
            (Graph::new(names, edges), start)
        })
    }

    proptest! {
        #[test]
        fn visited_never_shrinks((graph, start) in arbitrary_graph()) {
            let start = graph.nodes[start].clone();
            for algorithm in GraphAlgorithm::ALL {
                let trace = algorithm.trace(&graph, Some(&start), None).unwrap();
                let mut previous = BTreeSet::new();
                for frame in &trace {
                    let current: BTreeSet<_> = frame.payload.visited.iter().cloned().collect();
                    prop_assert!(previous.is_subset(&current));
                    previous = current;
                }
            }
        }

        #[test]
        fn found_paths_are_connected((graph, start) in arbitrary_graph(), goal in 0usize..8) {
            let goal = graph.nodes[goal % graph.nodes.len()].clone();
            let start = graph.nodes[start].clone();
            for algorithm in [GraphAlgorithm::Bfs, GraphAlgorithm::Dfs, GraphAlgorithm::Dijkstra] {
                let trace = algorithm.trace(&graph, Some(&start), Some(&goal)).unwrap();
                if let Some(path) = found_path(&trace) {
                    prop_assert_eq!(path.first(), Some(&start));
                    prop_assert_eq!(path.last(), Some(&goal));
                    for pair in path.windows(2) {
                        prop_assert!(graph.neighbors(&pair[0]).iter().any(|n| n.node == pair[1]));
                    }
                }
            }
        }

        #[test]
        fn kruskal_never_exceeds_n_minus_one_edges((graph, _start) in arbitrary_graph()) {
            let trace = kruskal(&graph).unwrap();
            prop_assert!(trace.last().payload.highlighted_edges.len() < graph.nodes.len());
        }
    }
}
