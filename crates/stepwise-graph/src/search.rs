//! Breadth-first and depth-first search.

use std::collections::{HashMap, HashSet, VecDeque};

use stepwise_trace::{Result, Trace, TraceBuilder};

use crate::graph::{EdgeId, Graph};
use crate::state::GraphState;

/// Parent pointers: node -> (predecessor, edge used).
pub(crate) type Parents<'g> = HashMap<&'g str, (&'g str, EdgeId)>;

/// Validate the graph and return the graph-owned ids of start and goal.
pub(crate) fn resolve<'g>(
    graph: &'g Graph,
    start: &str,
    goal: Option<&str>,
) -> Result<(&'g str, Option<&'g str>)> {
    graph.validate()?;
    let lookup = |id: &str| -> Result<&'g str> {
        graph
            .index_of(id)
            .map(|i| graph.nodes[i].as_str())
            .ok_or_else(|| stepwise_trace::TraceError::UnknownNode(id.to_string()))
    };
    let start = lookup(start)?;
    let goal = goal.map(lookup).transpose()?;
    Ok((start, goal))
}

/// Walk parent pointers back from `goal` to `start`.
pub(crate) fn reconstruct(parents: &Parents<'_>, start: &str, goal: &str) -> (Vec<String>, Vec<EdgeId>) {
    let mut path = vec![goal.to_string()];
    let mut edges = Vec::new();
    let mut node = goal;
    while node != start {
        match parents.get(node) {
            Some(&(prev, edge)) => {
                path.push(prev.to_string());
                edges.push(edge);
                node = prev;
            }
            None => break,
        }
    }
    path.reverse();
    edges.reverse();
    (path, edges)
}

/// Append the closing frame shared by BFS and DFS, then finalize.
fn finish_search(
    graph: &Graph,
    mut builder: TraceBuilder<GraphState>,
    mut state: GraphState,
    parents: &Parents<'_>,
    start: &str,
    goal: Option<&str>,
    reached: bool,
) -> Result<Trace<GraphState>> {
    match goal {
        Some(goal) if reached => {
            let (path, edges) = reconstruct(parents, start, goal);
            let weight = edges.iter().map(|&e| graph.edges[e].weight).sum();
            state.highlighted_edges = edges.into_iter().collect();
            state.total_weight = Some(weight);
            let description = format!("{} ({} hops)", path.join(" → "), path.len() - 1);
            state.path = Some(path);
            builder.snapshot("Path reconstructed", description, &state);
        }
        Some(goal) => {
            state.current = None;
            tracing::debug!(goal, "search exhausted its frontier without reaching the goal");
            builder.snapshot(
                "Goal unreachable",
                format!("Frontier exhausted without reaching {}", goal),
                &state,
            );
        }
        None => {
            state.current = None;
            builder.snapshot(
                "Traversal complete",
                format!("Visited {} nodes: {}", state.visited.len(), state.visited.join(", ")),
                &state,
            );
        }
    }
    builder.finish()
}

fn describe(action: &str, nodes: &[&str]) -> String {
    if nodes.is_empty() {
        "No unvisited neighbors".to_string()
    } else {
        format!("{} {}", action, nodes.join(", "))
    }
}

/// Trace a breadth-first search from `start`.
///
/// Nodes are marked visited when discovered. If `goal` is given the search
/// stops once the goal is dequeued and a path frame follows; an unreachable
/// goal ends with a "goal unreachable" frame instead.
pub fn bfs(graph: &Graph, start: &str, goal: Option<&str>) -> Result<Trace<GraphState>> {
    let (start, goal) = resolve(graph, start, goal)?;
    let adjacency = graph.adjacency();

    let mut state = GraphState::default();
    let mut builder = TraceBuilder::new("bfs");
    let mut queue = VecDeque::from([start]);
    let mut seen = HashSet::from([start]);
    let mut parents = Parents::new();

    state.mark_visited(start);
    state.frontier = vec![start.to_string()];
    builder.snapshot(
        format!("Start at {}", start),
        format!("Enqueue {} and mark it visited", start),
        &state,
    );

    let mut reached = false;
    while let Some(node) = queue.pop_front() {
        state.current = Some(node.to_string());

        if goal == Some(node) {
            state.frontier = queue.iter().map(|n| n.to_string()).collect();
            builder.snapshot(format!("Reached {}", node), "Goal dequeued, search stops", &state);
            reached = true;
            break;
        }

        let mut discovered = Vec::new();
        for nb in adjacency.get(node).map(Vec::as_slice).unwrap_or(&[]) {
            if seen.insert(nb.node) {
                parents.insert(nb.node, (node, nb.edge));
                state.mark_visited(nb.node);
                state.highlighted_edges.insert(nb.edge);
                queue.push_back(nb.node);
                discovered.push(nb.node);
            }
        }

        state.frontier = queue.iter().map(|n| n.to_string()).collect();
        builder.snapshot(format!("Visit {}", node), describe("Discovered", &discovered), &state);
    }

    finish_search(graph, builder, state, &parents, start, goal, reached)
}

/// Trace a depth-first search from `start`.
///
/// Uses an explicit stack; nodes are marked visited when popped. Neighbors
/// are pushed in reverse lexicographic order so the smallest id is explored
/// first. Popping an already visited node records a skip frame.
pub fn dfs(graph: &Graph, start: &str, goal: Option<&str>) -> Result<Trace<GraphState>> {
    let (start, goal) = resolve(graph, start, goal)?;
    let adjacency = graph.adjacency();

    let mut state = GraphState::default();
    let mut builder = TraceBuilder::new("dfs");
    let mut stack: Vec<(&str, Option<(&str, EdgeId)>)> = vec![(start, None)];
    let mut seen = HashSet::new();
    let mut parents = Parents::new();

    state.frontier = vec![start.to_string()];
    builder.snapshot(
        format!("Start at {}", start),
        format!("Push {} onto the stack", start),
        &state,
    );

    let mut reached = false;
    while let Some((node, via)) = stack.pop() {
        state.current = Some(node.to_string());

        if seen.contains(node) {
            state.frontier = stack.iter().map(|(n, _)| n.to_string()).collect();
            builder.snapshot(
                format!("Skip {}", node),
                format!("{} was already visited", node),
                &state,
            );
            continue;
        }

        seen.insert(node);
        state.mark_visited(node);
        if let Some((prev, edge)) = via {
            parents.insert(node, (prev, edge));
            state.highlighted_edges.insert(edge);
        }

        if goal == Some(node) {
            state.frontier = stack.iter().map(|(n, _)| n.to_string()).collect();
            builder.snapshot(format!("Reached {}", node), "Goal popped, search stops", &state);
            reached = true;
            break;
        }

        let mut pushed = Vec::new();
        for nb in adjacency.get(node).map(Vec::as_slice).unwrap_or(&[]).iter().rev() {
            if !seen.contains(nb.node) {
                stack.push((nb.node, Some((node, nb.edge))));
                pushed.push(nb.node);
            }
        }
        pushed.reverse();

        state.frontier = stack.iter().map(|(n, _)| n.to_string()).collect();
        builder.snapshot(format!("Visit {}", node), describe("Pushed", &pushed), &state);
    }

    finish_search(graph, builder, state, &parents, start, goal, reached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{demo_graph, ring_graph, Edge};
    use crate::state::found_path;
    use std::collections::BTreeSet;

    fn visited_sets(trace: &Trace<GraphState>) -> Vec<BTreeSet<String>> {
        trace
            .iter()
            .map(|f| f.payload.visited.iter().cloned().collect())
            .collect()
    }

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bfs_on_ring_follows_lexicographic_tie_break() {
        let graph = ring_graph(&["A", "B", "C", "D"]);
        let trace = bfs(&graph, "A", Some("C")).unwrap();

        let sets = visited_sets(&trace);
        assert_eq!(sets[0], set(&["A"]));
        assert_eq!(sets[1], set(&["A", "B", "D"]));
        assert_eq!(sets[2], set(&["A", "B", "C", "D"]));

        assert_eq!(found_path(&trace).unwrap(), ["A", "B", "C"]);
        assert_eq!(trace.last().title, "Path reconstructed");
    }

    #[test]
    fn bfs_stops_after_goal_frame() {
        let graph = ring_graph(&["A", "B", "C", "D"]);
        let trace = bfs(&graph, "A", Some("C")).unwrap();
        // start, visit A, visit B, visit D, reached C, path
        assert_eq!(trace.len(), 6);
        let reached = &trace.frames()[trace.len() - 2];
        assert_eq!(reached.payload.current.as_deref(), Some("C"));
    }

    #[test]
    fn bfs_demo_path_has_fewest_hops() {
        let trace = bfs(&demo_graph(), "A", Some("F")).unwrap();
        assert_eq!(found_path(&trace).unwrap(), ["A", "B", "D", "F"]);
        assert_eq!(trace.last().payload.total_weight, Some(15));
    }

    #[test]
    fn unreachable_goal_has_no_path_frame() {
        let graph = Graph::new(["A", "B", "C"], vec![Edge::new("A", "B", 1)]);
        let trace = bfs(&graph, "A", Some("C")).unwrap();
        assert!(found_path(&trace).is_none());
        assert_eq!(trace.last().title, "Goal unreachable");
        assert!(trace.iter().all(|f| f.payload.path.is_none()));

        let trace = dfs(&graph, "A", Some("C")).unwrap();
        assert!(found_path(&trace).is_none());
    }

    #[test]
    fn start_equal_to_goal_is_a_single_node_path() {
        let trace = bfs(&demo_graph(), "C", Some("C")).unwrap();
        assert_eq!(found_path(&trace).unwrap(), ["C"]);
        assert_eq!(trace.last().payload.total_weight, Some(0));
    }

    #[test]
    fn single_node_graph_traverses_trivially() {
        let graph = Graph::new(["solo"], vec![]);
        let trace = bfs(&graph, "solo", None).unwrap();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.last().title, "Traversal complete");

        let trace = dfs(&graph, "solo", None).unwrap();
        assert_eq!(trace.last().payload.visited, vec!["solo"]);
    }

    #[test]
    fn unknown_start_is_rejected() {
        let err = bfs(&demo_graph(), "Z", None).unwrap_err();
        assert_eq!(err, stepwise_trace::TraceError::UnknownNode("Z".into()));
        let err = dfs(&demo_graph(), "A", Some("Q")).unwrap_err();
        assert_eq!(err, stepwise_trace::TraceError::UnknownNode("Q".into()));
    }

    #[test]
    fn dfs_explores_smallest_neighbor_first() {
        let trace = dfs(&demo_graph(), "A", None).unwrap();
        assert_eq!(trace.last().payload.visited, vec!["A", "B", "C", "D", "E", "F"]);
        assert!(trace.iter().any(|f| f.title.starts_with("Skip")));
    }

    #[test]
    fn dfs_path_follows_tree_edges() {
        let trace = dfs(&demo_graph(), "A", Some("F")).unwrap();
        assert_eq!(found_path(&trace).unwrap(), ["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn frontier_is_fifo_for_bfs() {
        let trace = bfs(&demo_graph(), "A", None).unwrap();
        assert_eq!(trace.frames()[1].payload.frontier, vec!["B", "C"]);
        assert_eq!(trace.frames()[2].payload.frontier, vec!["C", "D"]);
    }
}
