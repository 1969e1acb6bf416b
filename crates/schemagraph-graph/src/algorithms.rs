//! Path search over a [`GraphData`]: Dijkstra with uniform edge weight.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::GraphData;
use crate::model::{EdgeId, NodeId};

/// A path through the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPath {
    /// Nodes along the path, source first.
    pub node_ids: Vec<NodeId>,
    /// Edges along the path; `edges[i]` joins `node_ids[i]` and `node_ids[i + 1]`.
    pub edges: Vec<EdgeId>,
}

impl RawPath {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.edges.len()
    }
}

/// Shortest path from `source` to `target` with every edge weighing 1.
///
/// Only outgoing edges are followed. The search stops as soon as the target
/// leaves the queue. Returns `None` if the target is unreachable or if the
/// path would hold a single node (`source == target`). Among equally short
/// paths the one through lower node ids is preferred.
pub fn shortest_unweighted_path(
    graph: &GraphData,
    source: NodeId,
    target: NodeId,
) -> Option<RawPath> {
    let n = graph.node_count();
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut prev: Vec<Option<(NodeId, EdgeId)>> = vec![None; n];
    let mut visited = vec![false; n];

    dist[source.0] = Some(0);

    let mut heap = BinaryHeap::new();
    heap.push(DijkstraState {
        cost: 0,
        node: source,
    });

    while let Some(DijkstraState { cost, node }) = heap.pop() {
        if node == target {
            break;
        }

        if visited[node.0] {
            continue;
        }
        visited[node.0] = true;

        for &edge_id in graph.outgoing(node) {
            let next = graph.edge(edge_id).to();
            let new_dist = cost + 1;

            if dist[next.0].map_or(true, |d| new_dist < d) {
                dist[next.0] = Some(new_dist);
                prev[next.0] = Some((node, edge_id));
                heap.push(DijkstraState {
                    cost: new_dist,
                    node: next,
                });
            }
        }
    }

    // Reconstruct path.
    let mut node_ids = Vec::new();
    let mut edges = Vec::new();
    let mut current = target;

    while let Some((parent, edge_id)) = prev[current.0] {
        node_ids.push(current);
        edges.push(edge_id);
        current = parent;
    }

    // Unreachable, or a same-node query.
    if current != source || node_ids.is_empty() {
        return None;
    }

    node_ids.push(source);
    node_ids.reverse();
    edges.reverse();

    Some(RawPath { node_ids, edges })
}

/// State for Dijkstra's priority queue (min-heap by cost, then node id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DijkstraState {
    cost: usize,
    node: NodeId,
}

impl Ord for DijkstraState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap (BinaryHeap is a max-heap).
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    /// A --> B --> C
    /// A --------> C
    /// C --> D
    /// E (isolated)
    /// ```
    fn build_test_graph() -> GraphData {
        let mut graph = GraphData::default();
        graph.find_or_add_edge("A", "B", "ab");
        graph.find_or_add_edge("B", "C", "bc");
        graph.find_or_add_edge("A", "C", "ac");
        graph.find_or_add_edge("C", "D", "cd");
        graph.find_or_add_node("E");
        graph
    }

    fn id(graph: &GraphData, name: &str) -> NodeId {
        graph.find_node(name).unwrap()
    }

    #[test]
    fn test_direct_edge_beats_detour() {
        let graph = build_test_graph();
        let path = shortest_unweighted_path(&graph, id(&graph, "A"), id(&graph, "C")).unwrap();

        assert_eq!(graph.path_names(&path.node_ids), vec!["A", "C"]);
        assert_eq!(path.hops(), 1);
        assert_eq!(graph.edge(path.edges[0]).edge_key(), "ac");
    }

    #[test]
    fn test_multi_hop_path_and_edges() {
        let graph = build_test_graph();
        let path = shortest_unweighted_path(&graph, id(&graph, "A"), id(&graph, "D")).unwrap();

        assert_eq!(graph.path_names(&path.node_ids), vec!["A", "C", "D"]);
        let keys: Vec<&str> = path.edges.iter().map(|&e| graph.edge(e).edge_key()).collect();
        assert_eq!(keys, vec!["ac", "cd"]);
    }

    #[test]
    fn test_direction_is_respected() {
        let graph = build_test_graph();
        // D has no outgoing edges, so it can't reach A.
        assert!(shortest_unweighted_path(&graph, id(&graph, "D"), id(&graph, "A")).is_none());
    }

    #[test]
    fn test_isolated_node_unreachable() {
        let graph = build_test_graph();
        assert!(shortest_unweighted_path(&graph, id(&graph, "A"), id(&graph, "E")).is_none());
    }

    #[test]
    fn test_same_node_is_none() {
        let graph = build_test_graph();
        assert!(shortest_unweighted_path(&graph, id(&graph, "A"), id(&graph, "A")).is_none());
    }

    #[test]
    fn test_self_loop_same_node_is_none() {
        let mut graph = GraphData::default();
        graph.find_or_add_edge("A", "A", "self");
        let a = id(&graph, "A");
        assert!(shortest_unweighted_path(&graph, a, a).is_none());
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = GraphData::default();
        graph.find_or_add_edge("A", "B", "1");
        graph.find_or_add_edge("B", "C", "2");
        graph.find_or_add_edge("C", "A", "3");
        graph.find_or_add_edge("C", "D", "4");

        let path = shortest_unweighted_path(&graph, id(&graph, "B"), id(&graph, "D")).unwrap();
        assert_eq!(graph.path_names(&path.node_ids), vec!["B", "C", "D"]);

        let path = shortest_unweighted_path(&graph, id(&graph, "C"), id(&graph, "B")).unwrap();
        assert_eq!(graph.path_names(&path.node_ids), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_equal_length_paths_return_one_of_them() {
        let mut graph = GraphData::default();
        graph.find_or_add_edge("S", "L", "1");
        graph.find_or_add_edge("S", "R", "2");
        graph.find_or_add_edge("L", "T", "3");
        graph.find_or_add_edge("R", "T", "4");

        let path = shortest_unweighted_path(&graph, id(&graph, "S"), id(&graph, "T")).unwrap();
        let names = graph.path_names(&path.node_ids);
        assert_eq!(names.len(), 3);
        assert!(names == vec!["S", "L", "T"] || names == vec!["S", "R", "T"]);
    }
}
