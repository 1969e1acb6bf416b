//! Focus-driven subgraph extraction.
//!
//! Given a set of focus entities, the relevant nodes are every node on a
//! shortest path between two distinct focus nodes. Edges are then selected
//! around those nodes in one direction: parent-ward (`bubble_up`, edges that
//! end at a relevant node) or child-ward (edges that start at one). Edges to
//! nodes outside the relevant set are dropped unless
//! `include_unfocused_neighbors` is set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::algorithms::shortest_unweighted_path;
use crate::graph::GraphData;
use crate::model::{EdgeId, NodeId};

/// Which part of a graph to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSpec {
    /// Entity names to focus on. Unknown names are ignored.
    pub focus_names: Vec<String>,
    /// `true` collects edges ending at relevant nodes (ancestors),
    /// `false` edges starting at them (descendants).
    #[serde(default = "default_true")]
    pub bubble_up: bool,
    /// Keep edges whose other endpoint is not relevant.
    #[serde(default)]
    pub include_unfocused_neighbors: bool,
}

fn default_true() -> bool {
    true
}

impl FocusSpec {
    pub fn new<I, S>(focus_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            focus_names: focus_names.into_iter().map(Into::into).collect(),
            bubble_up: true,
            include_unfocused_neighbors: false,
        }
    }

    pub fn with_bubble_up(mut self, bubble_up: bool) -> Self {
        self.bubble_up = bubble_up;
        self
    }

    pub fn with_unfocused_neighbors(mut self, include: bool) -> Self {
        self.include_unfocused_neighbors = include;
        self
    }
}

/// Focus names that exist in the graph, in node creation order.
pub fn resolve_focus(graph: &GraphData, focus_names: &[String]) -> Vec<NodeId> {
    let wanted: HashSet<NodeId> = focus_names
        .iter()
        .filter_map(|name| graph.find_node(name))
        .collect();

    graph.node_ids().filter(|id| wanted.contains(id)).collect()
}

/// Nodes relevant to the focus set, deduplicated in discovery order.
///
/// With no resolvable focus node every node is relevant, and a single focus
/// node stands alone. Otherwise the nodes of a shortest path between each
/// ordered pair of distinct focus nodes are collected; unconnected pairs
/// contribute nothing.
pub fn relevant_nodes(graph: &GraphData, spec: &FocusSpec) -> Vec<NodeId> {
    let focus = resolve_focus(graph, &spec.focus_names);
    match focus.len() {
        0 => return graph.node_ids().collect(),
        1 => return focus,
        _ => {}
    }

    let mut seen = HashSet::new();
    let mut relevant = Vec::new();

    for &from in &focus {
        for &to in &focus {
            if from == to {
                continue;
            }
            if let Some(path) = shortest_unweighted_path(graph, from, to) {
                for id in path.node_ids {
                    if seen.insert(id) {
                        relevant.push(id);
                    }
                }
            }
        }
    }

    relevant
}

/// Edges to keep for `spec`, deduplicated in selection order.
pub fn edges_to_document(graph: &GraphData, spec: &FocusSpec) -> Vec<EdgeId> {
    select_edges(graph, spec, &relevant_nodes(graph, spec))
}

fn select_edges(graph: &GraphData, spec: &FocusSpec, relevant: &[NodeId]) -> Vec<EdgeId> {
    let relevant_set: HashSet<NodeId> = relevant.iter().copied().collect();

    let mut seen = HashSet::new();
    let mut selected = Vec::new();

    for &node in relevant {
        let candidates = if spec.bubble_up {
            graph.incoming(node)
        } else {
            graph.outgoing(node)
        };

        for &edge_id in candidates {
            let edge = graph.edge(edge_id);
            let other = if spec.bubble_up { edge.from() } else { edge.to() };

            if (spec.include_unfocused_neighbors || relevant_set.contains(&other))
                && seen.insert(edge_id)
            {
                selected.push(edge_id);
            }
        }
    }

    selected
}

/// Build a new graph holding only the edges selected by `spec` and their
/// endpoints. The new graph shares the source graph's entity catalog; node
/// and edge metadata are re-derived, not copied.
pub fn extract_subgraph(graph: &GraphData, spec: &FocusSpec) -> GraphData {
    let relevant = relevant_nodes(graph, spec);
    let edges = select_edges(graph, spec, &relevant);
    let mut filtered = GraphData::new(graph.factory().clone());

    for &edge_id in &edges {
        let (from, to) = graph.endpoint_names(edge_id);
        let key = graph.edge(edge_id).edge_key();

        filtered.find_or_add_node(from);
        filtered.find_or_add_node(to);
        filtered.find_or_add_edge(from, to, key);
    }

    tracing::debug!(
        focus = spec.focus_names.len(),
        relevant = relevant.len(),
        bubble_up = spec.bubble_up,
        include_unfocused_neighbors = spec.include_unfocused_neighbors,
        nodes = filtered.node_count(),
        edges = filtered.edge_count(),
        "Extracted focused subgraph"
    );

    filtered
}
