//! The in-memory graph store.
//!
//! Nodes and edges live in append-only arenas addressed by dense ids. A
//! lower-cased name index gives case-insensitive lookups while nodes keep the
//! casing they were created with. Edges are looked up by their endpoint pair
//! only: a second `find_or_add_edge` between the same nodes returns the first
//! edge whatever its key.

use std::collections::HashMap;

use schemagraph_core::Metadata;
use serde_json::Value;

use crate::algorithms;
use crate::error::{GraphError, Result};
use crate::factory::NodeFactory;
use crate::metadata::merge_into;
use crate::model::{Edge, EdgeId, Node, NodeId};

/// A graph of named nodes and keyed directed edges.
#[derive(Debug, Clone, Default)]
pub struct GraphData {
    factory: NodeFactory,
    /// All nodes, indexed by `NodeId`.
    nodes: Vec<Node>,
    /// All edges, indexed by `EdgeId`.
    edges: Vec<Edge>,
    /// Lower-cased node name → id.
    name_index: HashMap<String, NodeId>,
    /// (from, to) → first edge between them.
    endpoint_index: HashMap<(NodeId, NodeId), EdgeId>,
    /// `outgoing[i]` = edges leaving node `i`, in insertion order.
    outgoing: Vec<Vec<EdgeId>>,
    /// `incoming[i]` = edges entering node `i`, in insertion order.
    incoming: Vec<Vec<EdgeId>>,
}

impl GraphData {
    /// Create an empty graph whose nodes are built by `factory`.
    pub fn new(factory: NodeFactory) -> Self {
        Self {
            factory,
            ..Default::default()
        }
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    // ── Nodes ─────────────────────────────────────────────────────

    /// Return the node named `name` (any casing), creating it if needed.
    pub fn find_or_add_node(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.find_node(name) {
            return id;
        }
        let node = self.factory.create(name);
        self.push_node(node)
    }

    /// Like [`find_or_add_node`](Self::find_or_add_node), but also applies
    /// `metadata`: merged over an existing node, or over the factory defaults
    /// of a new one. Caller values win on conflict.
    pub fn find_or_add_node_with_meta(&mut self, name: &str, metadata: Option<&Metadata>) -> NodeId {
        if let Some(id) = self.find_node(name) {
            if let Some(extra) = metadata {
                merge_into(&mut self.nodes[id.0].metadata, extra);
            }
            return id;
        }
        let node = self.factory.create_with_meta(name, metadata);
        self.push_node(node)
    }

    /// Set one metadata entry on a node, creating the node if needed.
    pub fn update_node_metadata(&mut self, name: &str, key: &str, value: Value) {
        let id = self.find_or_add_node(name);
        self.nodes[id.0].metadata.insert(key.to_string(), value);
    }

    /// Replace a node's metadata wholesale, creating the node if needed.
    pub fn set_node_metadata(&mut self, name: &str, metadata: Metadata) -> NodeId {
        let id = self.find_or_add_node(name);
        self.nodes[id.0].metadata = metadata;
        id
    }

    /// Case-insensitive node lookup.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(&name.to_lowercase()).copied()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Ids of all nodes in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ── Edges ─────────────────────────────────────────────────────

    /// Return the edge `from → to` (any casing), creating it with `key` if
    /// there is none. An existing edge is returned as is, whatever its key.
    pub fn find_or_add_edge(&mut self, from: &str, to: &str, key: &str) -> EdgeId {
        if let Some(id) = self.find_edge(from, to) {
            return id;
        }

        let from_id = self.find_or_add_node(from);
        let to_id = self.find_or_add_node(to);
        let id = EdgeId(self.edges.len());

        self.edges.push(Edge::new(from_id, to_id, key));
        self.endpoint_index.insert((from_id, to_id), id);
        self.outgoing[from_id.0].push(id);
        self.incoming[to_id.0].push(id);
        id
    }

    /// Set one metadata entry on an existing edge.
    ///
    /// Unlike nodes, edges are never created here.
    pub fn update_edge_metadata(&mut self, from: &str, to: &str, key: &str, value: Value) -> Result<()> {
        let id = self.require_edge(from, to)?;
        self.edges[id.0].metadata.insert(key.to_string(), value);
        Ok(())
    }

    /// Replace an existing edge's metadata wholesale.
    pub fn set_edge_metadata(&mut self, from: &str, to: &str, metadata: Metadata) -> Result<EdgeId> {
        let id = self.require_edge(from, to)?;
        self.edges[id.0].metadata = metadata;
        Ok(id)
    }

    /// Merge `extra` over an edge's metadata. Keys in `extra` win.
    pub fn merge_edge_metadata(&mut self, id: EdgeId, extra: Option<&Metadata>) {
        if let Some(extra) = extra {
            merge_into(&mut self.edges[id.0].metadata, extra);
        }
    }

    /// Case-insensitive lookup of the edge `from → to`, ignoring keys.
    pub fn find_edge(&self, from: &str, to: &str) -> Option<EdgeId> {
        let from_id = self.find_node(from)?;
        let to_id = self.find_node(to)?;
        self.endpoint_index.get(&(from_id, to_id)).copied()
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// All edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges leaving `id`, in creation order.
    pub fn outgoing(&self, id: NodeId) -> &[EdgeId] {
        &self.outgoing[id.0]
    }

    /// Edges entering `id`, in creation order.
    pub fn incoming(&self, id: NodeId) -> &[EdgeId] {
        &self.incoming[id.0]
    }

    /// Edges leaving the named node. Empty for unknown names.
    pub fn outgoing_edges(&self, name: &str) -> Vec<&Edge> {
        self.find_node(name)
            .map(|id| self.outgoing(id).iter().map(|&e| self.edge(e)).collect())
            .unwrap_or_default()
    }

    /// Edges entering the named node. Empty for unknown names.
    pub fn incoming_edges(&self, name: &str) -> Vec<&Edge> {
        self.find_node(name)
            .map(|id| self.incoming(id).iter().map(|&e| self.edge(e)).collect())
            .unwrap_or_default()
    }

    /// Source and target names of an edge.
    pub fn endpoint_names(&self, id: EdgeId) -> (&str, &str) {
        let edge = self.edge(id);
        (self.node(edge.from()).name(), self.node(edge.to()).name())
    }

    // ── Queries ───────────────────────────────────────────────────

    /// Unweighted shortest path following edge direction.
    ///
    /// Fails if either name is unknown. Returns `None` when `to` is
    /// unreachable or when both names denote the same node.
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Option<Vec<NodeId>>> {
        let source = self.require_node(from)?;
        let target = self.require_node(to)?;
        Ok(algorithms::shortest_unweighted_path(self, source, target).map(|path| path.node_ids))
    }

    /// Map a path of node ids to node names.
    pub fn path_names(&self, path: &[NodeId]) -> Vec<&str> {
        path.iter().map(|&id| self.node(id).name()).collect()
    }

    // ── Internals ─────────────────────────────────────────────────

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.name_index.insert(node.name().to_lowercase(), id);
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    fn require_node(&self, name: &str) -> Result<NodeId> {
        self.find_node(name).ok_or_else(|| GraphError::NodeNotFound {
            name: name.to_string(),
        })
    }

    fn require_edge(&self, from: &str, to: &str) -> Result<EdgeId> {
        self.find_edge(from, to).ok_or_else(|| GraphError::EdgeNotFound {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}
