//! Node and edge records owned by a [`GraphData`](crate::GraphData) arena.

use schemagraph_core::Metadata;
use serde::{Deserialize, Serialize};

/// Dense index of a node inside its graph (0..N-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Dense index of an edge inside its graph (0..E-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

/// A named vertex. The name is fixed at creation; metadata is free to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    pub metadata: Metadata,
}

impl Node {
    pub fn new(name: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }

    /// Name with the casing it was first created with.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A directed, keyed connection between two nodes of the same graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    edge_key: String,
    pub metadata: Metadata,
}

impl Edge {
    pub(crate) fn new(from: NodeId, to: NodeId, edge_key: impl Into<String>) -> Self {
        Self {
            from,
            to,
            edge_key: edge_key.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn edge_key(&self) -> &str {
        &self.edge_key
    }
}
