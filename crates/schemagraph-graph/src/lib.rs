//! schemagraph-graph: In-memory graph engine for schemagraph.
//!
//! Holds named nodes and keyed directed edges with JSON-like metadata,
//! creates nodes on demand through a catalog-aware factory, answers
//! unweighted shortest-path queries, and narrows a graph down to the part
//! relevant to a set of focus entities.

pub mod algorithms;
pub mod error;
pub mod factory;
pub mod focus;
pub mod graph;
pub mod metadata;
pub mod model;

pub use error::{GraphError, Result};
pub use factory::NodeFactory;
pub use focus::{extract_subgraph, FocusSpec};
pub use graph::GraphData;
pub use model::{Edge, EdgeId, Node, NodeId};
