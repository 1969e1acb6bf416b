//! Error types for the schemagraph-graph crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node not found: {name}")]
    NodeNotFound { name: String },

    #[error("Edge not found: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
