//! Error types for the schemagraph-tool crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Core(#[from] schemagraph_core::SchemaGraphError),

    #[error("Graph error: {0}")]
    Graph(#[from] schemagraph_graph::GraphError),

    #[error("Store error: {0}")]
    Store(#[from] schemagraph_store::StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ToolError>;
