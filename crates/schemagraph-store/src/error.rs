use schemagraph_graph::GraphError;

/// Errors that can occur while persisting or restoring a graph.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Integrity check failed: stored hash {expected} does not match content hash {actual}")]
    IntegrityViolation { expected: String, actual: String },

    #[error("Unsupported snapshot format version: {0}")]
    UnsupportedVersion(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
