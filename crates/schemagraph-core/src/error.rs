use thiserror::Error;

/// Top-level error type for schemagraph.
#[derive(Error, Debug)]
pub enum SchemaGraphError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SchemaGraphError>;
