//! schemagraph-core: Shared types, configuration, and error handling for schemagraph.
//!
//! This crate provides the foundational types used across all schemagraph components:
//! - Entity and relationship inputs fed to the diagram adapters
//! - The dynamically-typed metadata model carried by nodes and edges
//! - Plugin and template selectors
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::ToolConfig;
pub use error::{Result, SchemaGraphError};
pub use types::{Entity, Metadata, PluginType, Relationship, TemplateType};
