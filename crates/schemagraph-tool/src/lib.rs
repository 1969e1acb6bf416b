//! schemagraph-tool: Diagram building and rendering on top of the graph engine.
//!
//! Turns entity catalogs and relationships into graphs through one of three
//! diagram adapters (ERD, class diagram, data lineage), optionally narrows
//! the result to a focus set, and renders it as Mermaid, PlantUML, or
//! Graphviz text.

pub mod error;
pub mod plugins;
pub mod render;
pub mod tool;

pub use error::{Result, ToolError};
pub use plugins::{DiagramPlugin, LineageMetadata, Plugin};
pub use render::render;
pub use tool::{GraphRequest, GraphTool};
