//! Core domain types shared by every schemagraph crate.
//!
//! Entities and relationships are the raw input handed to the diagram
//! adapters; metadata is the value model attached to graph nodes and edges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaGraphError;

// ── Metadata ──────────────────────────────────────────────────────

/// Metadata attached to nodes and edges.
///
/// Values are JSON-like (string, number, boolean, object, array) so metadata
/// survives serialization without loss.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// ── Entities ──────────────────────────────────────────────────────

/// A table, class, or other named thing with typed attributes.
///
/// Each attribute value is a type descriptor, usually an object such as
/// `{"Type": "int", "IsKey": true}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub attributes: Metadata,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Metadata::new(),
        }
    }

    /// Builder helper: add one attribute descriptor.
    pub fn with_attribute(mut self, name: impl Into<String>, descriptor: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), descriptor);
        self
    }
}

/// A directed relationship between two entities, e.g. a foreign key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relationship {
    pub from_entity: String,
    pub to_entity: String,
    /// Relationship key: a column name, `inherits`, an association label, ...
    pub key: String,
}

impl Relationship {
    pub fn new(from: impl Into<String>, to: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            from_entity: from.into(),
            to_entity: to.into(),
            key: key.into(),
        }
    }
}

// ── Selectors ─────────────────────────────────────────────────────

/// Which diagram adapter translates entities into graph mutations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PluginType {
    Erd,
    ClassDiagram,
    Lineage,
}

impl PluginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Erd => "erd",
            Self::ClassDiagram => "class-diagram",
            Self::Lineage => "lineage",
        }
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluginType {
    type Err = SchemaGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "erd" => Ok(Self::Erd),
            "class-diagram" | "class_diagram" | "classdiagram" => Ok(Self::ClassDiagram),
            "lineage" => Ok(Self::Lineage),
            _ => Err(SchemaGraphError::UnsupportedOperation(format!(
                "unsupported plugin type: {s}"
            ))),
        }
    }
}

/// Text template used to render a graph.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TemplateType {
    #[default]
    #[serde(rename = "mermaid-erd")]
    MermaidErd,
    #[serde(rename = "mermaid-class")]
    MermaidClassDiagram,
    #[serde(rename = "plantuml-class")]
    PlantUmlClass,
    #[serde(rename = "graphviz")]
    GraphvizDiGraph,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MermaidErd => "mermaid-erd",
            Self::MermaidClassDiagram => "mermaid-class",
            Self::PlantUmlClass => "plantuml-class",
            Self::GraphvizDiGraph => "graphviz",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = SchemaGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mermaid-erd" => Ok(Self::MermaidErd),
            "mermaid-class" => Ok(Self::MermaidClassDiagram),
            "plantuml-class" | "plantuml" => Ok(Self::PlantUmlClass),
            "graphviz" | "dot" => Ok(Self::GraphvizDiGraph),
            _ => Err(SchemaGraphError::UnsupportedOperation(format!(
                "unsupported template type: {s}"
            ))),
        }
    }
}
