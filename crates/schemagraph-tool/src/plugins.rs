//! Diagram adapters: translate entities and relationships into graph mutations.
//!
//! - **ERD**: one node per entity carrying its attributes, one edge per
//!   relationship keyed by the relationship key.
//! - **Class diagram**: one node per class; `inherits` relationships become
//!   inheritance edges, anything else an association.
//! - **Lineage**: one node per attribute (`Entity.attribute`) and one
//!   `lineage` edge per relationship, with optional caller metadata on both.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use schemagraph_core::{Entity, Metadata, PluginType, Relationship, SchemaGraphError};
use schemagraph_graph::{Edge, EdgeId, GraphData, Node, NodeFactory, NodeId};

/// Relationship key that marks class inheritance.
pub const INHERITS: &str = "inherits";

/// Edge key used for every lineage edge.
pub const LINEAGE: &str = "lineage";

/// Common surface of the diagram adapters.
pub trait DiagramPlugin {
    fn add_entity(&self, entity: &Entity, graph: &mut GraphData);

    fn add_relationship(&self, relationship: &Relationship, graph: &mut GraphData);

    fn nodes<'g>(&self, graph: &'g GraphData) -> &'g [Node] {
        graph.nodes()
    }

    fn edges<'g>(&self, graph: &'g GraphData) -> &'g [Edge] {
        graph.edges()
    }
}

// ── ERD ───────────────────────────────────────────────────────────

/// Entity-relationship diagrams.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErdPlugin;

impl DiagramPlugin for ErdPlugin {
    fn add_entity(&self, entity: &Entity, graph: &mut GraphData) {
        let id = graph.find_or_add_node(&entity.name);
        let node = graph.node_mut(id);
        for (attribute, descriptor) in &entity.attributes {
            node.metadata.insert(attribute.clone(), descriptor.clone());
        }
    }

    fn add_relationship(&self, relationship: &Relationship, graph: &mut GraphData) {
        graph.find_or_add_edge(
            &relationship.from_entity,
            &relationship.to_entity,
            &relationship.key,
        );
    }
}

// ── Class diagram ─────────────────────────────────────────────────

/// Class diagrams with inheritance and association edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassDiagramPlugin;

impl ClassDiagramPlugin {
    /// Add a class node and assign `metadata` onto it.
    pub fn add_class(&self, class_name: &str, metadata: &Metadata, graph: &mut GraphData) -> NodeId {
        let id = graph.find_or_add_node(class_name);
        let node = graph.node_mut(id);
        for (key, value) in metadata {
            node.metadata.insert(key.clone(), value.clone());
        }
        id
    }

    pub fn add_relationships(&self, relationships: &[Relationship], graph: &mut GraphData) {
        for relationship in relationships {
            self.add_relationship(relationship, graph);
        }
    }

    fn add_inheritance(parent: &str, child: &str, graph: &mut GraphData) -> EdgeId {
        graph.find_or_add_edge(parent, child, INHERITS)
    }

    fn add_association(from: &str, to: &str, name: &str, graph: &mut GraphData) -> EdgeId {
        graph.find_or_add_edge(from, to, name)
    }
}

impl DiagramPlugin for ClassDiagramPlugin {
    fn add_entity(&self, entity: &Entity, graph: &mut GraphData) {
        self.add_class(&entity.name, &entity.attributes, graph);
    }

    fn add_relationship(&self, relationship: &Relationship, graph: &mut GraphData) {
        let from = &relationship.from_entity;
        let to = &relationship.to_entity;
        if relationship.key == INHERITS {
            Self::add_inheritance(from, to, graph);
        } else {
            Self::add_association(from, to, &relationship.key, graph);
        }
    }
}

// ── Lineage ───────────────────────────────────────────────────────

/// Caller-supplied metadata for lineage graphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineageMetadata {
    /// `"Entity.attribute"` → node metadata.
    #[serde(default)]
    pub nodes: HashMap<String, Metadata>,
    /// `"From.key->To.key"` → edge metadata.
    #[serde(default)]
    pub edges: HashMap<String, Metadata>,
}

/// Field-level data lineage.
#[derive(Debug, Clone, Default)]
pub struct LineagePlugin {
    metadata: LineageMetadata,
}

impl LineagePlugin {
    pub fn new(metadata: LineageMetadata) -> Self {
        Self { metadata }
    }

    /// Add a node, merging `metadata` over its derived defaults.
    pub fn add_node(&self, name: &str, metadata: Option<&Metadata>, graph: &mut GraphData) -> NodeId {
        graph.find_or_add_node_with_meta(name, metadata)
    }

    /// Add a `lineage` edge, merging `metadata` over the edge's metadata.
    pub fn add_edge(
        &self,
        from: &str,
        to: &str,
        metadata: Option<&Metadata>,
        graph: &mut GraphData,
    ) -> EdgeId {
        let id = graph.find_or_add_edge(from, to, LINEAGE);
        graph.merge_edge_metadata(id, metadata);
        id
    }

    pub fn outgoing_edges<'g>(&self, name: &str, graph: &'g GraphData) -> Vec<&'g Edge> {
        graph.outgoing_edges(name)
    }

    pub fn incoming_edges<'g>(&self, name: &str, graph: &'g GraphData) -> Vec<&'g Edge> {
        graph.incoming_edges(name)
    }
}

/// Name of the lineage node for one attribute.
pub fn field_node_name(entity: &str, attribute: &str) -> String {
    format!("{entity}.{attribute}")
}

/// Key of the edge metadata map for one lineage edge.
pub fn edge_metadata_key(from: &str, to: &str) -> String {
    format!("{from}->{to}")
}

impl DiagramPlugin for LineagePlugin {
    fn add_entity(&self, entity: &Entity, graph: &mut GraphData) {
        for attribute in entity.attributes.keys() {
            let name = field_node_name(&entity.name, attribute);
            let custom = self.metadata.nodes.get(&name);

            tracing::debug!(node = %name, custom_metadata = custom.is_some(), "Adding lineage node");
            self.add_node(&name, custom, graph);
        }
    }

    fn add_relationship(&self, relationship: &Relationship, graph: &mut GraphData) {
        let from = field_node_name(&relationship.from_entity, &relationship.key);
        let to = field_node_name(&relationship.to_entity, &relationship.key);
        let custom = self.metadata.edges.get(&edge_metadata_key(&from, &to));

        tracing::debug!(from = %from, to = %to, custom_metadata = custom.is_some(), "Adding lineage edge");
        self.add_edge(&from, &to, custom, graph);
    }
}

// ── Dispatch ──────────────────────────────────────────────────────

/// One of the three adapters, selected by [`PluginType`].
#[derive(Debug, Clone)]
pub enum Plugin {
    Erd(ErdPlugin),
    ClassDiagram(ClassDiagramPlugin),
    Lineage(LineagePlugin),
}

impl Plugin {
    /// Build the adapter for `plugin_type`. Lineage metadata is ignored by
    /// the other adapters.
    pub fn for_type(plugin_type: PluginType, lineage: LineageMetadata) -> Self {
        match plugin_type {
            PluginType::Erd => Self::Erd(ErdPlugin),
            PluginType::ClassDiagram => Self::ClassDiagram(ClassDiagramPlugin),
            PluginType::Lineage => Self::Lineage(LineagePlugin::new(lineage)),
        }
    }

    pub fn plugin_type(&self) -> PluginType {
        match self {
            Self::Erd(_) => PluginType::Erd,
            Self::ClassDiagram(_) => PluginType::ClassDiagram,
            Self::Lineage(_) => PluginType::Lineage,
        }
    }

    /// The lineage adapter, for lineage-only operations.
    pub fn as_lineage(&self) -> schemagraph_core::Result<&LineagePlugin> {
        match self {
            Self::Lineage(plugin) => Ok(plugin),
            other => Err(SchemaGraphError::UnsupportedOperation(format!(
                "{} adapter has no lineage operations",
                other.plugin_type()
            ))),
        }
    }

    /// Build a fresh graph over `entities`: all entities first, then all
    /// relationships.
    pub fn populate(&self, entities: &[Entity], relationships: &[Relationship]) -> GraphData {
        let mut graph = GraphData::new(NodeFactory::new(entities.iter().cloned()));

        for entity in entities {
            self.add_entity(entity, &mut graph);
        }
        match self {
            Self::ClassDiagram(p) => p.add_relationships(relationships, &mut graph),
            _ => {
                for relationship in relationships {
                    self.add_relationship(relationship, &mut graph);
                }
            }
        }

        tracing::debug!(
            plugin = %self.plugin_type(),
            entities = entities.len(),
            relationships = relationships.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Graph populated"
        );

        graph
    }
}

impl DiagramPlugin for Plugin {
    fn add_entity(&self, entity: &Entity, graph: &mut GraphData) {
        match self {
            Self::Erd(p) => p.add_entity(entity, graph),
            Self::ClassDiagram(p) => p.add_entity(entity, graph),
            Self::Lineage(p) => p.add_entity(entity, graph),
        }
    }

    fn add_relationship(&self, relationship: &Relationship, graph: &mut GraphData) {
        match self {
            Self::Erd(p) => p.add_relationship(relationship, graph),
            Self::ClassDiagram(p) => p.add_relationship(relationship, graph),
            Self::Lineage(p) => p.add_relationship(relationship, graph),
        }
    }
}
