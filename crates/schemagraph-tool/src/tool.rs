//! The graph tool: build a graph from a request, narrow it, export it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use schemagraph_core::{Entity, Metadata, PluginType, Relationship, ToolConfig};
use schemagraph_graph::{extract_subgraph, FocusSpec, GraphData, NodeFactory};

use crate::error::Result;
use crate::plugins::{LineageMetadata, Plugin};

/// Everything needed to build one graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphRequest {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    /// Lineage node metadata keyed by `"Entity.attribute"`.
    #[serde(default)]
    pub node_metadata: Option<HashMap<String, Metadata>>,
    /// Lineage edge metadata keyed by `"From.key->To.key"`.
    #[serde(default)]
    pub edge_metadata: Option<HashMap<String, Metadata>>,
    /// Adapter to use; falls back to the configured default.
    #[serde(default)]
    pub plugin: Option<PluginType>,
    /// Entities to focus on. Absent or empty keeps the whole graph.
    #[serde(default)]
    pub focus: Option<Vec<String>>,
    #[serde(default)]
    pub bubble_up: Option<bool>,
    #[serde(default)]
    pub include_unfocused_neighbors: Option<bool>,
}

/// Builds graphs according to a [`ToolConfig`].
pub struct GraphTool {
    config: ToolConfig,
}

impl GraphTool {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Build the graph described by `request`.
    ///
    /// With an adapter selected the graph is populated through it; without
    /// one it gets a node per entity and an edge per relationship. A
    /// non-empty focus list then narrows the result.
    pub fn create_graph(&self, request: &GraphRequest) -> GraphData {
        let graph = match request.plugin.or(self.config.default_plugin) {
            Some(plugin_type) => {
                let lineage = LineageMetadata {
                    nodes: request.node_metadata.clone().unwrap_or_default(),
                    edges: request.edge_metadata.clone().unwrap_or_default(),
                };
                Plugin::for_type(plugin_type, lineage)
                    .populate(&request.entities, &request.relationships)
            }
            None => create_base_graph(&request.entities, &request.relationships),
        };

        let focus = match request.focus.as_deref() {
            Some(focus) if !focus.is_empty() => focus,
            _ => return graph,
        };

        let spec = FocusSpec::new(focus.iter().cloned())
            .with_bubble_up(request.bubble_up.unwrap_or(self.config.bubble_up))
            .with_unfocused_neighbors(
                request
                    .include_unfocused_neighbors
                    .unwrap_or(self.config.include_unfocused_neighbors),
            );

        let filtered = extract_subgraph(&graph, &spec);

        tracing::info!(
            nodes_before = graph.node_count(),
            edges_before = graph.edge_count(),
            nodes_after = filtered.node_count(),
            edges_after = filtered.edge_count(),
            "Graph narrowed to focus"
        );

        filtered
    }

    /// Pretty-printed JSON export of a graph.
    pub fn to_json(graph: &GraphData) -> Result<String> {
        let export = GraphExport {
            nodes: graph
                .nodes()
                .iter()
                .map(|node| NodeExport {
                    name: node.name(),
                    metadata: &node.metadata,
                })
                .collect(),
            edges: graph
                .edges()
                .iter()
                .map(|edge| EdgeExport {
                    from: graph.node(edge.from()).name(),
                    to: graph.node(edge.to()).name(),
                    edge_key: edge.edge_key(),
                    metadata: &edge.metadata,
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&export)?)
    }
}

/// One node per entity, one edge per relationship, no adapter logic.
fn create_base_graph(entities: &[Entity], relationships: &[Relationship]) -> GraphData {
    let mut graph = GraphData::new(NodeFactory::new(entities.iter().cloned()));

    for entity in entities {
        graph.find_or_add_node(&entity.name);
    }
    for relationship in relationships {
        graph.find_or_add_edge(
            &relationship.from_entity,
            &relationship.to_entity,
            &relationship.key,
        );
    }

    graph
}

// ── JSON export ───────────────────────────────────────────────────

#[derive(Serialize)]
struct GraphExport<'a> {
    nodes: Vec<NodeExport<'a>>,
    edges: Vec<EdgeExport<'a>>,
}

#[derive(Serialize)]
struct NodeExport<'a> {
    name: &'a str,
    metadata: &'a Metadata,
}

#[derive(Serialize)]
struct EdgeExport<'a> {
    from: &'a str,
    to: &'a str,
    edge_key: &'a str,
    metadata: &'a Metadata,
}
