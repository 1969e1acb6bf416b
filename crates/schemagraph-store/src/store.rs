//! Graph persistence: trait + JSON snapshot implementation.
//!
//! Rows follow relational semantics: node rows are keyed by exact name and
//! edge rows by exact (from, to, edge_key). The in-memory graph is looser
//! (case-insensitive names, one edge per endpoint pair), so loading a
//! snapshot can fold several rows into a single node or edge.

use std::fs;
use std::path::{Path, PathBuf};

use schemagraph_core::Metadata;
use schemagraph_graph::{GraphData, NodeFactory};

use crate::error::Result;
use crate::snapshot::{EdgeRow, NodeRow, Snapshot};

/// Trait for graph persistence backends.
pub trait GraphPersistence {
    /// Insert or replace every node and edge of `graph`, skipping rows that
    /// are already stored unchanged. Either all rows are written or none.
    fn save_graph(&mut self, graph: &GraphData) -> Result<()>;

    /// Rebuild a graph from the stored rows, nodes first, in row order.
    fn load_graph(&self, factory: NodeFactory) -> Result<GraphData>;

    fn add_or_update_node(&mut self, name: &str, metadata: Metadata) -> Result<()>;

    /// Delete a node row and every edge row touching it. Returns whether the
    /// node row existed.
    fn delete_node(&mut self, name: &str) -> Result<bool>;

    fn add_or_update_edge(
        &mut self,
        from: &str,
        to: &str,
        edge_key: &str,
        metadata: Metadata,
    ) -> Result<()>;

    /// Delete one edge row. Returns whether it existed.
    fn delete_edge(&mut self, from: &str, to: &str, edge_key: &str) -> Result<bool>;
}

/// Rows of a snapshot, held in memory between writes.
#[derive(Debug, Clone, Default, PartialEq)]
struct Tables {
    nodes: Vec<NodeRow>,
    edges: Vec<EdgeRow>,
}

impl Tables {
    /// Insert or replace a node row. Returns `false` if it was already stored.
    fn upsert_node(&mut self, name: &str, metadata: &Metadata) -> bool {
        match self.nodes.iter_mut().find(|row| row.name == name) {
            Some(row) if row.metadata == *metadata => false,
            Some(row) => {
                row.metadata = metadata.clone();
                true
            }
            None => {
                self.nodes.push(NodeRow {
                    name: name.to_string(),
                    metadata: metadata.clone(),
                });
                true
            }
        }
    }

    /// Insert or replace an edge row. Returns `false` if it was already stored.
    fn upsert_edge(&mut self, from: &str, to: &str, edge_key: &str, metadata: &Metadata) -> bool {
        match self.edges.iter_mut().find(|row| row.matches(from, to, edge_key)) {
            Some(row) if row.metadata == *metadata => false,
            Some(row) => {
                row.metadata = metadata.clone();
                true
            }
            None => {
                self.edges.push(EdgeRow {
                    from: from.to_string(),
                    to: to.to_string(),
                    edge_key: edge_key.to_string(),
                    metadata: metadata.clone(),
                });
                true
            }
        }
    }
}

/// File-backed graph store.
///
/// Keeps the rows in memory and rewrites the whole snapshot file after
/// every successful mutation. Writes go to a sibling temp file that is then
/// renamed over the snapshot, so a failed write leaves the old file intact.
#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
    tables: Tables,
}

impl SnapshotStore {
    /// Open the snapshot at `path`, verifying its integrity.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let tables = if path.exists() {
            let json = fs::read_to_string(&path)?;
            let snapshot: Snapshot = serde_json::from_str(&json)?;
            snapshot.verify()?;

            tracing::debug!(
                path = %path.display(),
                nodes = snapshot.nodes.len(),
                edges = snapshot.edges.len(),
                saved_at = %snapshot.saved_at,
                "Snapshot opened"
            );

            Tables {
                nodes: snapshot.nodes,
                edges: snapshot.edges,
            }
        } else {
            tracing::debug!(path = %path.display(), "No snapshot yet, starting empty");
            Tables::default()
        };

        Ok(Self { path, tables })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored node rows, in insertion order.
    pub fn nodes(&self) -> &[NodeRow] {
        &self.tables.nodes
    }

    /// Stored edge rows, in insertion order.
    pub fn edges(&self) -> &[EdgeRow] {
        &self.tables.edges
    }

    /// Apply `change` to a copy of the rows and persist the copy if anything
    /// changed. The in-memory rows are only replaced once the write succeeded.
    fn transact<F>(&mut self, change: F) -> Result<bool>
    where
        F: FnOnce(&mut Tables) -> bool,
    {
        let mut staged = self.tables.clone();
        let changed = change(&mut staged);

        if changed || !self.path.exists() {
            self.write(&staged)?;
        }

        self.tables = staged;
        Ok(changed)
    }

    fn write(&self, tables: &Tables) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let snapshot = Snapshot::seal(tables.nodes.clone(), tables.edges.clone())?;
        let json = serde_json::to_string_pretty(&snapshot)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            nodes = tables.nodes.len(),
            edges = tables.edges.len(),
            content_hash = %snapshot.content_hash,
            "Snapshot written"
        );

        Ok(())
    }
}

impl GraphPersistence for SnapshotStore {
    fn save_graph(&mut self, graph: &GraphData) -> Result<()> {
        let mut written = 0usize;
        let mut skipped = 0usize;

        self.transact(|tables| {
            for node in graph.nodes() {
                if tables.upsert_node(node.name(), &node.metadata) {
                    written += 1;
                } else {
                    skipped += 1;
                }
            }

            for edge in graph.edges() {
                let from = graph.node(edge.from()).name();
                let to = graph.node(edge.to()).name();
                if tables.upsert_edge(from, to, edge.edge_key(), &edge.metadata) {
                    written += 1;
                } else {
                    skipped += 1;
                }
            }

            written > 0
        })?;

        tracing::info!(
            path = %self.path.display(),
            written,
            skipped,
            "Graph saved"
        );

        Ok(())
    }

    fn load_graph(&self, factory: NodeFactory) -> Result<GraphData> {
        let mut graph = GraphData::new(factory);

        for row in &self.tables.nodes {
            graph.find_or_add_node(&row.name);
            graph.set_node_metadata(&row.name, row.metadata.clone());
        }

        for row in &self.tables.edges {
            graph.find_or_add_edge(&row.from, &row.to, &row.edge_key);
            graph.set_edge_metadata(&row.from, &row.to, row.metadata.clone())?;
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Graph loaded from snapshot"
        );

        Ok(graph)
    }

    fn add_or_update_node(&mut self, name: &str, metadata: Metadata) -> Result<()> {
        self.transact(|tables| tables.upsert_node(name, &metadata))?;
        Ok(())
    }

    fn delete_node(&mut self, name: &str) -> Result<bool> {
        let mut cascaded = 0usize;
        let mut removed = false;

        self.transact(|tables| {
            let edges_before = tables.edges.len();
            tables.edges.retain(|row| !row.touches(name));
            cascaded = edges_before - tables.edges.len();

            let nodes_before = tables.nodes.len();
            tables.nodes.retain(|row| row.name != name);
            removed = tables.nodes.len() != nodes_before;

            removed || cascaded > 0
        })?;

        tracing::debug!(node = name, removed, cascaded, "Node deleted");
        Ok(removed)
    }

    fn add_or_update_edge(
        &mut self,
        from: &str,
        to: &str,
        edge_key: &str,
        metadata: Metadata,
    ) -> Result<()> {
        self.transact(|tables| tables.upsert_edge(from, to, edge_key, &metadata))?;
        Ok(())
    }

    fn delete_edge(&mut self, from: &str, to: &str, edge_key: &str) -> Result<bool> {
        self.transact(|tables| {
            let before = tables.edges.len();
            tables.edges.retain(|row| !row.matches(from, to, edge_key));
            tables.edges.len() != before
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use schemagraph_core::Entity;
    use serde_json::{json, Value};

    fn meta(value: Value) -> Metadata {
        value.as_object().cloned().unwrap()
    }

    fn sample_graph() -> GraphData {
        let mut graph = GraphData::default();
        graph.find_or_add_node_with_meta("Users", Some(&meta(json!({"Owner": "crm"}))));
        graph.find_or_add_edge("Users", "Orders", "UserId");
        graph
            .update_edge_metadata("Users", "Orders", "Cardinality", json!("1:n"))
            .unwrap();
        graph.find_or_add_edge("Orders", "Items", "OrderId");
        graph
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("graph.json")).unwrap();
        assert!(store.nodes().is_empty());
        assert!(store.edges().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let graph = sample_graph();

        let mut store = SnapshotStore::open(&path).unwrap();
        store.save_graph(&graph).unwrap();

        let reopened = SnapshotStore::open(&path).unwrap();
        let loaded = reopened.load_graph(NodeFactory::default()).unwrap();

        assert_eq!(loaded.nodes(), graph.nodes());
        assert_eq!(loaded.edges(), graph.edges());
    }

    #[test]
    fn test_save_skips_unchanged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let graph = sample_graph();

        let mut store = SnapshotStore::open(&path).unwrap();
        store.save_graph(&graph).unwrap();
        let first: Snapshot = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        store.save_graph(&graph).unwrap();
        let second: Snapshot = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        // Nothing changed, so the file was not rewritten.
        assert_eq!(first.saved_at, second.saved_at);
        assert_eq!(store.nodes().len(), graph.node_count());
        assert_eq!(store.edges().len(), graph.edge_count());
    }

    #[test]
    fn test_save_replaces_changed_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SnapshotStore::open(dir.path().join("graph.json")).unwrap();

        let mut graph = sample_graph();
        store.save_graph(&graph).unwrap();

        graph.update_node_metadata("Users", "Owner", json!("billing"));
        store.save_graph(&graph).unwrap();

        assert_eq!(store.nodes().len(), graph.node_count());
        assert_eq!(store.nodes()[0].metadata["Owner"], json!("billing"));
    }

    #[test]
    fn test_tampered_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let mut store = SnapshotStore::open(&path).unwrap();
        store.save_graph(&sample_graph()).unwrap();

        let mut snapshot: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        snapshot["nodes"][0]["name"] = json!("Admins");
        fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        let err = SnapshotStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::IntegrityViolation { .. }));
    }

    #[test]
    fn test_future_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let mut store = SnapshotStore::open(&path).unwrap();
        store.add_or_update_node("A", Metadata::new()).unwrap();

        let mut snapshot: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        snapshot["format_version"] = json!(2);
        fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        assert!(matches!(
            SnapshotStore::open(&path),
            Err(StoreError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_same_endpoints_different_keys_collapse_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SnapshotStore::open(dir.path().join("graph.json")).unwrap();

        store
            .add_or_update_edge("A", "B", "k1", meta(json!({"n": 1})))
            .unwrap();
        store
            .add_or_update_edge("A", "B", "k2", meta(json!({"n": 2})))
            .unwrap();
        assert_eq!(store.edges().len(), 2);

        let graph = store.load_graph(NodeFactory::default()).unwrap();
        assert_eq!(graph.edge_count(), 1);

        let edge = graph.edge(graph.find_edge("A", "B").unwrap());
        assert_eq!(edge.edge_key(), "k1");
        assert_eq!(edge.metadata["n"], json!(2));
    }

    #[test]
    fn test_case_variants_fold_into_one_node_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SnapshotStore::open(dir.path().join("graph.json")).unwrap();

        store.add_or_update_node("Users", meta(json!({"v": 1}))).unwrap();
        store.add_or_update_node("users", meta(json!({"v": 2}))).unwrap();
        assert_eq!(store.nodes().len(), 2);

        let graph = store.load_graph(NodeFactory::default()).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.nodes()[0].name(), "Users");
        assert_eq!(graph.nodes()[0].metadata["v"], json!(2));
    }

    #[test]
    fn test_delete_node_cascades_edges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let mut store = SnapshotStore::open(&path).unwrap();
        store.save_graph(&sample_graph()).unwrap();

        assert!(store.delete_node("Orders").unwrap());
        assert!(store.nodes().iter().all(|row| row.name != "Orders"));
        assert!(store.edges().is_empty());

        assert!(!store.delete_node("Orders").unwrap());

        let reopened = SnapshotStore::open(&path).unwrap();
        assert_eq!(reopened.edges().len(), 0);
    }

    #[test]
    fn test_delete_edge_matches_exact_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SnapshotStore::open(dir.path().join("graph.json")).unwrap();
        store
            .add_or_update_edge("A", "B", "fk", Metadata::new())
            .unwrap();

        assert!(!store.delete_edge("A", "B", "other").unwrap());
        assert!(store.delete_edge("A", "B", "fk").unwrap());
        assert!(store.edges().is_empty());
    }

    #[test]
    fn test_load_uses_factory_for_edge_only_nodes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SnapshotStore::open(dir.path().join("graph.json")).unwrap();
        store
            .add_or_update_edge("Users", "Orders", "UserId", Metadata::new())
            .unwrap();

        let factory = NodeFactory::new(vec![
            Entity::new("Orders").with_attribute("UserId", json!({"Type": "int"}))
        ]);
        let graph = store.load_graph(factory).unwrap();

        let orders = graph.find_node("Orders").unwrap();
        assert_eq!(graph.node(orders).metadata["AttributeCount"], json!(1));
    }

    #[test]
    fn test_writes_create_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/graph.json");

        let mut store = SnapshotStore::open(&path).unwrap();
        store.add_or_update_node("A", Metadata::new()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
