//! On-disk snapshot layout.
//!
//! ```text
//! {
//!   "format_version": 1,
//!   "saved_at": "2024-01-15T10:00:00Z",
//!   "content_hash": "<blake3 hex>",
//!   "nodes": [{"name": .., "metadata": {..}}],
//!   "edges": [{"from": .., "to": .., "edge_key": .., "metadata": {..}}]
//! }
//! ```

use chrono::{DateTime, Utc};
use schemagraph_core::Metadata;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::hash::compute_rows_hash;

/// Current snapshot format.
pub const FORMAT_VERSION: u32 = 1;

/// A persisted node, unique by exact name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    pub name: String,
    #[serde(default)]
    pub metadata: Metadata,
}

/// A persisted edge, unique by exact (from, to, edge_key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub from: String,
    pub to: String,
    pub edge_key: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl EdgeRow {
    pub fn matches(&self, from: &str, to: &str, edge_key: &str) -> bool {
        self.from == from && self.to == to && self.edge_key == edge_key
    }

    /// Whether the edge starts or ends at `name`.
    pub fn touches(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }
}

/// The full contents of a snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    /// BLAKE3 hash (hex) of `nodes` and `edges`.
    pub content_hash: String,
    #[serde(default)]
    pub nodes: Vec<NodeRow>,
    #[serde(default)]
    pub edges: Vec<EdgeRow>,
}

impl Snapshot {
    /// Seal rows into a snapshot stamped with the current time.
    pub fn seal(nodes: Vec<NodeRow>, edges: Vec<EdgeRow>) -> Result<Self> {
        let content_hash = compute_rows_hash(&nodes, &edges)?;
        Ok(Self {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
            content_hash,
            nodes,
            edges,
        })
    }

    /// Check the format version and the stored hash against the rows.
    pub fn verify(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion(self.format_version));
        }

        let actual = compute_rows_hash(&self.nodes, &self.edges)?;
        if actual != self.content_hash {
            return Err(StoreError::IntegrityViolation {
                expected: self.content_hash.clone(),
                actual,
            });
        }

        Ok(())
    }
}
