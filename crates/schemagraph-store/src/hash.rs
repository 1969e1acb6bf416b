//! BLAKE3 content hashing for tamper evidence.
//!
//! Hashes the canonical JSON of a snapshot's rows. Header fields
//! (`format_version`, `saved_at`, the hash itself) are not covered.

use serde::Serialize;

use crate::error::Result;
use crate::snapshot::{EdgeRow, NodeRow};

/// Hashable view of a snapshot's rows.
#[derive(Serialize)]
struct HashableRows<'a> {
    nodes: &'a [NodeRow],
    edges: &'a [EdgeRow],
}

/// Compute the hex-encoded BLAKE3 hash of the given rows.
pub fn compute_rows_hash(nodes: &[NodeRow], edges: &[EdgeRow]) -> Result<String> {
    let json = serde_json::to_vec(&HashableRows { nodes, edges })?;
    Ok(blake3::hash(&json).to_hex().to_string())
}
