//! schemagraph-store: Tamper-evident snapshot persistence for graph stores.
//!
//! A graph is persisted as two row tables (nodes and edges) inside a single
//! JSON snapshot file. Each snapshot carries a BLAKE3 hash of its rows so
//! that hand edits or truncation are caught on open.

pub mod error;
pub mod hash;
pub mod snapshot;
pub mod store;

pub use error::{Result, StoreError};
pub use snapshot::{EdgeRow, NodeRow, Snapshot, FORMAT_VERSION};
pub use store::{GraphPersistence, SnapshotStore};
