// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Counter Compaction Module
//!
//! Collapses many stored snapshots of a counter into one merged snapshot.
//! Because merge is idempotent, snapshots may overlap freely; compacting the
//! same history twice produces the same result.
//!
//! # Two Compaction Pathways
//!
//! - **JSON Compaction**: For web APIs and JSON-based storage systems.
//! - **Binary Compaction**: For storage and transport of the bincode encoding.
//!
//! # Example
//!
//! ```
//! use crdt_grow_counter::compaction::compact_json_values;
//! use serde_json::json;
//!
//! let values = vec![
//!     json!({"counters": {"node_a": 10}}),
//!     json!({"counters": {"node_b": 20}}),
//! ];
//!
//! let compacted = compact_json_values(&values).unwrap();
//! assert_eq!(compacted, json!({"counters": {"node_a": 10, "node_b": 20}}));
//! ```

use crate::bridge::SerdeBytesBridge;
use crate::replica_state::{ReplicaState, ReplicaStateReader};
use crate::traits::{Crdt, CrdtError};
use serde_json::Value;

/// Compacts multiple JSON states into a single merged state.
pub fn compact_json_values(values: &[Value]) -> Result<Value, CrdtError> {
    tracing::debug!(snapshots = values.len(), "compacting JSON states");
    SerdeBytesBridge::merge_json_values(values)
}

/// Compacts multiple binary states into a single buffer.
///
/// An empty input yields an empty buffer.
///
/// # Example
///
/// ```
/// use crdt_grow_counter::{Crdt, ReplicaCounter, ReplicaId};
/// use crdt_grow_counter::compaction::compact_bytes;
///
/// let mut a = ReplicaCounter::new(ReplicaId::new("node_a").unwrap());
/// a.increment_by(10).unwrap();
/// let bytes1 = a.state().to_bytes().unwrap();
///
/// let mut b = ReplicaCounter::new(ReplicaId::new("node_b").unwrap());
/// b.increment_by(20).unwrap();
/// let bytes2 = b.state().to_bytes().unwrap();
///
/// let compacted = compact_bytes(&[&bytes1, &bytes2]).unwrap();
/// assert!(!compacted.is_empty());
/// ```
pub fn compact_bytes(buffers: &[&[u8]]) -> Result<Vec<u8>, CrdtError> {
    if buffers.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!(snapshots = buffers.len(), "compacting binary states");
    let readers: Vec<_> = buffers.iter().map(|b| ReplicaStateReader::new(b)).collect();
    let merged = ReplicaState::merge_from_readers(&readers)?;
    merged.to_bytes()
}
