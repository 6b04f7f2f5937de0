// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

pub mod deltas;
pub mod merging;
pub mod serialization;

use crate::traits::CrdtError;
use serde_json::Value;

/// A bridge between JSON counter states and the compact binary encoding.
///
/// External systems speak JSON; storage and transport use the binary form.
/// Every path through the bridge parses into a [`ReplicaState`], so ids and
/// counts are validated before anything is encoded or merged.
///
/// # Example
///
/// ```
/// use crdt_grow_counter::SerdeBytesBridge;
/// use serde_json::json;
///
/// let json_data = json!({"counters": {"node_a": 10}});
///
/// let bytes = SerdeBytesBridge::json_to_bytes(json_data.clone()).unwrap();
/// assert_eq!(SerdeBytesBridge::bytes_to_json(&bytes).unwrap(), json_data);
/// ```
///
/// [`ReplicaState`]: crate::ReplicaState
pub struct SerdeBytesBridge;

impl SerdeBytesBridge {
    /// Converts a JSON state to its binary encoding.
    pub fn json_to_bytes(json_value: Value) -> Result<Vec<u8>, CrdtError> {
        serialization::json_to_bytes(json_value)
    }

    /// Validates a JSON state without keeping the encoding.
    pub fn validate_json(json_value: Value) -> Result<(), CrdtError> {
        serialization::validate_json(json_value)
    }

    /// Converts a binary state back to JSON.
    pub fn bytes_to_json(bytes: &[u8]) -> Result<Value, CrdtError> {
        serialization::bytes_to_json(bytes)
    }

    /// Merges multiple JSON states into a single JSON state.
    pub fn merge_json_values(values: &[Value]) -> Result<Value, CrdtError> {
        merging::merge_json_values(values)
    }

    /// Applies an increment to a JSON state on behalf of `replica_id`.
    pub fn apply_json_delta(
        current_state: Option<&Value>,
        delta: &Value,
        replica_id: &str,
    ) -> Result<Value, CrdtError> {
        deltas::apply_json_delta(current_state, delta, replica_id)
    }

    /// Applies a JSON increment to a binary state, returning the new encoding.
    pub fn apply_bytes_delta(
        current_state_bytes: Option<&[u8]>,
        delta: &Value,
        replica_id: &str,
    ) -> Result<Vec<u8>, CrdtError> {
        deltas::apply_bytes_delta(current_state_bytes, delta, replica_id)
    }
}
