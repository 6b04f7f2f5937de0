// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::replica_state::{ReplicaState, ReplicaStateReader};
use crate::traits::{Crdt, CrdtError};
use serde_json::Value;

pub(crate) fn parse_state(json_value: Value) -> Result<ReplicaState, CrdtError> {
    let state: ReplicaState = serde_json::from_value(json_value)
        .map_err(|e| CrdtError::InvalidInput(format!("JSON parse error: {}", e)))?;
    state.validate()?;
    Ok(state)
}

pub(crate) fn state_to_json(state: &ReplicaState) -> Result<Value, CrdtError> {
    serde_json::to_value(state).map_err(|e| CrdtError::Serialization(e.to_string()))
}

/// Converts a JSON value to the binary encoding.
pub fn json_to_bytes(json_value: Value) -> Result<Vec<u8>, CrdtError> {
    parse_state(json_value)?.to_bytes()
}

/// Validates a JSON value against the state's rules.
pub fn validate_json(json_value: Value) -> Result<(), CrdtError> {
    parse_state(json_value).map(|_| ())
}

/// Converts binary bytes back to a JSON value.
pub fn bytes_to_json(bytes: &[u8]) -> Result<Value, CrdtError> {
    let state = ReplicaState::merge_from_readers(&[ReplicaStateReader::new(bytes)])?;
    state_to_json(&state)
}
