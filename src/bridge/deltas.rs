// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use super::serialization::{parse_state, state_to_json};
use crate::config::ReplicaConfig;
use crate::counter::ReplicaCounter;
use crate::replica_id::ReplicaId;
use crate::replica_state::{ReplicaState, ReplicaStateReader};
use crate::traits::{Crdt, CrdtError};
use serde::Deserialize;
use serde_json::Value;

/// Accepted shapes of a JSON increment: `5` or `{"increment": 5}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IncrementDelta {
    Direct(u64),
    Object { increment: u64 },
}

impl IncrementDelta {
    pub fn amount(&self) -> u64 {
        match self {
            IncrementDelta::Direct(v) => *v,
            IncrementDelta::Object { increment } => *increment,
        }
    }
}

fn parse_increment(delta: &Value) -> Result<u64, CrdtError> {
    let parsed: IncrementDelta = serde_json::from_value(delta.clone())
        .map_err(|e| CrdtError::InvalidInput(format!("Invalid increment delta: {}", e)))?;
    Ok(parsed.amount())
}

fn increment_state(
    state: ReplicaState,
    amount: u64,
    replica_id: &str,
) -> Result<ReplicaState, CrdtError> {
    let replica_id = ReplicaId::new(replica_id)?;
    let mut counter = ReplicaCounter::with_state(replica_id, state, ReplicaConfig::default());
    counter.increment_by(amount)?;
    Ok(counter.into_state())
}

/// Apply an increment to an existing JSON state.
///
/// Unlike merging, which takes per-replica maxima, this adds `delta` to
/// `replica_id`'s entry. A missing state starts empty.
pub fn apply_json_delta(
    current_state: Option<&Value>,
    delta: &Value,
    replica_id: &str,
) -> Result<Value, CrdtError> {
    let state = match current_state {
        Some(state) => parse_state(state.clone())?,
        None => ReplicaState::new(),
    };
    let amount = parse_increment(delta)?;
    state_to_json(&increment_state(state, amount, replica_id)?)
}

/// Apply a JSON increment to a binary state, returning the new encoding.
pub fn apply_bytes_delta(
    current_state_bytes: Option<&[u8]>,
    delta: &Value,
    replica_id: &str,
) -> Result<Vec<u8>, CrdtError> {
    let state = match current_state_bytes {
        Some(bytes) => ReplicaState::merge_from_readers(&[ReplicaStateReader::new(bytes)])?,
        None => ReplicaState::new(),
    };
    let amount = parse_increment(delta)?;
    increment_state(state, amount, replica_id)?.to_bytes()
}
