// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use super::serialization::{parse_state, state_to_json};
use crate::replica_state::merge_all;
use crate::traits::CrdtError;
use serde_json::Value;

/// Merges multiple JSON values representing counter states into one.
///
/// An empty slice yields `Value::Null`.
pub fn merge_json_values(values: &[Value]) -> Result<Value, CrdtError> {
    if values.is_empty() {
        return Ok(Value::Null);
    }

    let states = values
        .iter()
        .map(|val| parse_state(val.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    state_to_json(&merge_all(&states))
}
