// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::traits::CrdtError;
use serde::{Deserialize, Serialize};

/// Delivery guarantee the transport gives for deltas handed to
/// [`ReplicaCounter::apply`](crate::ReplicaCounter::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Every delta arrives at most once. Applies are additive; a redelivered
    /// delta is counted again.
    #[default]
    AtMostOnce,
    /// Deltas may be duplicated or reordered. Applies fold the delta's
    /// sequence number with `max`, so redelivery is a no-op.
    AtLeastOnce,
}

/// Per-replica configuration.
///
/// ```
/// use crdt_grow_counter::{DeliveryMode, ReplicaConfig};
///
/// let config = ReplicaConfig::from_json_str(r#"{"delivery": "at_least_once"}"#).unwrap();
/// assert_eq!(config.delivery, DeliveryMode::AtLeastOnce);
/// assert_eq!(ReplicaConfig::from_json_str("{}").unwrap(), ReplicaConfig::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ReplicaConfig {
    pub delivery: DeliveryMode,
}

impl ReplicaConfig {
    pub fn at_least_once() -> Self {
        Self {
            delivery: DeliveryMode::AtLeastOnce,
        }
    }

    /// Parses a configuration document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CrdtError> {
        serde_json::from_str(json)
            .map_err(|e| CrdtError::InvalidInput(format!("Invalid replica config: {}", e)))
    }
}
