// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::replica_id::ReplicaId;
use crate::replica_state::ReplicaState;
use crate::traits::CrdtError;
use serde::{Deserialize, Serialize};

/// A transmissible increment: "`replica_id`'s count grew by `delta`".
///
/// `seq` is the origin replica's own count right after the increment, which
/// makes it a per-origin, strictly increasing sequence number. Receivers that
/// must tolerate redelivery use it to recognise deltas they already hold.
///
/// Deltas are immutable value objects. The only way to build one is
/// [`Delta::new`], which deserialization also goes through, so a delta with
/// `delta == 0` or `seq < delta` cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDelta")]
pub struct Delta {
    replica_id: ReplicaId,
    delta: u64,
    seq: u64,
}

#[derive(Deserialize)]
struct RawDelta {
    replica_id: ReplicaId,
    delta: u64,
    seq: u64,
}

impl TryFrom<RawDelta> for Delta {
    type Error = CrdtError;

    fn try_from(raw: RawDelta) -> Result<Self, Self::Error> {
        Delta::new(raw.replica_id, raw.delta, raw.seq)
    }
}

impl Delta {
    /// Creates a validated delta.
    ///
    /// # Errors
    /// Returns [`CrdtError::InvalidDelta`] when `delta` is zero or `seq` is
    /// smaller than `delta` (the origin cannot have counted less than it just
    /// added).
    pub fn new(replica_id: ReplicaId, delta: u64, seq: u64) -> Result<Self, CrdtError> {
        if delta == 0 {
            return Err(CrdtError::InvalidDelta(format!(
                "delta for replica {} must be at least 1",
                replica_id
            )));
        }
        if seq < delta {
            return Err(CrdtError::InvalidDelta(format!(
                "sequence {} for replica {} is below its delta {}",
                seq, replica_id, delta
            )));
        }
        Ok(Self {
            replica_id,
            delta,
            seq,
        })
    }

    /// Builds the delta for an increment the caller has just performed.
    /// `delta >= 1` and `seq >= delta` hold there by construction.
    pub(crate) fn from_increment(replica_id: ReplicaId, delta: u64, seq: u64) -> Self {
        debug_assert!(delta >= 1 && seq >= delta);
        Self {
            replica_id,
            delta,
            seq,
        }
    }

    pub fn replica_id(&self) -> &ReplicaId {
        &self.replica_id
    }

    pub fn delta(&self) -> u64 {
        self.delta
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The state-based equivalent of this operation: `{replica_id: seq}`.
    pub fn as_state(&self) -> ReplicaState {
        ReplicaState::singleton(self.replica_id.clone(), self.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(s: &str) -> ReplicaId {
        ReplicaId::new(s).unwrap()
    }

    #[test]
    fn test_rejects_zero_delta() {
        assert!(matches!(
            Delta::new(id("a"), 0, 3),
            Err(CrdtError::InvalidDelta(_))
        ));
    }

    #[test]
    fn test_rejects_sequence_below_delta() {
        assert!(Delta::new(id("a"), 5, 4).is_err());
        assert!(Delta::new(id("a"), 5, 5).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Delta =
            serde_json::from_value(json!({"replica_id": "a", "delta": 1, "seq": 2})).unwrap();
        assert_eq!(ok.replica_id().as_str(), "a");
        assert_eq!(ok.delta(), 1);
        assert_eq!(ok.seq(), 2);

        for bad in [
            json!({"replica_id": "a", "delta": 0, "seq": 2}),
            json!({"replica_id": "a", "delta": -1, "seq": 2}),
            json!({"replica_id": "", "delta": 1, "seq": 1}),
            json!({"replica_id": "a", "delta": 3, "seq": 1}),
            json!({"replica_id": "a", "delta": 1}),
        ] {
            assert!(serde_json::from_value::<Delta>(bad).is_err());
        }
    }

    #[test]
    fn test_as_state() {
        let d = Delta::new(id("a"), 2, 7).unwrap();
        assert_eq!(d.as_state(), ReplicaState::singleton(id("a"), 7));
    }
}
