// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::replica_id::ReplicaId;
use crate::traits::{Crdt, CrdtError, CrdtReader};
use bincode::Options;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The replicated state of a grow-only counter.
///
/// Maps each replica that has ever been observed to the highest count
/// attributed to it. Replicas missing from the map count as zero. Counts are
/// unsigned, so the "never negative" invariant holds by construction.
///
/// An ordered map keeps equality, iteration and both encodings deterministic,
/// which is what the merge laws are checked against.
///
/// # Algebraic Properties
/// - **Commutativity**: `merge(A, B) == merge(B, A)`.
/// - **Associativity**: `merge(merge(A, B), C) == merge(A, merge(B, C))`.
/// - **Idempotence**: `merge(A, A) == A`.
/// - **Monotonicity**: merging never lowers any replica's entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ReplicaState {
    /// Map of replica_id -> highest observed count for that replica.
    #[serde(deserialize_with = "deserialize_counters")]
    pub counters: BTreeMap<ReplicaId, u64>,
}

/// Decodes the counter map, keeping the maximum when an id repeats in the
/// input, the same rule [`FromIterator`] applies.
fn deserialize_counters<'de, D>(deserializer: D) -> Result<BTreeMap<ReplicaId, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountersVisitor;

    impl<'de> Visitor<'de> for CountersVisitor {
        type Value = BTreeMap<ReplicaId, u64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of replica ids to counts")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut counters = BTreeMap::new();
            while let Some((replica_id, count)) = access.next_entry::<ReplicaId, u64>()? {
                let entry = counters.entry(replica_id).or_insert(0);
                *entry = (*entry).max(count);
            }
            Ok(counters)
        }
    }

    deserializer.deserialize_map(CountersVisitor)
}

/// Fixed-width integers, matching `bincode::serialize`, with trailing bytes
/// treated as corruption.
fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

impl ReplicaState {
    /// Creates a new, empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding exactly one entry.
    pub fn singleton(replica_id: ReplicaId, count: u64) -> Self {
        let mut counters = BTreeMap::new();
        counters.insert(replica_id, count);
        Self { counters }
    }

    /// Returns the count recorded for `replica_id`, zero when absent.
    pub fn get(&self, replica_id: &ReplicaId) -> u64 {
        self.counters.get(replica_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, replica_id: &ReplicaId) -> bool {
        self.counters.contains_key(replica_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReplicaId, u64)> {
        self.counters.iter().map(|(id, count)| (id, *count))
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Returns the logical counter total: the sum of every entry.
    ///
    /// Saturates at `u64::MAX` instead of wrapping.
    pub fn total(&self) -> u64 {
        self.counters
            .values()
            .fold(0u64, |acc, count| acc.saturating_add(*count))
    }

    /// Folds `other` into this state in place, keeping the per-replica maximum.
    pub fn merge_from(&mut self, other: &Self) {
        for (replica_id, &count) in &other.counters {
            let entry = self.counters.entry(replica_id.clone()).or_insert(0);
            *entry = (*entry).max(count);
        }
    }

    /// Returns true if every entry of `other` is at most the matching entry
    /// here, i.e. `other` carries no information this state lacks.
    pub fn dominates(&self, other: &Self) -> bool {
        other
            .counters
            .iter()
            .all(|(replica_id, &count)| self.get(replica_id) >= count)
    }

    /// Returns the entries where this state is strictly ahead of `other`.
    ///
    /// Merging the result into `other` gives the same state as merging all of
    /// `self` into it, so only the returned entries need to be shipped.
    pub fn delta_since(&self, other: &Self) -> Self {
        self.counters
            .iter()
            .filter(|&(replica_id, &count)| count > other.get(replica_id))
            .map(|(replica_id, &count)| (replica_id.clone(), count))
            .collect()
    }
}

impl FromIterator<(ReplicaId, u64)> for ReplicaState {
    /// Collects entries, keeping the maximum when an id repeats.
    fn from_iter<T: IntoIterator<Item = (ReplicaId, u64)>>(iter: T) -> Self {
        let mut state = Self::new();
        for (replica_id, count) in iter {
            let entry = state.counters.entry(replica_id).or_insert(0);
            *entry = (*entry).max(count);
        }
        state
    }
}

/// Merges two states into a new one without touching either input.
///
/// The result holds the union of both replica sets; each entry is the maximum
/// of the two sides, absent entries counting as zero.
pub fn merge(state_a: &ReplicaState, state_b: &ReplicaState) -> ReplicaState {
    let mut merged = state_a.clone();
    merged.merge_from(state_b);
    tracing::trace!(
        left = state_a.len(),
        right = state_b.len(),
        merged = merged.len(),
        "merged replica states"
    );
    merged
}

/// Merges any number of states. An empty input yields the empty state.
pub fn merge_all<'a, I>(states: I) -> ReplicaState
where
    I: IntoIterator<Item = &'a ReplicaState>,
{
    states
        .into_iter()
        .fold(ReplicaState::new(), |mut acc, state| {
            acc.merge_from(state);
            acc
        })
}

// ============================================================================
// Encoded Reader
// ============================================================================

pub struct ReplicaStateReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ReplicaStateReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn to_state(&self) -> Result<ReplicaState, CrdtError> {
        bincode_options()
            .deserialize(self.bytes)
            .map_err(|e| CrdtError::Deserialization(e.to_string()))
    }
}

impl<'a> CrdtReader<'a> for ReplicaStateReader<'a> {
    fn is_empty(&self) -> Result<bool, CrdtError> {
        Ok(self.to_state()?.counters.is_empty())
    }
}

// ============================================================================
// CRDT Trait Implementation
// ============================================================================

impl Crdt for ReplicaState {
    type Reader<'a> = ReplicaStateReader<'a>;

    fn merge_from_readers(readers: &[Self::Reader<'_>]) -> Result<Self, CrdtError> {
        let mut result = ReplicaState::new();
        for reader in readers {
            result.merge_from(&reader.to_state()?);
        }
        tracing::trace!(
            sources = readers.len(),
            replicas = result.len(),
            "merged encoded replica states"
        );
        Ok(result)
    }

    fn validate(&self) -> Result<(), CrdtError> {
        // Ids are validated on construction and counts are unsigned.
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    fn to_bytes(&self) -> Result<Vec<u8>, CrdtError> {
        bincode_options()
            .serialize(self)
            .map_err(|e| CrdtError::Serialization(e.to_string()))
    }
}
