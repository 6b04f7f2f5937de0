// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::config::{DeliveryMode, ReplicaConfig};
use crate::delta::Delta;
use crate::replica_id::ReplicaId;
use crate::replica_state::ReplicaState;
use crate::traits::CrdtError;
use tracing::{debug, trace};

/// What [`ReplicaCounter::apply`] did with a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The delta was folded into the local state.
    Applied,
    /// The delta was already reflected locally and changed nothing.
    Duplicate,
}

/// One replica of a grow-only counter.
///
/// The replica exclusively owns its [`ReplicaState`]. It increments its own
/// entry locally, folds deltas received from peers with [`apply`], and
/// reconciles full snapshots with [`merge_state`]. None of these contact
/// other replicas; moving deltas and states around is up to the caller.
///
/// Every mutating operation takes `&mut self`, so a replica has a single
/// writer. Share one across threads by moving it into an owning task or by
/// wrapping it in a mutex.
///
/// ```
/// use crdt_grow_counter::{merge, ReplicaCounter, ReplicaId};
///
/// let mut r1 = ReplicaCounter::new(ReplicaId::new("R1").unwrap());
/// let mut r2 = ReplicaCounter::new(ReplicaId::new("R2").unwrap());
///
/// let d1 = r1.increment();
/// let d2 = r1.increment();
/// let d3 = r2.increment();
///
/// r2.apply(&d1).unwrap();
/// r2.apply(&d2).unwrap();
/// r1.apply(&d3).unwrap();
///
/// let merged = merge(r1.state(), r2.state());
/// assert_eq!(merged.total(), 3);
/// assert_eq!(r1.value(), r2.value());
/// ```
///
/// [`apply`]: ReplicaCounter::apply
/// [`merge_state`]: ReplicaCounter::merge_state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaCounter {
    replica_id: ReplicaId,
    state: ReplicaState,
    config: ReplicaConfig,
}

impl ReplicaCounter {
    /// Creates a replica whose state is `{replica_id: 0}`.
    pub fn new(replica_id: ReplicaId) -> Self {
        Self::with_config(replica_id, ReplicaConfig::default())
    }

    pub fn with_config(replica_id: ReplicaId, config: ReplicaConfig) -> Self {
        let state = ReplicaState::singleton(replica_id.clone(), 0);
        Self {
            replica_id,
            state,
            config,
        }
    }

    /// Creates a replica that starts from a state synced from elsewhere.
    ///
    /// The replica's own entry is added at zero if `initial` lacks it.
    pub fn with_state(replica_id: ReplicaId, initial: ReplicaState, config: ReplicaConfig) -> Self {
        let mut state = initial;
        state.counters.entry(replica_id.clone()).or_insert(0);
        debug!(
            replica = %replica_id,
            known_replicas = state.len(),
            value = state.total(),
            "replica initialised from existing state"
        );
        Self {
            replica_id,
            state,
            config,
        }
    }

    /// Adds exactly one to this replica's entry and returns the delta to ship.
    ///
    /// # Panics
    /// Panics if the entry is already `u64::MAX`. Use
    /// [`increment_by(1)`](ReplicaCounter::increment_by) to get the overflow
    /// as an error instead.
    pub fn increment(&mut self) -> Delta {
        match self.increment_by(1) {
            Ok(delta) => delta,
            Err(e) => panic!("{}", e),
        }
    }

    /// Adds `amount` to this replica's entry and returns the delta to ship.
    ///
    /// # Errors
    /// [`CrdtError::InvalidDelta`] if `amount` is zero and
    /// [`CrdtError::Overflow`] if the entry would exceed `u64::MAX`. The state
    /// is left unchanged on error.
    pub fn increment_by(&mut self, amount: u64) -> Result<Delta, CrdtError> {
        if amount == 0 {
            return Err(CrdtError::InvalidDelta(format!(
                "increment for replica {} must be at least 1",
                self.replica_id
            )));
        }
        let replica_id = self.replica_id.clone();
        let count = self.own_entry();
        let seq = count.checked_add(amount).ok_or_else(|| {
            CrdtError::Overflow(format!("replica {} cannot grow by {}", replica_id, amount))
        })?;
        *count = seq;
        trace!(replica = %replica_id, amount, seq, "increment");
        Ok(Delta::from_increment(replica_id, amount, seq))
    }

    /// Folds a delta received from a peer into the local state.
    ///
    /// Under [`DeliveryMode::AtMostOnce`] the delta's amount is added to the
    /// origin's entry (created at zero when unknown), so handing the same
    /// delta over twice counts it twice. Under [`DeliveryMode::AtLeastOnce`]
    /// the origin's entry is raised to the delta's sequence number instead,
    /// and deltas that are already covered report
    /// [`ApplyOutcome::Duplicate`].
    ///
    /// # Errors
    /// [`CrdtError::Overflow`] if an additive apply would exceed `u64::MAX`.
    pub fn apply(&mut self, delta: &Delta) -> Result<ApplyOutcome, CrdtError> {
        let outcome = match self.config.delivery {
            DeliveryMode::AtMostOnce => {
                let current = self.state.get(delta.replica_id());
                let updated = current.checked_add(delta.delta()).ok_or_else(|| {
                    CrdtError::Overflow(format!(
                        "replica {} cannot grow by {}",
                        delta.replica_id(),
                        delta.delta()
                    ))
                })?;
                self.state
                    .counters
                    .insert(delta.replica_id().clone(), updated);
                ApplyOutcome::Applied
            }
            DeliveryMode::AtLeastOnce => {
                let current = self.state.get(delta.replica_id());
                if delta.seq() <= current {
                    trace!(
                        replica = %self.replica_id,
                        origin = %delta.replica_id(),
                        seq = delta.seq(),
                        known = current,
                        "ignoring already applied delta"
                    );
                    ApplyOutcome::Duplicate
                } else {
                    self.state
                        .counters
                        .insert(delta.replica_id().clone(), delta.seq());
                    ApplyOutcome::Applied
                }
            }
        };
        debug!(
            replica = %self.replica_id,
            origin = %delta.replica_id(),
            delta = delta.delta(),
            seq = delta.seq(),
            ?outcome,
            "applied delta"
        );
        Ok(outcome)
    }

    /// Replaces the local state with its merge against `other`.
    pub fn merge_state(&mut self, other: &ReplicaState) {
        self.state.merge_from(other);
        trace!(
            replica = %self.replica_id,
            known_replicas = self.state.len(),
            value = self.state.total(),
            "merged remote state"
        );
    }

    /// The counter total as currently known by this replica.
    pub fn value(&self) -> u64 {
        self.state.total()
    }

    pub fn replica_id(&self) -> &ReplicaId {
        &self.replica_id
    }

    pub fn state(&self) -> &ReplicaState {
        &self.state
    }

    pub fn config(&self) -> &ReplicaConfig {
        &self.config
    }

    pub fn into_state(self) -> ReplicaState {
        self.state
    }

    fn own_entry(&mut self) -> &mut u64 {
        self.state
            .counters
            .entry(self.replica_id.clone())
            .or_insert(0)
    }
}
