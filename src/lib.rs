// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! # crdt-grow-counter
//!
//! A state-based grow-only counter (G-Counter) CRDT.
//!
//! Independent replicas increment their own slot without coordination and
//! reconcile by merging states: per replica, the larger count wins. The merge
//! is commutative, associative and idempotent, so replicas converge no matter
//! how often or in what order states are exchanged.
//!
//! ```
//! use crdt_grow_counter::{merge, ReplicaId, ReplicaState};
//!
//! let a: ReplicaState = [(ReplicaId::new("A").unwrap(), 5)].into_iter().collect();
//! let b: ReplicaState = [(ReplicaId::new("B").unwrap(), 3)].into_iter().collect();
//!
//! assert_eq!(merge(&a, &b).total(), 8);
//! ```

pub mod bridge;
pub mod compaction;
pub mod config;
pub mod counter;
pub mod delta;
pub mod replica_id;
pub mod replica_state;
pub mod traits;

// Re-export core traits
pub use traits::{Crdt, CrdtError, CrdtReader};

pub use bridge::SerdeBytesBridge;
pub use config::{DeliveryMode, ReplicaConfig};
pub use counter::{ApplyOutcome, ReplicaCounter};
pub use delta::Delta;
pub use replica_id::ReplicaId;
pub use replica_state::{merge, merge_all, ReplicaState, ReplicaStateReader};
