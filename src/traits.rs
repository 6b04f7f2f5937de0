// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Error type for counter operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CrdtError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid replica id: {0}")]
    InvalidReplicaId(String),
    #[error("Invalid delta: {0}")]
    InvalidDelta(String),
    #[error("Count overflow: {0}")]
    Overflow(String),
}

/// Reader over an encoded CRDT state.
///
/// Readers borrow the encoded buffer and only decode on demand, so a merge
/// over many stored snapshots never holds more than one decoded copy per
/// source at a time.
pub trait CrdtReader<'a> {
    /// Returns true if the encoded CRDT is in its default (empty) state.
    fn is_empty(&self) -> Result<bool, CrdtError>;
}

/// Core CRDT trait for state-based Conflict-free Replicated Data Types.
///
/// # Requirements
///
/// Implementations must satisfy the following algebraic properties:
/// - **Commutativity**: `merge([A, B]) == merge([B, A])`
/// - **Associativity**: `merge([merge([A, B]), C]) == merge([A, merge([B, C])])`
/// - **Idempotence**: `merge([A, A]) == merge([A])`
pub trait Crdt: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Reader type associated with this CRDT.
    type Reader<'a>: CrdtReader<'a>
    where
        Self: 'a;

    /// Merges N encoded states into a single new CRDT instance.
    ///
    /// This is the mechanism behind both state synchronisation and compaction
    /// of stored snapshots.
    fn merge_from_readers(readers: &[Self::Reader<'_>]) -> Result<Self, CrdtError>
    where
        Self: Sized;

    /// Validates the internal consistency of the CRDT state.
    fn validate(&self) -> Result<(), CrdtError>;

    /// Returns true if the CRDT is in its default (empty) state.
    fn is_empty(&self) -> bool;

    /// Encodes the CRDT into its compact binary form.
    fn to_bytes(&self) -> Result<Vec<u8>, CrdtError>;
}
