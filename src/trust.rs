//! Trust store — the local mapping from participant ID to verification key.
//!
//! Mutated only by the explicit add/remove operations; no cryptographic
//! work happens on insert. No ordering, no expiry, no revocation —
//! persistence is the caller's job, via [`TrustStore::iter`].

use std::collections::HashMap;

use crate::identity::{derive_id, ParticipantId};

/// Mapping from 16-byte participant ID to 32-byte Ed25519 public key.
#[derive(Clone, Debug, Default)]
pub struct TrustStore {
    participants: HashMap<ParticipantId, [u8; 32]>,
}

impl TrustStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust a participant by signing public key. Returns the derived ID.
    ///
    /// Idempotent: inserting a key twice is the same as inserting it once.
    pub fn insert(&mut self, signing_public: &[u8; 32]) -> ParticipantId {
        let id = derive_id(signing_public);
        self.participants.insert(id, *signing_public);
        id
    }

    /// Forget a participant. No-op when the ID is absent.
    pub fn remove(&mut self, id: &ParticipantId) {
        self.participants.remove(id);
    }

    /// The verification key for an ID, if trusted.
    pub fn lookup(&self, id: &ParticipantId) -> Option<&[u8; 32]> {
        self.participants.get(id)
    }

    /// Whether an ID is trusted.
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.contains_key(id)
    }

    /// Iterate over all trusted (ID, verification key) pairs, in no
    /// particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &[u8; 32])> {
        self.participants.iter()
    }

    /// Number of trusted participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
