//! Participant identity — short stable IDs derived from signing keys.
//!
//! A participant ID is BLAKE2b-128 over the 32-byte Ed25519 public key:
//! 16 bytes on the wire instead of 32, collision-resistant within any
//! practical topic population, and a pure function of the key — the two are
//! never stored independently.

use blake2::digest::consts::U16;
use blake2::{Blake2b, Digest};

use crate::encoding::to_hex;

type Blake2b128 = Blake2b<U16>;

/// Stable 16-byte participant identifier.
///
/// Formats as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId([u8; 16]);

impl ParticipantId {
    /// Wrap raw ID bytes (e.g. read back from caller-side persistence).
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// The raw ID bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// The raw ID bytes, by value.
    pub fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", to_hex(&self.0))
    }
}

impl std::fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParticipantId({})", to_hex(&self.0))
    }
}

/// Derive the participant ID for a 32-byte Ed25519 public key.
pub fn derive_id(signing_public: &[u8; 32]) -> ParticipantId {
    let mut hasher = Blake2b128::new();
    hasher.update(signing_public);
    ParticipantId(hasher.finalize().into())
}
