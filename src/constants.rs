//! Protocol constants — wire-format lengths and frame tags.
//!
//! Every value here is fixed by the wire format. Changing any of them
//! breaks interoperability with every other participant on the topic.

/// Message frame tag (`m`).
pub const TAG_MESSAGE: u8 = b'm';

/// Introduction frame tag (`i`).
pub const TAG_INTRODUCTION: u8 = b'i';

/// Introduction-reply frame tag (`r`).
pub const TAG_REPLY: u8 = b'r';

/// Ed25519 signing key seed length in bytes.
pub const SEED_LENGTH: usize = 32;

/// Ed25519 public (verifying) key length in bytes.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Ed25519 detached signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// X25519 public key length in bytes (Curve25519).
pub const BOX_KEY_LENGTH: usize = 32;

/// Participant ID length in bytes (BLAKE2b-128 of the signing public key).
pub const PARTICIPANT_ID_LENGTH: usize = 16;

/// Topic key length in bytes (XSalsa20-Poly1305 key).
pub const TOPIC_KEY_LENGTH: usize = 32;

/// NaCl nonce length in bytes (both `box` and `secretbox`).
pub const NONCE_LENGTH: usize = 24;

/// NaCl authenticator overhead (Poly1305 MAC).
pub const BOX_OVERHEAD: usize = 16;

/// Smallest valid secretbox output: nonce plus the MAC of an empty payload.
pub const SECRETBOX_MIN_LENGTH: usize = NONCE_LENGTH + BOX_OVERHEAD;

/// Message frame overhead before the ciphertext: tag, signature, sender ID.
pub const MESSAGE_OVERHEAD: usize = 1 + SIGNATURE_LENGTH + PARTICIPANT_ID_LENGTH;

/// Smallest valid message frame (empty plaintext).
pub const MESSAGE_MIN_LENGTH: usize = MESSAGE_OVERHEAD + SECRETBOX_MIN_LENGTH;

/// Introduction frame length: tag, signing key, signature, ephemeral key.
pub const INTRODUCTION_LENGTH: usize =
    1 + SIGNING_KEY_LENGTH + SIGNATURE_LENGTH + BOX_KEY_LENGTH;

/// Encrypted topic key blob length: nonce plus boxed 32-byte key plus MAC.
pub const ENCRYPTED_TOPIC_KEY_LENGTH: usize = NONCE_LENGTH + TOPIC_KEY_LENGTH + BOX_OVERHEAD;

/// Reply frame length: tag, recipient ID, encrypted topic key, encryption
/// key, signing key.
pub const REPLY_LENGTH: usize = 1
    + PARTICIPANT_ID_LENGTH
    + ENCRYPTED_TOPIC_KEY_LENGTH
    + BOX_KEY_LENGTH
    + SIGNING_KEY_LENGTH;
