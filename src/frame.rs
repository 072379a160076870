//! Frame codec — bit-exact encoding of the three wire frames.
//!
//! Frames are length-delimited by the transport; the codec adds no length
//! prefix of its own. Every frame starts with a one-byte ASCII tag:
//!
//! ```text
//! m ∥ signature(64) ∥ sender_id(16) ∥ ciphertext(≥40)                  81+payload
//! i ∥ signing_key(32) ∥ signature(64) ∥ ephemeral_key(32)              129
//! r ∥ recipient_id(16) ∥ encrypted_topic_key(72) ∥ encryption_key(32)
//!   ∥ signing_key(32)                                                  153
//! ```
//!
//! Decoding validates tag and lengths before any cryptographic work; a bad
//! frame never reaches a key.

use crate::constants::{
    ENCRYPTED_TOPIC_KEY_LENGTH, INTRODUCTION_LENGTH, MESSAGE_MIN_LENGTH, REPLY_LENGTH,
    TAG_INTRODUCTION, TAG_MESSAGE, TAG_REPLY,
};
use crate::errors::TincanError;
use crate::identity::ParticipantId;

/// A signed, topic-encrypted broadcast message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageFrame {
    /// Signature over `sender_id ∥ ciphertext`.
    pub signature: [u8; 64],
    /// ID of the signing participant.
    pub sender_id: ParticipantId,
    /// Secretbox output: `nonce(24) ∥ ciphertext ∥ tag(16)`.
    pub ciphertext: Vec<u8>,
}

impl MessageFrame {
    /// The bytes the signature covers: everything after it, in frame order.
    pub fn signed_body(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(16 + self.ciphertext.len());
        body.extend_from_slice(self.sender_id.as_bytes());
        body.extend_from_slice(&self.ciphertext);
        body
    }

    /// Serialize to wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(1 + 64 + 16 + self.ciphertext.len());
        frame.push(TAG_MESSAGE);
        frame.extend_from_slice(&self.signature);
        frame.extend_from_slice(self.sender_id.as_bytes());
        frame.extend_from_slice(&self.ciphertext);
        frame
    }
}

/// A newcomer's request for the topic key.
///
/// The signature covers exactly the 32 ephemeral key bytes, binding the
/// ephemeral encryption key to the long-term signing identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntroductionFrame {
    /// The introducer's long-term Ed25519 public key.
    pub signing_key: [u8; 32],
    /// Signature over `ephemeral_key`.
    pub signature: [u8; 64],
    /// The introducer's fresh X25519 public key.
    pub ephemeral_key: [u8; 32],
}

impl IntroductionFrame {
    /// Serialize to wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(INTRODUCTION_LENGTH);
        frame.push(TAG_INTRODUCTION);
        frame.extend_from_slice(&self.signing_key);
        frame.extend_from_slice(&self.signature);
        frame.extend_from_slice(&self.ephemeral_key);
        frame
    }
}

/// An existing member's answer to an introduction, carrying the topic key
/// boxed to the introducer's ephemeral key.
///
/// There is no top-level signature; authenticity comes from the box's
/// authenticator, keyed by the replier's long-term identity. The
/// `encryption_key` field is derivable from `signing_key` and therefore
/// redundant on the wire, but the format retains it and decoders verify
/// the two are consistent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyFrame {
    /// ID of the introducer this reply is addressed to.
    pub recipient_id: ParticipantId,
    /// Box output: `nonce(24) ∥ boxed 32-byte topic key ∥ tag(16)`.
    pub encrypted_topic_key: [u8; ENCRYPTED_TOPIC_KEY_LENGTH],
    /// The replier's X25519 public key (derived from `signing_key`).
    pub encryption_key: [u8; 32],
    /// The replier's long-term Ed25519 public key.
    pub signing_key: [u8; 32],
}

impl ReplyFrame {
    /// Serialize to wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(REPLY_LENGTH);
        frame.push(TAG_REPLY);
        frame.extend_from_slice(self.recipient_id.as_bytes());
        frame.extend_from_slice(&self.encrypted_topic_key);
        frame.extend_from_slice(&self.encryption_key);
        frame.extend_from_slice(&self.signing_key);
        frame
    }
}

/// A decoded wire frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Message(MessageFrame),
    Introduction(IntroductionFrame),
    Reply(ReplyFrame),
}

impl Frame {
    /// Serialize to wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Frame::Message(m) => m.encode(),
            Frame::Introduction(i) => i.encode(),
            Frame::Reply(r) => r.encode(),
        }
    }

    /// Parse wire bytes into a typed frame.
    ///
    /// # Errors
    /// Returns `TincanError::Malformed` for an empty frame, an unknown tag,
    /// or a length that does not match the tagged layout.
    pub fn decode(bytes: &[u8]) -> Result<Frame, TincanError> {
        let (&tag, rest) = bytes
            .split_first()
            .ok_or_else(|| TincanError::Malformed("empty frame".into()))?;

        match tag {
            TAG_MESSAGE => {
                if bytes.len() < MESSAGE_MIN_LENGTH {
                    return Err(TincanError::Malformed(format!(
                        "message frame too short: {} bytes, need at least {}",
                        bytes.len(),
                        MESSAGE_MIN_LENGTH
                    )));
                }
                let mut signature = [0u8; 64];
                signature.copy_from_slice(&rest[..64]);
                let mut sender_id = [0u8; 16];
                sender_id.copy_from_slice(&rest[64..80]);
                Ok(Frame::Message(MessageFrame {
                    signature,
                    sender_id: ParticipantId::from_bytes(sender_id),
                    ciphertext: rest[80..].to_vec(),
                }))
            }
            TAG_INTRODUCTION => {
                if bytes.len() != INTRODUCTION_LENGTH {
                    return Err(TincanError::Malformed(format!(
                        "introduction frame must be {} bytes, got {}",
                        INTRODUCTION_LENGTH,
                        bytes.len()
                    )));
                }
                let mut signing_key = [0u8; 32];
                signing_key.copy_from_slice(&rest[..32]);
                let mut signature = [0u8; 64];
                signature.copy_from_slice(&rest[32..96]);
                let mut ephemeral_key = [0u8; 32];
                ephemeral_key.copy_from_slice(&rest[96..128]);
                Ok(Frame::Introduction(IntroductionFrame {
                    signing_key,
                    signature,
                    ephemeral_key,
                }))
            }
            TAG_REPLY => {
                if bytes.len() != REPLY_LENGTH {
                    return Err(TincanError::Malformed(format!(
                        "reply frame must be {} bytes, got {}",
                        REPLY_LENGTH,
                        bytes.len()
                    )));
                }
                let mut recipient_id = [0u8; 16];
                recipient_id.copy_from_slice(&rest[..16]);
                let mut encrypted_topic_key = [0u8; ENCRYPTED_TOPIC_KEY_LENGTH];
                encrypted_topic_key.copy_from_slice(&rest[16..88]);
                let mut encryption_key = [0u8; 32];
                encryption_key.copy_from_slice(&rest[88..120]);
                let mut signing_key = [0u8; 32];
                signing_key.copy_from_slice(&rest[120..152]);
                Ok(Frame::Reply(ReplyFrame {
                    recipient_id: ParticipantId::from_bytes(recipient_id),
                    encrypted_topic_key,
                    encryption_key,
                    signing_key,
                }))
            }
            other => Err(TincanError::Malformed(format!(
                "unknown frame tag: {:#04x}",
                other
            ))),
        }
    }
}
