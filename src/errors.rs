//! Error types for tincan-core.
//!
//! One flat enum covers the whole public surface. Errors propagate to the
//! caller unchanged: the core performs no retry, no logging, and no silent
//! recovery beyond the two documented soft-return paths (`decode` returning
//! `None` under `ignore_untrusted`, `parse_reply` returning `false`).
//!
//! `IntroductionReceived` and `ReplyReceived` are advisory, not fatal: they
//! tell the caller that a handshake frame reached `decode` and should be
//! routed to `construct_reply` / `parse_reply` instead.

/// Unified error type for all tincan-core operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TincanError {
    /// Frame too short, unknown tag, or wrong field lengths. Raised before
    /// any cryptographic work.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// An introduction frame reached `decode`. Route it to
    /// `construct_reply` if the sender should be given the topic key.
    #[error("the received message is an introduction")]
    IntroductionReceived,

    /// An introduction-reply frame reached `decode`. Route it to
    /// `parse_reply`.
    #[error("the received message is an introduction reply")]
    ReplyReceived,

    /// The sender's verification key is not in the trust store.
    #[error("verification key for participant not found")]
    UntrustedKey,

    /// A signature failed to verify against a key we trust or a key the
    /// frame itself binds.
    #[error("signature verification failed")]
    BadSignature,

    /// The operation requires the topic key and it is unset.
    #[error("topic key is unknown")]
    NoKey,

    /// Authenticated decryption failed (tampered, truncated, wrong key).
    #[error("authenticated decryption failed")]
    BadCiphertext,

    /// An introduction reply arrived but no introduction is pending.
    #[error("no introduction is pending")]
    NoPendingIntro,
}
