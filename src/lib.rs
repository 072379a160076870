//! tincan-core — end-to-end secure messaging over untrusted broadcast
//! transports.
//!
//! A *topic* is any one-to-many channel (an MQTT topic, an IRC room, a
//! broadcast socket). Every participant holds a persistent Ed25519 signing
//! identity; all participants of a topic share one symmetric *topic key*.
//! This crate is the cryptographic core only: it encrypts and authenticates
//! outbound payloads, authenticates and decrypts inbound ones, runs the
//! two-message discovery handshake that hands the topic key to a newcomer,
//! and maintains the local trust set. Moving frames is the caller's job.
//!
//! ```
//! use tincan_core::{DecodeOptions, Topic};
//!
//! let topic_key = tincan_core::generate_topic_key();
//! let alice = Topic::generate(Some(topic_key));
//! let mut bob = Topic::generate(Some(topic_key));
//!
//! // Bob trusts Alice's signing key (obtained out of band or via the
//! // discovery handshake).
//! bob.add_participant(&alice.public_key());
//!
//! let frame = alice.encode(b"Hi Bob!").unwrap();
//! let plaintext = bob.decode(&frame, DecodeOptions::default()).unwrap();
//! assert_eq!(plaintext.as_deref(), Some(&b"Hi Bob!"[..]));
//! ```
//!
//! # Scope
//!
//! Deliberately out of scope: replay protection (duplicate frames decode
//! identically — embed sequence numbers in plaintext if freshness matters),
//! forward secrecy, group-key rotation or revocation, rate limiting, and
//! persistence (seeds and trust sets are the caller's to store).
//!
//! # Thread safety
//!
//! [`Topic`] is synchronous and single-threaded by contract; wrap it in a
//! mutex to share it across threads.

pub mod constants;
pub mod crypto;
pub mod encoding;
pub mod errors;
pub mod frame;
pub mod identity;
pub mod topic;
pub mod trust;

pub use crypto::{generate_signing_key_seed, generate_topic_key};
pub use errors::TincanError;
pub use identity::{derive_id, ParticipantId};
pub use topic::{discovery_info, DecodeOptions, DiscoveryInfo, Topic};
