//! Topic participant handle — the protocol state machine.
//!
//! A [`Topic`] owns one signing identity, an optional topic key, an optional
//! pending introduction, and the trust store. All operations are synchronous
//! pure functions of that state plus their arguments (plus CSPRNG draws for
//! nonces and ephemeral keys). A `Topic` is not thread-safe; concurrent use
//! requires external mutual exclusion.
//!
//! Nothing here touches a transport. Callers move opaque byte frames between
//! `Topic` instances over whatever one-to-many channel they have — an MQTT
//! topic, a broadcast socket, an IRC channel.

use ed25519_dalek::SigningKey;

use crate::constants::ENCRYPTED_TOPIC_KEY_LENGTH;
use crate::crypto::{self, BoxKeyPair};
use crate::errors::TincanError;
use crate::frame::{Frame, IntroductionFrame, MessageFrame, ReplyFrame};
use crate::identity::{derive_id, ParticipantId};
use crate::trust::TrustStore;

/// The 32-byte shared topic secret, zeroized on drop via volatile writes.
struct TopicKey([u8; 32]);

impl TopicKey {
    fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Drop for TopicKey {
    fn drop(&mut self) {
        for byte in self.0.iter_mut() {
            unsafe { std::ptr::write_volatile(byte as *mut u8, 0u8) };
        }
        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    }
}

/// Options for [`Topic::decode`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Skip trust lookup AND signature verification; decrypt only.
    /// Use at your own risk.
    pub naive: bool,
    /// Silently drop messages from unknown senders instead of failing with
    /// `UntrustedKey`. Signature failures from trusted senders still fail.
    pub ignore_untrusted: bool,
}

/// Sender identity extracted from a handshake frame.
///
/// Returned by [`discovery_info`] so a caller can decide whether to
/// [`Topic::add_participant`] the introducer or replier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscoveryInfo {
    /// The sender's derived participant ID.
    pub participant_id: ParticipantId,
    /// The sender's long-term Ed25519 public key.
    pub signing_key: [u8; 32],
}

/// Extract the sender's identity from an introduction or reply frame.
///
/// # Errors
/// Returns `TincanError::Malformed` for message frames and undecodable
/// input; neither carries a signing key in the clear.
pub fn discovery_info(frame: &[u8]) -> Result<DiscoveryInfo, TincanError> {
    match Frame::decode(frame)? {
        Frame::Introduction(intro) => Ok(DiscoveryInfo {
            participant_id: derive_id(&intro.signing_key),
            signing_key: intro.signing_key,
        }),
        Frame::Reply(reply) => Ok(DiscoveryInfo {
            participant_id: derive_id(&reply.signing_key),
            signing_key: reply.signing_key,
        }),
        Frame::Message(_) => Err(TincanError::Malformed(
            "message frames carry no discovery info".into(),
        )),
    }
}

/// A participant in one topic.
///
/// Holds the signing identity (from a 32-byte seed), the topic key once
/// known, at most one pending introduction, and the set of trusted
/// verification keys. Key material lives only inside the handle and is
/// zeroized on drop; persisting seeds or trust sets is the caller's job.
pub struct Topic {
    signing_key: SigningKey,
    topic_key: Option<TopicKey>,
    pending_intro: Option<BoxKeyPair>,
    trust: TrustStore,
}

impl Topic {
    /// Create a participant from a signing key seed.
    ///
    /// With `topic_key: None` the participant starts discovery-eligible:
    /// `encode` and `construct_reply` fail with `NoKey` until a reply has
    /// been parsed.
    pub fn new(seed: [u8; 32], topic_key: Option<[u8; 32]>) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
            topic_key: topic_key.map(TopicKey),
            pending_intro: None,
            trust: TrustStore::new(),
        }
    }

    /// Create a participant with a freshly generated random identity.
    pub fn generate(topic_key: Option<[u8; 32]>) -> Self {
        Self::new(crypto::generate_signing_key_seed(), topic_key)
    }

    /// The participant's long-term Ed25519 public key.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The participant's 16-byte ID, derived from the public key.
    pub fn id(&self) -> ParticipantId {
        derive_id(&self.public_key())
    }

    /// Whether the topic key is known.
    pub fn has_topic_key(&self) -> bool {
        self.topic_key.is_some()
    }

    /// Trust a participant's signing public key. Returns the derived ID.
    ///
    /// Idempotent. Adding the own public key is a silent no-op: the trust
    /// store never holds the owner's ID, and `decode` verifies
    /// self-addressed frames against the owned key directly.
    pub fn add_participant(&mut self, signing_public: &[u8; 32]) -> ParticipantId {
        if *signing_public == self.public_key() {
            return self.id();
        }
        self.trust.insert(signing_public)
    }

    /// Forget a trusted participant. No-op when the ID is absent.
    pub fn remove_participant(&mut self, id: &ParticipantId) {
        self.trust.remove(id);
    }

    /// Iterate over all trusted (ID, verification key) pairs so callers can
    /// persist and restore the trust set.
    pub fn participants(&self) -> impl Iterator<Item = (&ParticipantId, &[u8; 32])> {
        self.trust.iter()
    }

    /// Encrypt and sign a plaintext for broadcast.
    ///
    /// # Errors
    /// Returns `TincanError::NoKey` when the topic key is unknown.
    pub fn encode(&self, plaintext: &[u8]) -> Result<Vec<u8>, TincanError> {
        let key = self.topic_key.as_ref().ok_or(TincanError::NoKey)?;

        let ciphertext = crypto::seal_secretbox(key.as_bytes(), plaintext);
        let mut frame = MessageFrame {
            signature: [0u8; 64],
            sender_id: self.id(),
            ciphertext,
        };
        frame.signature = crypto::sign(&self.signing_key, &frame.signed_body());
        Ok(frame.encode())
    }

    /// Authenticate and decrypt a received frame.
    ///
    /// Returns `Ok(Some(plaintext))` for an accepted message and `Ok(None)`
    /// only when `ignore_untrusted` drops an unknown sender.
    ///
    /// # Errors
    /// - `IntroductionReceived` / `ReplyReceived` — a handshake frame landed
    ///   here; route it to [`Topic::construct_reply`] / [`Topic::parse_reply`].
    /// - `Malformed` — not a decodable frame.
    /// - `UntrustedKey` — unknown sender and `ignore_untrusted` is off.
    /// - `BadSignature` — the sender is trusted (or is us) but the signature
    ///   does not verify. Raised even under `ignore_untrusted`: a trusted ID
    ///   with a bad signature is an attack, not an unknown identity.
    /// - `NoKey` — the topic key is unknown.
    /// - `BadCiphertext` — authenticated decryption failed.
    pub fn decode(
        &self,
        frame: &[u8],
        options: DecodeOptions,
    ) -> Result<Option<Vec<u8>>, TincanError> {
        let message = match Frame::decode(frame)? {
            Frame::Introduction(_) => return Err(TincanError::IntroductionReceived),
            Frame::Reply(_) => return Err(TincanError::ReplyReceived),
            Frame::Message(message) => message,
        };

        if !options.naive {
            let verification_key = if message.sender_id == self.id() {
                self.public_key()
            } else {
                match self.trust.lookup(&message.sender_id) {
                    Some(key) => *key,
                    None if options.ignore_untrusted => return Ok(None),
                    None => return Err(TincanError::UntrustedKey),
                }
            };
            if !crypto::verify(&verification_key, &message.signed_body(), &message.signature) {
                return Err(TincanError::BadSignature);
            }
        }

        let key = self.topic_key.as_ref().ok_or(TincanError::NoKey)?;
        let plaintext = crypto::open_secretbox(key.as_bytes(), &message.ciphertext)?;
        Ok(Some(plaintext))
    }

    /// Broadcast-introduce this participant to the topic.
    ///
    /// Generates a fresh ephemeral X25519 keypair, signs its public half
    /// with the long-term identity, and retains the secret half until a
    /// matching reply arrives. Only one introduction is pending at a time;
    /// calling this again invalidates the previous one.
    pub fn construct_introduction(&mut self) -> Vec<u8> {
        let ephemeral = crypto::generate_box_keypair();
        let frame = IntroductionFrame {
            signing_key: self.public_key(),
            signature: crypto::sign(&self.signing_key, &ephemeral.public_key),
            ephemeral_key: ephemeral.public_key,
        };
        self.pending_intro = Some(ephemeral);
        frame.encode()
    }

    /// Answer an introduction with the topic key.
    ///
    /// This hands the introducer FULL access to the topic: the key is boxed
    /// to the intro's ephemeral key, readable by whoever holds the matching
    /// secret. The intro's signature over its ephemeral key is verified
    /// first — the only barrier against an attacker substituting their own
    /// ephemeral to harvest the key — and it is mandatory even though the
    /// verifying key comes from the intro itself: the check binds ephemeral
    /// to long-term identity, not identity to the world.
    ///
    /// # Errors
    /// - `NoKey` — we do not hold the topic key ourselves.
    /// - `Malformed` — not an introduction frame.
    /// - `BadSignature` — the ephemeral key is not bound to the signing key.
    pub fn construct_reply(&self, intro_frame: &[u8]) -> Result<Vec<u8>, TincanError> {
        let key = self.topic_key.as_ref().ok_or(TincanError::NoKey)?;

        let Frame::Introduction(intro) = Frame::decode(intro_frame)? else {
            return Err(TincanError::Malformed("expected an introduction frame".into()));
        };
        if !crypto::verify(&intro.signing_key, &intro.ephemeral_key, &intro.signature) {
            return Err(TincanError::BadSignature);
        }

        let box_secret = crypto::box_secret_from_signing(&self.signing_key);
        let sealed = crypto::seal_box(key.as_bytes(), &intro.ephemeral_key, &box_secret);
        let mut encrypted_topic_key = [0u8; ENCRYPTED_TOPIC_KEY_LENGTH];
        encrypted_topic_key.copy_from_slice(&sealed);

        let frame = ReplyFrame {
            recipient_id: derive_id(&intro.signing_key),
            encrypted_topic_key,
            encryption_key: crypto::box_public_from_secret(&box_secret),
            signing_key: self.public_key(),
        };
        Ok(frame.encode())
    }

    /// Consume a reply to our introduction, learning the topic key.
    ///
    /// Returns `true` when the topic key was installed, `false` when the
    /// reply changed nothing: the key was already set (it is frozen for the
    /// participant's lifetime) or the reply targets a different newcomer.
    ///
    /// The replier is deliberately NOT auto-trusted; callers decide via
    /// [`discovery_info`] and [`Topic::add_participant`].
    ///
    /// # Errors
    /// - `Malformed` — not a reply frame.
    /// - `NoPendingIntro` — no introduction of ours is outstanding.
    /// - `BadSignature` — the reply's encryption key is not the one derived
    ///   from its signing key; a replier cannot lie about the key that
    ///   sealed the box.
    /// - `BadCiphertext` — the box does not open with our pending ephemeral.
    pub fn parse_reply(&mut self, reply_frame: &[u8]) -> Result<bool, TincanError> {
        let Frame::Reply(reply) = Frame::decode(reply_frame)? else {
            return Err(TincanError::Malformed("expected a reply frame".into()));
        };

        if self.topic_key.is_some() {
            return Ok(false);
        }
        let pending = self
            .pending_intro
            .as_ref()
            .ok_or(TincanError::NoPendingIntro)?;
        if reply.recipient_id != self.id() {
            return Ok(false);
        }

        let derived = crypto::box_public_from_signing(&reply.signing_key)
            .ok_or(TincanError::BadSignature)?;
        if derived != reply.encryption_key {
            return Err(TincanError::BadSignature);
        }

        let plaintext = crypto::open_box(
            &reply.encrypted_topic_key,
            &reply.encryption_key,
            &pending.secret_key,
        )?;
        let topic_key: [u8; 32] = plaintext
            .try_into()
            .map_err(|_| TincanError::BadCiphertext)?;

        self.topic_key = Some(TopicKey(topic_key));
        self.pending_intro = None;
        Ok(true)
    }
}
