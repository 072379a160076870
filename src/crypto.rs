//! Crypto primitives — Ed25519 signing, NaCl box and secretbox.
//!
//! Wire conventions follow NaCl exactly: every sealed output is
//! `nonce(24) ∥ ciphertext ∥ tag(16)`, with a fresh nonce drawn from the OS
//! CSPRNG per call. The asymmetric box runs between an X25519 keypair and
//! the Curve25519 point birationally derived from a peer's Ed25519 key, so
//! a participant's single signing identity covers both concerns.
//!
//! Random bytes are consumed at exactly four sites: seed generation, topic
//! key generation, ephemeral keypair generation, and the nonce draw inside
//! each seal call.

use crypto_box::{aead::Aead, SalsaBox};
use crypto_secretbox::{aead::KeyInit, XSalsa20Poly1305};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand_core::{OsRng, RngCore};

use crate::constants::{NONCE_LENGTH, SECRETBOX_MIN_LENGTH, SEED_LENGTH, TOPIC_KEY_LENGTH};
use crate::errors::TincanError;

/// X25519 keypair for the discovery handshake.
///
/// 32-byte public key (Curve25519 point) and 32-byte secret key.
/// The secret key is zeroized on drop via volatile writes.
#[derive(Clone)]
pub struct BoxKeyPair {
    /// Curve25519 public key (32 bytes).
    pub public_key: [u8; 32],
    /// Curve25519 secret key (32 bytes).
    pub secret_key: [u8; 32],
}

impl Drop for BoxKeyPair {
    fn drop(&mut self) {
        // Volatile writes prevent the compiler from optimizing away the
        // zeroization.
        for byte in self.secret_key.iter_mut() {
            unsafe { std::ptr::write_volatile(byte as *mut u8, 0u8) };
        }
        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    }
}

/// Generate a fresh ephemeral X25519 keypair from the OS CSPRNG.
///
/// One is created per introduction and discarded once the matching reply
/// has been consumed.
pub fn generate_box_keypair() -> BoxKeyPair {
    let mut secret_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut secret_bytes);
    let sk = crypto_box::SecretKey::from(secret_bytes);
    let pk = sk.public_key();
    BoxKeyPair {
        public_key: *pk.as_bytes(),
        secret_key: secret_bytes,
    }
}

/// Generate a fresh 32-byte Ed25519 signing key seed.
///
/// The seed IS the secret identity; callers persist it if the identity
/// should survive the process.
pub fn generate_signing_key_seed() -> [u8; SEED_LENGTH] {
    let mut seed = [0u8; SEED_LENGTH];
    OsRng.fill_bytes(&mut seed);
    seed
}

/// Generate a fresh 32-byte topic key.
pub fn generate_topic_key() -> [u8; TOPIC_KEY_LENGTH] {
    let mut key = [0u8; TOPIC_KEY_LENGTH];
    OsRng.fill_bytes(&mut key);
    key
}

/// Sign a message, returning the 64-byte detached signature.
pub fn sign(signing_key: &SigningKey, message: &[u8]) -> [u8; 64] {
    signing_key.sign(message).to_bytes()
}

/// Verify a detached signature against a 32-byte Ed25519 public key.
///
/// Returns `false` for invalid key bytes as well as for signatures that do
/// not verify. The comparison is constant-time with respect to the
/// signature.
pub fn verify(signing_public: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(signing_public) else {
        return false;
    };
    let sig = Signature::from_bytes(signature);
    key.verify(message, &sig).is_ok()
}

/// X25519 secret scalar corresponding to an Ed25519 signing key.
///
/// Standard birational map: the clamped scalar half of SHA-512(seed), the
/// same conversion libsodium's `crypto_sign_ed25519_sk_to_curve25519`
/// performs.
pub fn box_secret_from_signing(signing_key: &SigningKey) -> [u8; 32] {
    signing_key.to_scalar_bytes()
}

/// X25519 public key corresponding to an Ed25519 public key.
///
/// Returns `None` when the bytes are not a valid Ed25519 point.
pub fn box_public_from_signing(signing_public: &[u8; 32]) -> Option<[u8; 32]> {
    let key = VerifyingKey::from_bytes(signing_public).ok()?;
    Some(key.to_montgomery().to_bytes())
}

/// X25519 public key for a 32-byte secret scalar.
pub fn box_public_from_secret(box_secret: &[u8; 32]) -> [u8; 32] {
    *crypto_box::SecretKey::from(*box_secret).public_key().as_bytes()
}

/// Seal plaintext with NaCl box (X25519 + XSalsa20-Poly1305).
///
/// Output: `nonce(24) ∥ ciphertext ∥ tag(16)`, nonce drawn internally.
pub fn seal_box(
    plaintext: &[u8],
    recipient_public: &[u8; 32],
    sender_secret: &[u8; 32],
) -> Vec<u8> {
    let pk = crypto_box::PublicKey::from(*recipient_public);
    let sk = crypto_box::SecretKey::from(*sender_secret);
    let salsa_box = SalsaBox::new(&pk, &sk);

    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = crypto_box::Nonce::from_slice(&nonce_bytes);

    let Ok(ciphertext) = salsa_box.encrypt(nonce, plaintext) else {
        unreachable!("XSalsa20-Poly1305 encryption cannot fail with valid inputs");
    };

    let mut sealed = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    sealed
}

/// Open a NaCl box sealed by [`seal_box`].
///
/// # Errors
/// Returns `TincanError::BadCiphertext` on tampered, truncated, or
/// wrong-key input. No partial plaintext is ever exposed.
pub fn open_box(
    sealed: &[u8],
    sender_public: &[u8; 32],
    recipient_secret: &[u8; 32],
) -> Result<Vec<u8>, TincanError> {
    if sealed.len() < SECRETBOX_MIN_LENGTH {
        return Err(TincanError::BadCiphertext);
    }

    let nonce = crypto_box::Nonce::from_slice(&sealed[..NONCE_LENGTH]);
    let ciphertext = &sealed[NONCE_LENGTH..];

    let pk = crypto_box::PublicKey::from(*sender_public);
    let sk = crypto_box::SecretKey::from(*recipient_secret);
    let salsa_box = SalsaBox::new(&pk, &sk);

    salsa_box
        .decrypt(nonce, ciphertext)
        .map_err(|_| TincanError::BadCiphertext)
}

/// Seal plaintext with NaCl secretbox (XSalsa20-Poly1305) under the topic
/// key.
///
/// Output: `nonce(24) ∥ ciphertext ∥ tag(16)`, nonce drawn internally.
pub fn seal_secretbox(key: &[u8; TOPIC_KEY_LENGTH], plaintext: &[u8]) -> Vec<u8> {
    let cipher = XSalsa20Poly1305::new(key.into());

    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = crypto_secretbox::Nonce::from_slice(&nonce_bytes);

    let Ok(ciphertext) = cipher.encrypt(nonce, plaintext) else {
        unreachable!("XSalsa20-Poly1305 encryption cannot fail with valid inputs");
    };

    let mut sealed = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    sealed
}

/// Open a NaCl secretbox sealed by [`seal_secretbox`].
///
/// # Errors
/// Returns `TincanError::BadCiphertext` on tampered, truncated, or
/// wrong-key input.
pub fn open_secretbox(
    key: &[u8; TOPIC_KEY_LENGTH],
    sealed: &[u8],
) -> Result<Vec<u8>, TincanError> {
    if sealed.len() < SECRETBOX_MIN_LENGTH {
        return Err(TincanError::BadCiphertext);
    }

    let cipher = XSalsa20Poly1305::new(key.into());
    let nonce = crypto_secretbox::Nonce::from_slice(&sealed[..NONCE_LENGTH]);

    cipher
        .decrypt(nonce, &sealed[NONCE_LENGTH..])
        .map_err(|_| TincanError::BadCiphertext)
}
