//! Conformance: error surface stability.
//!
//! Callers match on `TincanError` variants and surface display strings in
//! diagnostics; both are protocol surface and must not drift.

use tincan_core::TincanError;

/// Every variant produces its documented display format.
#[test]
fn conformance_error_display_format_stable() {
    let cases: Vec<(TincanError, &str)> = vec![
        (
            TincanError::Malformed("frame too short".into()),
            "malformed input: frame too short",
        ),
        (
            TincanError::IntroductionReceived,
            "the received message is an introduction",
        ),
        (
            TincanError::ReplyReceived,
            "the received message is an introduction reply",
        ),
        (
            TincanError::UntrustedKey,
            "verification key for participant not found",
        ),
        (TincanError::BadSignature, "signature verification failed"),
        (TincanError::NoKey, "topic key is unknown"),
        (TincanError::BadCiphertext, "authenticated decryption failed"),
        (TincanError::NoPendingIntro, "no introduction is pending"),
    ];

    for (error, expected) in &cases {
        assert_eq!(
            error.to_string(),
            *expected,
            "TincanError display drift detected"
        );
    }
}

/// TincanError MUST implement Send + Sync for safe cross-thread use.
#[test]
fn conformance_error_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TincanError>();
}

/// TincanError MUST implement std::error::Error.
#[test]
fn conformance_error_is_std_error() {
    let err = TincanError::BadCiphertext;
    let _: &dyn std::error::Error = &err;
}

/// Variants MUST be distinguishable by equality for caller-side routing.
#[test]
fn conformance_error_variants_distinct() {
    let variants = [
        TincanError::IntroductionReceived,
        TincanError::ReplyReceived,
        TincanError::UntrustedKey,
        TincanError::BadSignature,
        TincanError::NoKey,
        TincanError::BadCiphertext,
        TincanError::NoPendingIntro,
    ];
    for (i, a) in variants.iter().enumerate() {
        for (j, b) in variants.iter().enumerate() {
            assert_eq!(i == j, a == b, "variant equality mismatch: {a:?} vs {b:?}");
        }
    }
}
