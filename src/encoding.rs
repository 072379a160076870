//! Hex encoding helpers.
//!
//! The wire format is raw binary; hex only appears at the edges — participant
//! IDs in `Display`/`Debug` output and key material in test fixtures.

use crate::errors::TincanError;

/// Encode bytes to a lowercase hex string.
pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string to bytes.
///
/// # Errors
/// Returns `TincanError::Malformed` on odd-length or non-hex input.
pub fn from_hex(encoded: &str) -> Result<Vec<u8>, TincanError> {
    if encoded.len() % 2 != 0 {
        return Err(TincanError::Malformed("odd-length hex string".into()));
    }
    (0..encoded.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&encoded[i..i + 2], 16)
                .map_err(|e| TincanError::Malformed(format!("invalid hex: {e}")))
        })
        .collect()
}
