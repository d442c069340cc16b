//! # Fingerprint Module
//!
//! The 64-bit perceptual fingerprint and its Hamming distance.
//!
//! A fingerprint is exactly 64 bits encoded as a 16-character lowercase hex
//! string, most-significant bit first, in row-major raster order. Equality is
//! bitwise. Fingerprints produced by different algorithms are never compared
//! to each other; a scan uses one algorithm throughout.

use crate::error::FingerprintError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bits in a fingerprint
pub const FINGERPRINT_BITS: usize = 64;

/// Number of hex characters in the encoded form
pub const FINGERPRINT_HEX_LEN: usize = FINGERPRINT_BITS / 4;

/// A 64-bit perceptual fingerprint, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Pack 64 bits, most-significant-first, into 16 lowercase hex digits.
    ///
    /// # Panics
    /// Panics if the iterator does not yield exactly 64 bits; the hashers
    /// always produce full rasters, so anything else is a programming error.
    pub fn pack_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        const DIGITS: [char; 16] = [
            '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
        ];

        let mut hex = String::with_capacity(FINGERPRINT_HEX_LEN);
        let mut nibble: u8 = 0;
        let mut bit_count = 0usize;

        for bit in bits {
            nibble = (nibble << 1) | u8::from(bit);
            bit_count += 1;
            if bit_count % 4 == 0 {
                hex.push(DIGITS[nibble as usize]);
                nibble = 0;
            }
        }

        assert_eq!(
            bit_count, FINGERPRINT_BITS,
            "fingerprint requires exactly {} bits",
            FINGERPRINT_BITS
        );

        Fingerprint(hex)
    }

    /// Wrap an externally supplied hex string.
    ///
    /// No validation happens here; characters are checked when the
    /// fingerprint is compared, where a bad digit raises
    /// [`FingerprintError::MalformedCharacter`].
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Fingerprint(hex.into())
    }

    /// The hex-encoded form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decode one hex character to its 4-bit value.
///
/// Rejects anything outside `0-9a-fA-F` instead of defaulting to zero.
fn hex_nibble(c: char, position: usize) -> Result<u8, FingerprintError> {
    if c >= '0' && c <= '9' {
        Ok(c as u8 - b'0')
    } else if c >= 'a' && c <= 'f' {
        Ok(c as u8 - b'a' + 10)
    } else if c >= 'A' && c <= 'F' {
        Ok(c as u8 - b'A' + 10)
    } else {
        Err(FingerprintError::MalformedCharacter {
            character: c,
            position,
        })
    }
}

/// Hamming distance between two fingerprints.
///
/// XORs corresponding nibbles and counts set bits. The result is in
/// `0..=64` for 64-bit fingerprints.
///
/// # Panics
/// Panics if the fingerprints have different lengths. A scan uses one
/// algorithm throughout, so mixed lengths are a programming error, not a
/// recoverable condition.
pub fn hamming_distance(a: &Fingerprint, b: &Fingerprint) -> Result<u32, FingerprintError> {
    assert_eq!(
        a.as_str().len(),
        b.as_str().len(),
        "fingerprints of different lengths are never compared"
    );

    let mut distance = 0u32;
    for (position, (ca, cb)) in a.as_str().chars().zip(b.as_str().chars()).enumerate() {
        let na = hex_nibble(ca, position)?;
        let nb = hex_nibble(cb, position)?;
        distance += u32::from(na ^ nb).count_ones();
    }

    Ok(distance)
}
