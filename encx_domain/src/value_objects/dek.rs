// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Data Encryption Key
//!
//! A [`Dek`] is the per-record symmetric key of the envelope scheme:
//! exactly 32 random bytes, generated fresh for every processed record,
//! never persisted in plaintext. Only its KMS-wrapped ciphertext leaves
//! the process (see [`WrappedDek`](crate::value_objects::WrappedDek)).
//!
//! The key material is wiped from memory when the value is dropped and is
//! excluded from `Debug` output.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::EncxError;

/// A plaintext 32-byte data-encryption key.
///
/// Lifetime: exists transiently in memory while a record is processed or
/// decrypted. The wrapping layer owns the only durable representation.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Dek {
    bytes: [u8; Dek::LEN],
}

impl Dek {
    /// Size of a data-encryption key in bytes (AES-256 key size).
    pub const LEN: usize = 32;

    /// Wraps raw key material. The caller is responsible for having drawn
    /// the bytes from a cryptographically secure RNG.
    pub fn new(bytes: [u8; Dek::LEN]) -> Self {
        Self { bytes }
    }

    /// Builds a DEK from a byte slice, rejecting any length other than 32.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EncxError> {
        if bytes.len() != Dek::LEN {
            return Err(EncxError::decryption(format!(
                "invalid DEK length: expected {} bytes, got {}",
                Dek::LEN,
                bytes.len()
            )));
        }
        let mut key = [0u8; Dek::LEN];
        key.copy_from_slice(bytes);
        Ok(Self { bytes: key })
    }

    /// Read-only view of the key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// Key material must never leak through logs or error chains.
impl std::fmt::Debug for Dek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Dek(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_accepts_exactly_32_bytes() {
        let dek = Dek::from_slice(&[7u8; 32]).unwrap();
        assert_eq!(dek.as_bytes(), &[7u8; 32]);
    }

    #[test]
    fn from_slice_rejects_other_lengths() {
        assert!(Dek::from_slice(&[0u8; 31]).is_err());
        assert!(Dek::from_slice(&[0u8; 33]).is_err());
        assert!(Dek::from_slice(&[]).is_err());
    }

    #[test]
    fn debug_never_prints_key_material() {
        let dek = Dek::new([0xAB; 32]);
        let printed = format!("{:?}", dek);
        assert!(!printed.contains("171"));
        assert!(printed.contains("redacted"));
    }
}
