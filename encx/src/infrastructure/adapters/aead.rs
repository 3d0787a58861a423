// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # AEAD Engine
//!
//! DEK generation and authenticated encryption of field payloads. The
//! cipher is AES-256-GCM with standard parameters: 96-bit random nonce,
//! 128-bit tag. Buffered output is `nonce || ciphertext_with_tag`; the
//! framed streaming layer binds its own associated data on top of the
//! same primitive.
//!
//! ## Security Properties
//!
//! - **Confidentiality**: payloads are unreadable without the DEK
//! - **Integrity**: any bit flip in nonce, ciphertext, or tag fails
//!   authentication during decryption
//! - **Semantic security**: the fresh random nonce makes identical
//!   plaintexts produce different ciphertexts on every call
//!
//! Nonces are drawn from `ring`'s system RNG per encryption. A 96-bit
//! random nonce keeps collision probability negligible at the per-DEK
//! message counts this library produces (a handful of fields per record
//! under a single-use DEK).

use aes_gcm::{AeadInPlace, Aes256Gcm, Key, KeyInit, Nonce};
use ring::rand::{SecureRandom, SystemRandom};

use encx_domain::{Dek, EncxError};

/// Size of the AEAD nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AEAD authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Authenticated encryption engine bound to AES-256-GCM.
///
/// Stateless apart from its RNG handle; safe to share across threads.
pub struct AeadEngine {
    rng: SystemRandom,
}

impl Default for AeadEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AeadEngine {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    /// Generates a fresh 32-byte data-encryption key.
    pub fn generate_dek(&self) -> Result<Dek, EncxError> {
        let mut key = [0u8; Dek::LEN];
        self.rng
            .fill(&mut key)
            .map_err(|e| EncxError::encryption(format!("failed to generate DEK: {:?}", e)))?;
        Ok(Dek::new(key))
    }

    /// Draws `length` random bytes (salts, nonces, peppers).
    pub fn random_bytes(&self, length: usize) -> Result<Vec<u8>, EncxError> {
        let mut bytes = vec![0u8; length];
        self.rng
            .fill(&mut bytes)
            .map_err(|e| EncxError::encryption(format!("failed to generate random bytes: {:?}", e)))?;
        Ok(bytes)
    }

    /// Encrypts a payload under the DEK. Output is
    /// `nonce || ciphertext_with_tag`.
    pub fn encrypt(&self, plaintext: &[u8], dek: &Dek) -> Result<Vec<u8>, EncxError> {
        self.encrypt_with_aad(plaintext, dek, b"")
    }

    /// Decrypts `nonce || ciphertext_with_tag` under the DEK.
    pub fn decrypt(&self, data: &[u8], dek: &Dek) -> Result<Vec<u8>, EncxError> {
        self.decrypt_with_aad(data, dek, b"")
    }

    /// AEAD seal with caller-supplied associated data. Used by the
    /// streaming layer to bind frame headers.
    pub(crate) fn encrypt_with_aad(&self, plaintext: &[u8], dek: &Dek, aad: &[u8]) -> Result<Vec<u8>, EncxError> {
        let nonce_bytes = self.random_bytes(NONCE_LEN)?;
        let cipher_key = Key::<Aes256Gcm>::from_slice(dek.as_bytes());
        let cipher = Aes256Gcm::new(cipher_key);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let mut buffer = plaintext.to_vec();
        cipher
            .encrypt_in_place(nonce, aad, &mut buffer)
            .map_err(|e| EncxError::encryption(format!("AES-256-GCM encryption failed: {:?}", e)))?;

        // Prepend nonce to encrypted data
        let mut result = nonce_bytes;
        result.extend_from_slice(&buffer);
        Ok(result)
    }

    /// AEAD open with caller-supplied associated data.
    pub(crate) fn decrypt_with_aad(&self, data: &[u8], dek: &Dek, aad: &[u8]) -> Result<Vec<u8>, EncxError> {
        if data.len() < NONCE_LEN {
            return Err(EncxError::decryption(format!(
                "ciphertext of {} bytes is shorter than the {}-byte nonce",
                data.len(),
                NONCE_LEN
            )));
        }

        let (nonce, ciphertext) = data.split_at(NONCE_LEN);
        let cipher_key = Key::<Aes256Gcm>::from_slice(dek.as_bytes());
        let cipher = Aes256Gcm::new(cipher_key);
        let nonce = Nonce::from_slice(nonce);

        let mut buffer = ciphertext.to_vec();
        cipher
            .decrypt_in_place(nonce, aad, &mut buffer)
            .map_err(|_| EncxError::authentication("AES-256-GCM tag verification failed"))?;

        Ok(buffer)
    }
}
