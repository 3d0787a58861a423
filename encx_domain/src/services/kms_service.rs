// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # KMS Service Port
//!
//! Contract over the external Key Management Service that wraps and
//! unwraps data-encryption keys. The KMS owns the key-encryption keys;
//! the library only ever sees opaque key identifiers and opaque DEK
//! ciphertext.
//!
//! Implementations are remote with latencies in the tens of milliseconds
//! and must be thread-safe by contract. The library never retries KMS
//! calls; failures surface as [`EncxError::KmsError`] and are identifiable
//! as retryable by callers.

use async_trait::async_trait;

use crate::error::EncxError;

/// A key management system that creates key-encryption keys and
/// wraps/unwraps data-encryption keys under them.
#[async_trait]
pub trait KmsService: Send + Sync {
    /// Resolves an alias to the KMS's identifier for its key.
    async fn get_key_id(&self, alias: &str) -> Result<String, EncxError>;

    /// Creates a new key in the KMS and returns its opaque identifier.
    async fn create_key(&self, description: &str) -> Result<String, EncxError>;

    /// Encrypts (wraps) a plaintext DEK under the identified key.
    async fn encrypt_dek(&self, key_id: &str, plaintext: &[u8]) -> Result<Vec<u8>, EncxError>;

    /// Decrypts (unwraps) a previously wrapped DEK under the identified
    /// key.
    async fn decrypt_dek(&self, key_id: &str, ciphertext: &[u8]) -> Result<Vec<u8>, EncxError>;
}
