// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # In-Memory KMS
//!
//! A process-local [`KmsService`] for development and tests: no
//! credentials, no network, but real AES-256-GCM wrapping under random
//! per-key KEKs, so a DEK wrapped under one key id genuinely fails to
//! unwrap under another. Keys live only as long as the process; nothing
//! here is suitable for production key custody.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use encx_domain::{Dek, EncxError, KmsService};

use super::aead::AeadEngine;

/// Process-local KMS keyed by generated identifiers.
pub struct InMemoryKms {
    engine: AeadEngine,
    keys: RwLock<HashMap<String, Dek>>,
    aliases: RwLock<HashMap<String, String>>,
}

impl Default for InMemoryKms {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryKms {
    pub fn new() -> Self {
        Self {
            engine: AeadEngine::new(),
            keys: RwLock::new(HashMap::new()),
            aliases: RwLock::new(HashMap::new()),
        }
    }

    /// Number of keys created so far. Test visibility into orphaned keys
    /// left behind by failed rotations.
    pub fn key_count(&self) -> usize {
        self.keys.read().len()
    }

    fn kek_for(&self, key_id: &str) -> Result<Dek, EncxError> {
        self.keys
            .read()
            .get(key_id)
            .cloned()
            .ok_or_else(|| EncxError::kms(format!("unknown key id: {}", key_id)))
    }
}

#[async_trait]
impl KmsService for InMemoryKms {
    async fn get_key_id(&self, alias: &str) -> Result<String, EncxError> {
        self.aliases
            .read()
            .get(alias)
            .cloned()
            .ok_or_else(|| EncxError::kms(format!("unknown alias: {}", alias)))
    }

    async fn create_key(&self, description: &str) -> Result<String, EncxError> {
        let key_id = format!("local-kms-{}", Uuid::new_v4());
        let kek = self.engine.generate_dek()?;
        self.keys.write().insert(key_id.clone(), kek);
        self.aliases.write().insert(description.to_string(), key_id.clone());
        Ok(key_id)
    }

    async fn encrypt_dek(&self, key_id: &str, plaintext: &[u8]) -> Result<Vec<u8>, EncxError> {
        let kek = self.kek_for(key_id)?;
        self.engine.encrypt(plaintext, &kek)
    }

    async fn decrypt_dek(&self, key_id: &str, ciphertext: &[u8]) -> Result<Vec<u8>, EncxError> {
        let kek = self.kek_for(key_id)?;
        self.engine.decrypt(ciphertext, &kek)
    }
}
