// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Crypto Facade
//!
//! The single handle through which generated code (and applications)
//! reach every cryptographic primitive: DEK generation, buffered and
//! streaming AEAD, basic and secure hashing, DEK envelope operations, and
//! KEK rotation.
//!
//! ## Construction
//!
//! Ordered and fail-fast:
//!
//! 1. Validate the configuration.
//! 2. Open or create the metadata store and apply the schema.
//! 3. Load the pepper from the secret store — self-provision 32 random
//!    bytes when configured and absent — and reject an all-zero pepper.
//! 4. Ensure an initial KEK version exists for the alias (idempotent
//!    under concurrent construction).
//!
//! Any failure aborts construction; a facade is never returned in a
//! half-initialized state.
//!
//! ## Concurrency
//!
//! The handle is `Clone` (Arc-backed) and every operation takes `&self`,
//! so one facade can serve any number of tasks. Pepper, argon2 profile,
//! and alias are immutable after construction; the metadata store
//! serializes its own mutations. After `rotate_kek` returns, every
//! subsequent `encrypt_dek` observes the new version; calls in flight
//! during a rotation may stamp either version, and both stay decryptable
//! because old versions are only deprecated, never removed.
//!
//! Sibling facades bound to different aliases can coexist freely; there
//! is no global state.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use encx_domain::{
    Argon2Params, Dek, EncxError, KekAlias, KekRepository, KekVersionRecord, KeyVersion,
    KmsService, Pepper, SecretStore, WrappedDek,
};

use crate::application::config::CryptoConfig;
use crate::infrastructure::adapters::aead::AeadEngine;
use crate::infrastructure::adapters::hashing::{self, SecureHasher};
use crate::infrastructure::adapters::streaming;
use crate::infrastructure::repositories::{schema, SqliteKekRepository};

struct CryptoInner {
    kek_alias: KekAlias,
    pepper: Pepper,
    engine: AeadEngine,
    hasher: SecureHasher,
    kms: Arc<dyn KmsService>,
    keks: Arc<dyn KekRepository>,
}

/// Thread-safe handle over the envelope-encryption engine.
#[derive(Clone)]
pub struct Crypto {
    inner: Arc<CryptoInner>,
}

impl std::fmt::Debug for Crypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crypto").finish_non_exhaustive()
    }
}

impl Crypto {
    /// Builds a facade backed by the SQLite metadata store named in the
    /// configuration.
    pub async fn new(
        config: CryptoConfig,
        kms: Arc<dyn KmsService>,
        secrets: Arc<dyn SecretStore>,
    ) -> Result<Self, EncxError> {
        config.validate()?;

        tokio::fs::create_dir_all(&config.db_path)
            .await
            .map_err(|e| EncxError::IoError(format!("failed to create database directory: {}", e)))?;
        let pool = schema::initialize_database(&config.database_url())
            .await
            .map_err(|e| EncxError::database(format!("failed to initialize metadata store: {}", e)))?;
        let keks: Arc<dyn KekRepository> = Arc::new(SqliteKekRepository::new(pool));

        Self::from_parts(config, kms, secrets, keks).await
    }

    /// Builds a facade over an already-opened KEK repository. Used by
    /// tests and by deployments that manage their own pool.
    pub async fn from_parts(
        config: CryptoConfig,
        kms: Arc<dyn KmsService>,
        secrets: Arc<dyn SecretStore>,
        keks: Arc<dyn KekRepository>,
    ) -> Result<Self, EncxError> {
        let kek_alias = config.validate()?;
        let engine = AeadEngine::new();
        let hasher = SecureHasher::new(config.argon2_params)?;

        let pepper = Self::load_pepper(&config, &engine, secrets.as_ref()).await?;
        Self::bootstrap_kek(&kek_alias, kms.as_ref(), keks.as_ref()).await?;

        info!(alias = %kek_alias, "crypto facade initialized");
        Ok(Self {
            inner: Arc::new(CryptoInner {
                kek_alias,
                pepper,
                engine,
                hasher,
                kms,
                keks,
            }),
        })
    }

    async fn load_pepper(
        config: &CryptoConfig,
        engine: &AeadEngine,
        secrets: &dyn SecretStore,
    ) -> Result<Pepper, EncxError> {
        let alias = config.pepper_alias.as_str();
        let pepper = if secrets.pepper_exists(alias).await? {
            secrets.get_pepper(alias).await?
        } else if config.provision_pepper {
            debug!(alias, path = %secrets.storage_path(alias), "provisioning new pepper");
            let bytes = engine.random_bytes(Pepper::LEN)?;
            let pepper = Pepper::from_slice(&bytes)?;
            secrets.store_pepper(alias, &pepper).await?;
            pepper
        } else {
            return Err(EncxError::invalid_config(format!(
                "no pepper stored for alias '{}' and self-provisioning is disabled",
                alias
            )));
        };

        if pepper.is_uninitialized() {
            return Err(EncxError::UninitializedPepper(format!(
                "pepper for alias '{}' is all zero",
                alias
            )));
        }
        Ok(pepper)
    }

    async fn bootstrap_kek(
        alias: &KekAlias,
        kms: &dyn KmsService,
        keks: &dyn KekRepository,
    ) -> Result<(), EncxError> {
        match keks.current_version(alias).await {
            Ok(_) => Ok(()),
            Err(EncxError::NotInitialized(_)) => {
                let kms_key_id = kms.create_key(alias.as_str()).await?;
                match keks.append_version(alias, KeyVersion::INITIAL, &kms_key_id).await {
                    Ok(()) => {
                        info!(alias = %alias, "bootstrapped initial KEK version");
                        Ok(())
                    }
                    // A concurrent construction won the insert; its key is
                    // the one in use and ours is a tolerated orphan.
                    Err(EncxError::VersionConflict(_)) => Ok(()),
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    // ------------------------------------------------------------------
    // DEK primitives
    // ------------------------------------------------------------------

    /// Generates a fresh 32-byte data-encryption key.
    pub fn generate_dek(&self) -> Result<Dek, EncxError> {
        self.inner.engine.generate_dek()
    }

    /// Encrypts a payload under a DEK: `nonce || ciphertext_with_tag`.
    pub fn encrypt_data(&self, plaintext: &[u8], dek: &Dek) -> Result<Vec<u8>, EncxError> {
        self.inner.engine.encrypt(plaintext, dek)
    }

    /// Decrypts a payload produced by [`Crypto::encrypt_data`].
    pub fn decrypt_data(&self, ciphertext: &[u8], dek: &Dek) -> Result<Vec<u8>, EncxError> {
        self.inner.engine.decrypt(ciphertext, dek)
    }

    /// Encrypts a stream frame by frame in constant memory. Returns the
    /// number of plaintext bytes consumed.
    pub async fn encrypt_stream<R, W>(&self, reader: &mut R, writer: &mut W, dek: &Dek) -> Result<u64, EncxError>
    where
        R: AsyncRead + Unpin + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        streaming::encrypt_stream(&self.inner.engine, reader, writer, dek).await
    }

    /// Decrypts a stream produced by [`Crypto::encrypt_stream`]. Returns
    /// the number of plaintext bytes written.
    pub async fn decrypt_stream<R, W>(&self, reader: &mut R, writer: &mut W, dek: &Dek) -> Result<u64, EncxError>
    where
        R: AsyncRead + Unpin + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        streaming::decrypt_stream(&self.inner.engine, reader, writer, dek).await
    }

    // ------------------------------------------------------------------
    // Hashing
    // ------------------------------------------------------------------

    /// Deterministic lowercase SHA-256 hex of the serialized value.
    pub fn hash_basic(&self, value: &[u8]) -> String {
        hashing::hash_basic(value)
    }

    /// Recomputes the basic hash and compares.
    pub fn compare_basic_hash_and_value(&self, value: &[u8], hash: &str) -> bool {
        hashing::compare_basic_hash_and_value(value, hash)
    }

    /// Argon2id secure hash of `value || pepper` with a fresh salt,
    /// PHC-encoded. CPU-bound: expect tens of milliseconds under the
    /// default profile.
    pub fn hash_secure(&self, value: &[u8]) -> Result<String, EncxError> {
        self.inner.hasher.hash_secure(value, &self.inner.pepper)
    }

    /// Verifies a value against a PHC-encoded secure hash.
    pub fn compare_secure_hash_and_value(&self, value: &[u8], phc_string: &str) -> Result<bool, EncxError> {
        self.inner
            .hasher
            .compare_secure_hash_and_value(value, phc_string, &self.inner.pepper)
    }

    // ------------------------------------------------------------------
    // DEK envelope / KEK lifecycle
    // ------------------------------------------------------------------

    /// Wraps a DEK under the current KEK version and returns the
    /// ciphertext with its version stamp.
    pub async fn encrypt_dek(&self, dek: &Dek) -> Result<WrappedDek, EncxError> {
        let alias = &self.inner.kek_alias;
        let version = self.inner.keks.current_version(alias).await?;
        let key_id = self.inner.keks.resolve_kms_key_id(alias, version).await?;
        let ciphertext = self.inner.kms.encrypt_dek(&key_id, dek.as_bytes()).await?;
        debug!(alias = %alias, version = %version, "wrapped DEK");
        Ok(WrappedDek::new(ciphertext, version))
    }

    /// Unwraps a DEK using the KEK version stamped on its projection.
    /// Fails for unknown versions and for plaintext that is not exactly
    /// 32 bytes.
    pub async fn decrypt_dek_with_version(&self, ciphertext: &[u8], version: KeyVersion) -> Result<Dek, EncxError> {
        let alias = &self.inner.kek_alias;
        let key_id = self.inner.keks.resolve_kms_key_id(alias, version).await?;
        let plaintext = self.inner.kms.decrypt_dek(&key_id, ciphertext).await?;
        Dek::from_slice(&plaintext)
    }

    /// Creates a new KMS key and atomically promotes it to the next KEK
    /// version, deprecating the previous current.
    ///
    /// On [`EncxError::VersionConflict`] a concurrent rotation won; the
    /// caller can observe [`Crypto::current_key_version`] and decide
    /// whether another rotation is still wanted. A KMS key created by a
    /// losing rotation is left behind — the library never deletes KMS
    /// material.
    pub async fn rotate_kek(&self) -> Result<KeyVersion, EncxError> {
        let alias = &self.inner.kek_alias;
        let new_key_id = self.inner.kms.create_key(alias.as_str()).await?;
        self.inner.keks.rotate(alias, &new_key_id).await
    }

    /// The current (highest non-deprecated) KEK version for this alias.
    pub async fn current_key_version(&self) -> Result<KeyVersion, EncxError> {
        self.inner.keks.current_version(&self.inner.kek_alias).await
    }

    /// Every KEK version recorded for this alias, oldest first.
    pub async fn list_kek_versions(&self) -> Result<Vec<KekVersionRecord>, EncxError> {
        self.inner.keks.list_versions(&self.inner.kek_alias).await
    }

    // ------------------------------------------------------------------
    // Read-only accessors
    // ------------------------------------------------------------------

    /// The alias this facade is bound to.
    pub fn kek_alias(&self) -> &KekAlias {
        &self.inner.kek_alias
    }

    /// The argon2 profile used for secure hashes.
    pub fn argon2_params(&self) -> &Argon2Params {
        self.inner.hasher.params()
    }

    /// The loaded pepper.
    pub fn pepper(&self) -> &Pepper {
        &self.inner.pepper
    }
}
