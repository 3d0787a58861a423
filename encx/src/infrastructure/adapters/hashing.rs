// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Hashing
//!
//! The two hash shapes a projection can carry:
//!
//! - **Basic hash** — plain SHA-256 of the serialized value, lowercase
//!   hex. Deterministic by design so equal values collide on purpose and
//!   a database index over the hash column supports equality lookups. No
//!   pepper, no salt.
//! - **Secure hash** — argon2id over `value || pepper` with a fresh
//!   random salt per call, returned as a PHC string
//!   (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`). Non-deterministic by
//!   design; verification re-runs argon2id with the salt and parameters
//!   embedded in the PHC string and compares in constant time.
//!
//! The pepper is appended to the hash input rather than passed as the
//! argon2 secret-key parameter, which keeps PHC strings verifiable by any
//! argon2id implementation given the same pepper-append convention.
//!
//! `SecureHasher` refuses to operate on an uninitialized (all-zero)
//! pepper; that state indicates a misconfigured secret store.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use encx_domain::{Argon2Params, EncxError, Pepper};

/// Lowercase 64-character hex SHA-256 digest of the input.
pub fn hash_basic(value: &[u8]) -> String {
    hex::encode(Sha256::digest(value))
}

/// Recomputes the basic hash and compares. Case-insensitive over the hex
/// alphabet so externally stored uppercase digests still match.
pub fn compare_basic_hash_and_value(value: &[u8], hash: &str) -> bool {
    hash_basic(value).eq_ignore_ascii_case(hash)
}

/// Argon2id secure hasher with a validated cost profile.
pub struct SecureHasher {
    params: Argon2Params,
    rng: SystemRandom,
}

impl SecureHasher {
    /// Creates a hasher, rejecting profiles below the parameter floors.
    pub fn new(params: Argon2Params) -> Result<Self, EncxError> {
        params.validate()?;
        Ok(Self {
            params,
            rng: SystemRandom::new(),
        })
    }

    /// The cost profile this hasher stamps into PHC strings.
    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    fn argon2(&self) -> Result<Argon2<'static>, EncxError> {
        let params = Params::new(
            self.params.memory_kib,
            self.params.iterations,
            self.params.parallelism,
            Some(self.params.output_length),
        )
        .map_err(|e| EncxError::invalid_config(format!("invalid argon2 parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn peppered_input(value: &[u8], pepper: &Pepper) -> Zeroizing<Vec<u8>> {
        let mut input = Vec::with_capacity(value.len() + Pepper::LEN);
        input.extend_from_slice(value);
        input.extend_from_slice(pepper.as_bytes());
        Zeroizing::new(input)
    }

    /// Hashes `value || pepper` under a fresh random salt and returns the
    /// PHC-encoded result.
    pub fn hash_secure(&self, value: &[u8], pepper: &Pepper) -> Result<String, EncxError> {
        if pepper.is_uninitialized() {
            return Err(EncxError::UninitializedPepper(
                "refusing to compute a secure hash with an unprovisioned pepper".to_string(),
            ));
        }

        let mut salt_bytes = vec![0u8; self.params.salt_length];
        self.rng
            .fill(&mut salt_bytes)
            .map_err(|e| EncxError::hashing(format!("failed to generate salt: {:?}", e)))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| EncxError::hashing(format!("invalid salt: {}", e)))?;

        let input = Self::peppered_input(value, pepper);
        let hash = self
            .argon2()?
            .hash_password(&input, &salt)
            .map_err(|e| EncxError::hashing(format!("argon2id hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Verifies a value against a PHC-encoded secure hash using the salt
    /// and parameters embedded in the string. Digest comparison is
    /// constant-time inside the verifier.
    pub fn compare_secure_hash_and_value(
        &self,
        value: &[u8],
        phc_string: &str,
        pepper: &Pepper,
    ) -> Result<bool, EncxError> {
        if pepper.is_uninitialized() {
            return Err(EncxError::UninitializedPepper(
                "refusing to verify a secure hash with an unprovisioned pepper".to_string(),
            ));
        }

        let parsed = PasswordHash::new(phc_string)
            .map_err(|e| EncxError::InvalidHashFormat(format!("malformed PHC string: {}", e)))?;
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return Err(EncxError::InvalidHashFormat(format!(
                "unsupported hash algorithm: {}",
                parsed.algorithm
            )));
        }

        let input = Self::peppered_input(value, pepper);
        match Argon2::default().verify_password(&input, &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(EncxError::hashing(format!("secure hash verification failed: {}", e))),
        }
    }
}
