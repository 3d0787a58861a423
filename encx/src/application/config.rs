// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Crypto Configuration
//!
//! Everything a [`Crypto`](crate::Crypto) facade needs beyond its two
//! external services. Validation is fail-fast at construction; defaults
//! cover the metadata store location and the argon2 cost profile.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use encx_domain::{Argon2Params, EncxError, KekAlias};

/// Default directory for the metadata database.
pub const DEFAULT_DB_PATH: &str = "./data";

/// Default metadata database filename.
pub const DEFAULT_DB_FILENAME: &str = "encx_metadata.db";

/// Configuration for constructing a crypto facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoConfig {
    /// Alias binding this facade to one KEK family (required).
    pub kek_alias: String,
    /// Alias identifying which pepper to load from the secret store
    /// (required).
    pub pepper_alias: String,
    /// Directory holding the metadata database.
    pub db_path: PathBuf,
    /// Metadata database filename.
    pub db_filename: String,
    /// Argon2id cost profile for secure hashes.
    pub argon2_params: Argon2Params,
    /// When true and no pepper exists yet, generate 32 random bytes and
    /// store them under `pepper_alias`.
    pub provision_pepper: bool,
}

impl CryptoConfig {
    /// Creates a config with defaults for everything but the aliases.
    pub fn new(kek_alias: impl Into<String>, pepper_alias: impl Into<String>) -> Self {
        Self {
            kek_alias: kek_alias.into(),
            pepper_alias: pepper_alias.into(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            db_filename: DEFAULT_DB_FILENAME.to_string(),
            argon2_params: Argon2Params::default(),
            provision_pepper: false,
        }
    }

    /// Enables pepper self-provisioning for stores that start empty.
    pub fn with_pepper_provisioning(mut self) -> Self {
        self.provision_pepper = true;
        self
    }

    /// Overrides the metadata store location.
    pub fn with_database(mut self, db_path: impl Into<PathBuf>, db_filename: impl Into<String>) -> Self {
        self.db_path = db_path.into();
        self.db_filename = db_filename.into();
        self
    }

    /// Overrides the argon2 cost profile.
    pub fn with_argon2_params(mut self, params: Argon2Params) -> Self {
        self.argon2_params = params;
        self
    }

    /// Validates the configuration and returns the parsed KEK alias.
    pub fn validate(&self) -> Result<KekAlias, EncxError> {
        let alias = KekAlias::new(&self.kek_alias)?;
        if self.pepper_alias.trim().is_empty() {
            return Err(EncxError::invalid_config("pepper alias must not be empty"));
        }
        if self.db_filename.trim().is_empty() {
            return Err(EncxError::invalid_config("database filename must not be empty"));
        }
        self.argon2_params.validate()?;
        Ok(alias)
    }

    /// The sqlx connection URL for the metadata database.
    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.db_path.join(&self.db_filename).display())
    }
}
