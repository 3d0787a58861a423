// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # KEK Alias
//!
//! A [`KekAlias`] binds a logical purpose ("user-service-kek") to one KMS
//! key family and one versioned history in the metadata store. It is the
//! partition key of everything the key-lifecycle subsystem persists.

use serde::{Deserialize, Serialize};

use crate::error::EncxError;

/// Maximum accepted alias length in characters.
const MAX_ALIAS_LEN: usize = 256;

/// A validated, human-readable KEK alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KekAlias(String);

impl KekAlias {
    /// Creates an alias, enforcing the domain rules: non-empty after
    /// trimming, at most 256 characters, no control characters.
    pub fn new(alias: impl Into<String>) -> Result<Self, EncxError> {
        let alias = alias.into();
        if alias.trim().is_empty() {
            return Err(EncxError::invalid_config("KEK alias must not be empty"));
        }
        if alias.chars().count() > MAX_ALIAS_LEN {
            return Err(EncxError::invalid_config(format!(
                "KEK alias exceeds {} characters",
                MAX_ALIAS_LEN
            )));
        }
        if alias.chars().any(|c| c.is_control()) {
            return Err(EncxError::invalid_config(
                "KEK alias must not contain control characters",
            ));
        }
        Ok(Self(alias))
    }

    /// Borrow the alias as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KekAlias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KekAlias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
