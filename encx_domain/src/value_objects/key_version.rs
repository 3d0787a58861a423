// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Key Version
//!
//! A [`KeyVersion`] identifies one generation of a KEK under an alias.
//! Versions form a contiguous range `[1 .. N]`; rotation always appends
//! `N + 1`. Projections stamp the version that wrapped their DEK so
//! historical records stay decryptable after any number of rotations.

use serde::{Deserialize, Serialize};

use crate::error::EncxError;

/// A positive, monotonically increasing KEK version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyVersion(i64);

impl KeyVersion {
    /// The first version ever created for an alias.
    pub const INITIAL: KeyVersion = KeyVersion(1);

    /// Creates a version, rejecting zero and negative values.
    pub fn new(version: i64) -> Result<Self, EncxError> {
        if version < 1 {
            return Err(EncxError::validation(format!(
                "key version must be positive, got {}",
                version
            )));
        }
        Ok(Self(version))
    }

    /// The raw version number.
    pub fn get(&self) -> i64 {
        self.0
    }

    /// The version a rotation of this version produces.
    pub fn next(&self) -> KeyVersion {
        KeyVersion(self.0 + 1)
    }
}

impl std::fmt::Display for KeyVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<KeyVersion> for i64 {
    fn from(version: KeyVersion) -> i64 {
        version.0
    }
}
