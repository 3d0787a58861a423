// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # KEK Version Record
//!
//! One row of the versioned KEK directory. For each alias the records
//! form a contiguous version range `[1 .. N]` where at most one version —
//! the highest non-deprecated one — is "current". Deprecated versions are
//! retained indefinitely so historical projections stay decryptable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{KekAlias, KeyVersion};

/// A persisted KEK version: `(alias, version, kms_key_id, is_deprecated,
/// created_at)`.
///
/// `kms_key_id` is the opaque identifier under which the external KMS
/// wraps DEKs for this version; the library never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KekVersionRecord {
    pub alias: KekAlias,
    pub version: KeyVersion,
    pub kms_key_id: String,
    pub is_deprecated: bool,
    pub created_at: DateTime<Utc>,
}

impl KekVersionRecord {
    /// Creates a fresh, non-deprecated version record.
    pub fn new(alias: KekAlias, version: KeyVersion, kms_key_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            alias,
            version,
            kms_key_id: kms_key_id.into(),
            is_deprecated: false,
            created_at,
        }
    }

    /// Marks this version as deprecated. Deprecated versions still
    /// decrypt; they are only excluded from "current" resolution.
    pub fn deprecate(&mut self) {
        self.is_deprecated = true;
    }
}
