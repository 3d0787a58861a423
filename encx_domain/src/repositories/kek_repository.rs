// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # KEK Repository Port
//!
//! Persistence contract for the versioned KEK directory. Implementations
//! must provide linearizable reads of the current version and
//! transactional rotation: among concurrent rotations of one alias
//! exactly one wins, and every loser observes
//! [`EncxError::VersionConflict`].
//!
//! Version histories are append-only. Deprecation flips a flag; rows are
//! never deleted, so projections stamped with any historical version stay
//! decryptable.

use async_trait::async_trait;

use crate::entities::KekVersionRecord;
use crate::error::EncxError;
use crate::value_objects::{KekAlias, KeyVersion};

/// Persistent directory of KEK versions per alias.
#[async_trait]
pub trait KekRepository: Send + Sync {
    /// The current (highest non-deprecated) version for an alias.
    ///
    /// Returns [`EncxError::NotInitialized`] when no version exists yet.
    async fn current_version(&self, alias: &KekAlias) -> Result<KeyVersion, EncxError>;

    /// The KMS key identifier recorded for a specific version.
    ///
    /// Returns [`EncxError::NotInitialized`] for unknown versions.
    async fn resolve_kms_key_id(&self, alias: &KekAlias, version: KeyVersion) -> Result<String, EncxError>;

    /// Appends a version row. A `(alias, version)` uniqueness violation is
    /// reported as [`EncxError::VersionConflict`].
    async fn append_version(
        &self,
        alias: &KekAlias,
        version: KeyVersion,
        kms_key_id: &str,
    ) -> Result<(), EncxError>;

    /// Marks a version as deprecated.
    async fn deprecate_version(&self, alias: &KekAlias, version: KeyVersion) -> Result<(), EncxError>;

    /// Atomically promotes `new_kms_key_id` to the next version and
    /// deprecates the previous current. Exactly one concurrent caller
    /// wins; losers receive [`EncxError::VersionConflict`] and can
    /// re-observe [`Self::current_version`] before deciding to retry.
    async fn rotate(&self, alias: &KekAlias, new_kms_key_id: &str) -> Result<KeyVersion, EncxError>;

    /// Every version recorded for an alias, oldest first. Diagnostic
    /// surface for operators and logs.
    async fn list_versions(&self, alias: &KekAlias) -> Result<Vec<KekVersionRecord>, EncxError>;
}
