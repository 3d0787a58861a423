// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secret Store Port
//!
//! Contract over the secret management service that holds peppers. A
//! pepper is written once per alias and read at facade construction; the
//! storage path convention is provider-specific and only exposed for
//! diagnostics.

use async_trait::async_trait;

use crate::error::EncxError;
use crate::value_objects::Pepper;

/// A secret management service scoped to 32-byte peppers.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Persists the pepper for an alias.
    async fn store_pepper(&self, alias: &str, pepper: &Pepper) -> Result<(), EncxError>;

    /// Loads the pepper for an alias.
    async fn get_pepper(&self, alias: &str) -> Result<Pepper, EncxError>;

    /// Checks whether a pepper exists for an alias.
    async fn pepper_exists(&self, alias: &str) -> Result<bool, EncxError>;

    /// Where the pepper for an alias lives, for diagnostics only. The
    /// library never inspects the returned path.
    fn storage_path(&self, alias: &str) -> String;
}
