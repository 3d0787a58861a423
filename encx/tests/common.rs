// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Common Test Helpers
//!
//! Shared wiring for integration and end-to-end tests: a facade backed by
//! the in-memory KMS, a tempdir-scoped file secret store, and a
//! floor-level argon2 profile that keeps secure-hash tests fast.

#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use encx::infrastructure::adapters::{FileSecretStore, InMemoryKms};
use encx::{Argon2Params, Crypto, CryptoConfig};

/// Floor-level argon2 profile: strong enough to pass validation, cheap
/// enough for a test suite.
pub fn fast_argon2() -> Argon2Params {
    Argon2Params::new(
        Argon2Params::MIN_MEMORY_KIB,
        Argon2Params::MIN_ITERATIONS,
        Argon2Params::MIN_PARALLELISM,
        16,
        32,
    )
    .expect("floor profile must validate")
}

/// Default test configuration rooted in the given tempdir.
pub fn test_config(dir: &TempDir) -> CryptoConfig {
    CryptoConfig::new("test-kek", "test-pepper")
        .with_database(dir.path().join("db"), "meta.db")
        .with_argon2_params(fast_argon2())
        .with_pepper_provisioning()
}

/// A fully wired facade plus the collaborators behind it. Keep the
/// tempdir alive for the duration of the test.
pub struct TestEnv {
    pub crypto: Crypto,
    pub kms: Arc<InMemoryKms>,
    pub secrets: Arc<FileSecretStore>,
    pub config: CryptoConfig,
    pub dir: TempDir,
}

pub async fn test_env() -> TestEnv {
    let dir = TempDir::new().expect("tempdir");
    let kms = Arc::new(InMemoryKms::new());
    let secrets = Arc::new(FileSecretStore::new(dir.path().join("secrets")));
    let config = test_config(&dir);

    let crypto = Crypto::new(config.clone(), kms.clone(), secrets.clone())
        .await
        .expect("facade construction");

    TestEnv {
        crypto,
        kms,
        secrets,
        config,
        dir,
    }
}
