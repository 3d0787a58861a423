// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Facade construction: fail-fast validation, pepper loading and
//! provisioning, and idempotent KEK bootstrap.

use std::sync::Arc;

use tempfile::TempDir;

use encx::infrastructure::adapters::{FileSecretStore, InMemoryKms};
use encx::{Crypto, CryptoConfig, EncxError, KeyVersion, Pepper, SecretStore};

use super::common::{self, test_config};

#[tokio::test]
async fn construction_provisions_pepper_and_bootstraps_version_one() {
    let env = common::test_env().await;

    assert!(env.secrets.pepper_exists("test-pepper").await.unwrap());
    assert!(!env.crypto.pepper().is_uninitialized());
    assert_eq!(env.crypto.current_key_version().await.unwrap(), KeyVersion::INITIAL);

    let versions = env.crypto.list_kek_versions().await.unwrap();
    assert_eq!(versions.len(), 1);
    assert!(!versions[0].is_deprecated);
}

#[tokio::test]
async fn second_construction_reuses_pepper_and_version() {
    let env = common::test_env().await;
    let first_pepper = env.crypto.pepper().clone();

    let again = Crypto::new(env.config.clone(), env.kms.clone(), env.secrets.clone())
        .await
        .unwrap();

    assert_eq!(again.pepper(), &first_pepper);
    assert_eq!(again.current_key_version().await.unwrap(), KeyVersion::INITIAL);
    assert_eq!(again.list_kek_versions().await.unwrap().len(), 1);
    // A secure hash from the first facade verifies through the second.
    let phc = env.crypto.hash_secure(b"carry-over").unwrap();
    assert!(again.compare_secure_hash_and_value(b"carry-over", &phc).unwrap());
}

#[tokio::test]
async fn missing_pepper_without_provisioning_fails() {
    let dir = TempDir::new().unwrap();
    let kms = Arc::new(InMemoryKms::new());
    let secrets = Arc::new(FileSecretStore::new(dir.path().join("secrets")));
    let mut config = test_config(&dir);
    config.provision_pepper = false;

    let err = Crypto::new(config, kms, secrets).await.unwrap_err();
    assert!(matches!(err, EncxError::InvalidConfiguration(_)));
}

#[tokio::test]
async fn all_zero_pepper_is_rejected_at_construction() {
    let dir = TempDir::new().unwrap();
    let kms = Arc::new(InMemoryKms::new());
    let secrets = Arc::new(FileSecretStore::new(dir.path().join("secrets")));
    secrets
        .store_pepper("test-pepper", &Pepper::new([0u8; 32]))
        .await
        .unwrap();

    let err = Crypto::new(test_config(&dir), kms, secrets).await.unwrap_err();
    assert!(matches!(err, EncxError::UninitializedPepper(_)));
}

#[tokio::test]
async fn invalid_configuration_never_builds_a_facade() {
    let dir = TempDir::new().unwrap();
    let kms = Arc::new(InMemoryKms::new());
    let secrets = Arc::new(FileSecretStore::new(dir.path().join("secrets")));

    let mut config = test_config(&dir);
    config.kek_alias = String::new();
    assert!(matches!(
        Crypto::new(config, kms.clone(), secrets.clone()).await,
        Err(EncxError::InvalidConfiguration(_))
    ));

    let mut config = test_config(&dir);
    config.kek_alias = "x".repeat(300);
    assert!(matches!(
        Crypto::new(config, kms, secrets).await,
        Err(EncxError::InvalidConfiguration(_))
    ));
}

#[tokio::test]
async fn accessors_expose_the_configured_state() {
    let env = common::test_env().await;
    assert_eq!(env.crypto.kek_alias().as_str(), "test-kek");
    assert_eq!(env.crypto.argon2_params(), &common::fast_argon2());
}

#[tokio::test]
async fn facade_is_shareable_across_tasks() {
    let env = common::test_env().await;

    let mut handles = Vec::new();
    for i in 0..4u8 {
        let crypto = env.crypto.clone();
        handles.push(tokio::spawn(async move {
            let dek = crypto.generate_dek().unwrap();
            let ciphertext = crypto.encrypt_data(&[i; 64], &dek).unwrap();
            assert_eq!(crypto.decrypt_data(&ciphertext, &dek).unwrap(), vec![i; 64]);
            let wrapped = crypto.encrypt_dek(&dek).await.unwrap();
            let unwrapped = crypto
                .decrypt_dek_with_version(&wrapped.ciphertext, wrapped.key_version)
                .await
                .unwrap();
            assert_eq!(unwrapped.as_bytes(), dek.as_bytes());
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn separate_aliases_coexist_without_shared_state() {
    let dir = TempDir::new().unwrap();
    let kms = Arc::new(InMemoryKms::new());
    let secrets = Arc::new(FileSecretStore::new(dir.path().join("secrets")));

    let users = CryptoConfig::new("users-kek", "users-pepper")
        .with_database(dir.path().join("db"), "meta.db")
        .with_argon2_params(common::fast_argon2())
        .with_pepper_provisioning();
    let orders = CryptoConfig::new("orders-kek", "orders-pepper")
        .with_database(dir.path().join("db"), "meta.db")
        .with_argon2_params(common::fast_argon2())
        .with_pepper_provisioning();

    let users = Crypto::new(users, kms.clone(), secrets.clone()).await.unwrap();
    let orders = Crypto::new(orders, kms, secrets).await.unwrap();

    users.rotate_kek().await.unwrap();
    assert_eq!(users.current_key_version().await.unwrap().get(), 2);
    assert_eq!(orders.current_key_version().await.unwrap().get(), 1);
    assert_ne!(users.pepper(), orders.pepper());
}
