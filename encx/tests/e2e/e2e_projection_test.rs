// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! End-to-end scenarios over the generated projection code: simple
//! encrypt/decrypt, searchable encryption, password hashing, tampering,
//! and rotation across processed records.

use encx::{EncxError, FieldCodec};

use super::common;
use super::user_encx::{decrypt_user, process_user};
use super::User;

fn sample_user() -> User {
    User {
        id: 42,
        name: "John Doe".to_string(),
        email: "user@example.com".to_string(),
        password: "SecurePassword123!".to_string(),
        phone: Some("+1-202-555-0100".to_string()),
        active: true,
    }
}

#[tokio::test]
async fn simple_encrypt_decrypt_round_trips() {
    let env = common::test_env().await;
    let user = sample_user();

    let projection = process_user(&env.crypto, &user).await.unwrap();
    assert!(projection.name_encrypted.len() > 28);
    assert!(!projection.dek_encrypted.is_empty());
    assert_eq!(projection.key_version, 1);
    assert!(projection.metadata.is_empty());
    // Untagged fields are copied verbatim.
    assert_eq!(projection.id, 42);
    assert!(projection.active);

    let decrypted = decrypt_user(&env.crypto, &projection).await.unwrap();
    assert_eq!(decrypted.name, "John Doe");
    assert_eq!(decrypted.email, "user@example.com");
    assert_eq!(decrypted.phone.as_deref(), Some("+1-202-555-0100"));
    assert_eq!(decrypted.id, 42);
    // Hash-only fields have no plaintext counterpart.
    assert_eq!(decrypted.password, "");
}

#[tokio::test]
async fn searchable_encryption_keeps_hashes_stable_and_ciphertexts_fresh() {
    let env = common::test_env().await;
    let user = sample_user();

    let first = process_user(&env.crypto, &user).await.unwrap();
    let second = process_user(&env.crypto, &user).await.unwrap();

    // Fresh DEK and nonce per processing: ciphertexts differ.
    assert_ne!(first.email_encrypted, second.email_encrypted);
    // The searchable hash is a pure function of the value.
    assert_eq!(first.email_hash, second.email_hash);

    let serialized = user.email.encode().unwrap();
    assert_eq!(first.email_hash, env.crypto.hash_basic(&serialized));
}

#[tokio::test]
async fn password_hashes_are_phc_encoded_and_verifiable() {
    let env = common::test_env().await;
    let user = sample_user();

    let first = process_user(&env.crypto, &user).await.unwrap();
    let second = process_user(&env.crypto, &user).await.unwrap();

    assert!(first.password_hash_secure.starts_with("$argon2id$v=19$m="));
    // Random salt per hash.
    assert_ne!(first.password_hash_secure, second.password_hash_secure);

    let serialized = user.password.encode().unwrap();
    assert!(env
        .crypto
        .compare_secure_hash_and_value(&serialized, &first.password_hash_secure)
        .unwrap());
    let wrong = "WrongPassword".to_string().encode().unwrap();
    assert!(!env
        .crypto
        .compare_secure_hash_and_value(&wrong, &first.password_hash_secure)
        .unwrap());
}

#[tokio::test]
async fn zero_values_are_processed_and_none_fields_are_skipped() {
    let env = common::test_env().await;
    let user = User {
        id: 0,
        name: String::new(),
        email: String::new(),
        password: String::new(),
        phone: None,
        active: false,
    };

    let projection = process_user(&env.crypto, &user).await.unwrap();
    // Empty strings are valid data and still encrypt.
    assert!(!projection.name_encrypted.is_empty());
    assert!(!projection.email_encrypted.is_empty());
    // A None field is skipped entirely.
    assert!(projection.phone_encrypted.is_empty());

    let decrypted = decrypt_user(&env.crypto, &projection).await.unwrap();
    assert_eq!(decrypted.name, "");
    assert_eq!(decrypted.email, "");
    assert_eq!(decrypted.phone, None);
}

#[tokio::test]
async fn some_empty_string_round_trips_distinct_from_none() {
    let env = common::test_env().await;
    let mut user = sample_user();
    user.phone = Some(String::new());

    let projection = process_user(&env.crypto, &user).await.unwrap();
    assert!(!projection.phone_encrypted.is_empty());

    let decrypted = decrypt_user(&env.crypto, &projection).await.unwrap();
    assert_eq!(decrypted.phone, Some(String::new()));
}

#[tokio::test]
async fn tampered_ciphertext_fails_and_original_still_decrypts() {
    let env = common::test_env().await;
    let user = sample_user();

    let projection = process_user(&env.crypto, &user).await.unwrap();

    let mut tampered = projection.clone();
    let middle = tampered.name_encrypted.len() / 2;
    tampered.name_encrypted[middle] ^= 0x01;

    let err = decrypt_user(&env.crypto, &tampered).await.unwrap_err();
    match err {
        EncxError::ProcessingFailed(message) => {
            assert!(message.contains("field `name`"));
            assert!(message.contains("Authentication failed"));
        }
        other => panic!("expected aggregated processing failure, got {:?}", other),
    }

    // The untampered projection is unaffected.
    let decrypted = decrypt_user(&env.crypto, &projection).await.unwrap();
    assert_eq!(decrypted.name, "John Doe");
}

#[tokio::test]
async fn records_processed_before_rotation_still_decrypt() {
    let env = common::test_env().await;
    let user = sample_user();

    let before = process_user(&env.crypto, &user).await.unwrap();
    assert_eq!(before.key_version, 1);

    env.crypto.rotate_kek().await.unwrap();

    let after = process_user(&env.crypto, &user).await.unwrap();
    assert_eq!(after.key_version, 2);

    let decrypted = decrypt_user(&env.crypto, &before).await.unwrap();
    assert_eq!(decrypted.name, "John Doe");
}

#[tokio::test]
async fn projections_serialize_for_persistence() {
    let env = common::test_env().await;
    let projection = process_user(&env.crypto, &sample_user()).await.unwrap();

    let json = serde_json::to_string(&projection).unwrap();
    let restored: super::user_encx::UserEncx = serde_json::from_str(&json).unwrap();

    let decrypted = decrypt_user(&env.crypto, &restored).await.unwrap();
    assert_eq!(decrypted.email, "user@example.com");
}
