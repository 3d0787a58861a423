// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! DEK envelope operations through the facade: wrapping under the
//! current version, unwrapping with a stamped version, and buffered and
//! streaming payload encryption.

use encx::{EncxError, KeyVersion};

use super::common;

#[tokio::test]
async fn wrap_and_unwrap_round_trips_under_version_one() {
    let env = common::test_env().await;

    let dek = env.crypto.generate_dek().unwrap();
    let wrapped = env.crypto.encrypt_dek(&dek).await.unwrap();
    assert!(!wrapped.ciphertext.is_empty());
    assert_eq!(wrapped.key_version, KeyVersion::INITIAL);

    let unwrapped = env
        .crypto
        .decrypt_dek_with_version(&wrapped.ciphertext, wrapped.key_version)
        .await
        .unwrap();
    assert_eq!(unwrapped.as_bytes(), dek.as_bytes());
}

#[tokio::test]
async fn unknown_version_is_rejected() {
    let env = common::test_env().await;
    let dek = env.crypto.generate_dek().unwrap();
    let wrapped = env.crypto.encrypt_dek(&dek).await.unwrap();

    let err = env
        .crypto
        .decrypt_dek_with_version(&wrapped.ciphertext, KeyVersion::new(9).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, EncxError::NotInitialized(_)));
}

#[tokio::test]
async fn kms_plaintext_of_wrong_length_is_rejected() {
    let env = common::test_env().await;

    // Wrap a 16-byte value directly through the KMS under the real key,
    // bypassing the facade's DEK type.
    let versions = env.crypto.list_kek_versions().await.unwrap();
    let key_id = &versions[0].kms_key_id;
    let bogus = encx::KmsService::encrypt_dek(env.kms.as_ref(), key_id, &[7u8; 16])
        .await
        .unwrap();

    let err = env
        .crypto
        .decrypt_dek_with_version(&bogus, KeyVersion::INITIAL)
        .await
        .unwrap_err();
    assert!(matches!(err, EncxError::DecryptionError(_)));
}

#[tokio::test]
async fn buffered_payloads_round_trip_through_the_facade() {
    let env = common::test_env().await;
    let dek = env.crypto.generate_dek().unwrap();

    let ciphertext = env.crypto.encrypt_data(b"John Doe", &dek).unwrap();
    assert!(ciphertext.len() > 28);
    assert_eq!(env.crypto.decrypt_data(&ciphertext, &dek).unwrap(), b"John Doe");
}

#[tokio::test]
async fn streams_round_trip_through_the_facade() {
    let env = common::test_env().await;
    let dek = env.crypto.generate_dek().unwrap();
    let payload: Vec<u8> = (0..200_000).map(|i| (i % 251) as u8).collect();

    let mut encrypted = Vec::new();
    let consumed = env
        .crypto
        .encrypt_stream(&mut &payload[..], &mut encrypted, &dek)
        .await
        .unwrap();
    assert_eq!(consumed, payload.len() as u64);

    let mut decrypted = Vec::new();
    env.crypto
        .decrypt_stream(&mut &encrypted[..], &mut decrypted, &dek)
        .await
        .unwrap();
    assert_eq!(decrypted, payload);
}

#[tokio::test]
async fn facade_hashes_match_the_documented_shapes() {
    let env = common::test_env().await;

    let basic = env.crypto.hash_basic(b"user@example.com");
    assert_eq!(basic.len(), 64);
    assert!(basic.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert!(env.crypto.compare_basic_hash_and_value(b"user@example.com", &basic));

    let secure = env.crypto.hash_secure(b"SecurePassword123!").unwrap();
    assert!(secure.starts_with("$argon2id$v=19$m="));
    assert!(env
        .crypto
        .compare_secure_hash_and_value(b"SecurePassword123!", &secure)
        .unwrap());
    assert!(!env
        .crypto
        .compare_secure_hash_and_value(b"WrongPassword", &secure)
        .unwrap());
}
