// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! KEK rotation: version monotonicity, historical decryption, and
//! single-winner semantics under concurrent rotation.

use std::sync::Arc;

use tokio::sync::Barrier;

use encx::{EncxError, KeyVersion};

use super::common;

#[tokio::test]
async fn rotation_promotes_new_version_and_keeps_history_decryptable() {
    let env = common::test_env().await;

    // Wrap a DEK at version 1.
    let dek_v1 = env.crypto.generate_dek().unwrap();
    let wrapped_v1 = env.crypto.encrypt_dek(&dek_v1).await.unwrap();
    assert_eq!(wrapped_v1.key_version.get(), 1);

    // Rotate and wrap another; the new record stamps version 2.
    let rotated = env.crypto.rotate_kek().await.unwrap();
    assert_eq!(rotated.get(), 2);
    assert_eq!(env.crypto.current_key_version().await.unwrap().get(), 2);

    let dek_v2 = env.crypto.generate_dek().unwrap();
    let wrapped_v2 = env.crypto.encrypt_dek(&dek_v2).await.unwrap();
    assert_eq!(wrapped_v2.key_version.get(), 2);

    // The record from before the rotation still unwraps via its stamp.
    let unwrapped = env
        .crypto
        .decrypt_dek_with_version(&wrapped_v1.ciphertext, wrapped_v1.key_version)
        .await
        .unwrap();
    assert_eq!(unwrapped.as_bytes(), dek_v1.as_bytes());
}

#[tokio::test]
async fn versions_stay_contiguous_with_one_current() {
    let env = common::test_env().await;

    for _ in 0..4 {
        env.crypto.rotate_kek().await.unwrap();
    }

    let versions = env.crypto.list_kek_versions().await.unwrap();
    let numbers: Vec<i64> = versions.iter().map(|r| r.version.get()).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

    let active: Vec<i64> = versions
        .iter()
        .filter(|r| !r.is_deprecated)
        .map(|r| r.version.get())
        .collect();
    assert_eq!(active, vec![5]);
}

#[tokio::test]
async fn multiple_rotations_preserve_old_wraps() {
    let env = common::test_env().await;

    let dek = env.crypto.generate_dek().unwrap();
    let wrapped = env.crypto.encrypt_dek(&dek).await.unwrap();

    env.crypto.rotate_kek().await.unwrap();
    env.crypto.rotate_kek().await.unwrap();

    let unwrapped = env
        .crypto
        .decrypt_dek_with_version(&wrapped.ciphertext, wrapped.key_version)
        .await
        .unwrap();
    assert_eq!(unwrapped.as_bytes(), dek.as_bytes());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_rotation_has_exactly_one_winner() {
    let env = common::test_env().await;

    // Advance to version 3 first, per the canonical scenario.
    env.crypto.rotate_kek().await.unwrap();
    env.crypto.rotate_kek().await.unwrap();
    assert_eq!(env.crypto.current_key_version().await.unwrap().get(), 3);

    let contenders = 10;
    let barrier = Arc::new(Barrier::new(contenders));
    let mut handles = Vec::new();
    for _ in 0..contenders {
        let crypto = env.crypto.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            crypto.rotate_kek().await
        }));
    }

    let mut winners = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(version) => {
                assert_eq!(version.get(), 4);
                winners += 1;
            }
            Err(EncxError::VersionConflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected rotation error: {:?}", other),
        }
    }

    assert_eq!(winners, 1, "exactly one concurrent rotation must win");
    assert_eq!(conflicts, contenders - 1);
    assert_eq!(env.crypto.current_key_version().await.unwrap(), KeyVersion::new(4).unwrap());

    // Every contender created a KMS key first; losers leave orphans
    // behind, which are tolerated: bootstrap + 2 setup rotations + 10.
    assert_eq!(env.kms.key_count(), 13);

    // Versions remain contiguous with a single active entry.
    let versions = env.crypto.list_kek_versions().await.unwrap();
    let numbers: Vec<i64> = versions.iter().map(|r| r.version.get()).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert_eq!(versions.iter().filter(|r| !r.is_deprecated).count(), 1);
}

#[tokio::test]
async fn loser_can_observe_the_advanced_version_instead_of_retrying() {
    let env = common::test_env().await;

    // Simulate losing a race: the version the loser would have created
    // already exists.
    let before = env.crypto.current_key_version().await.unwrap();
    env.crypto.rotate_kek().await.unwrap();

    let after = env.crypto.current_key_version().await.unwrap();
    assert_eq!(after, before.next());
}
