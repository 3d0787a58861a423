// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Field Encryption Demo
//!
//! Wires a [`Crypto`] facade with the in-process adapters and walks one
//! value through the full envelope: serialize, encrypt under a fresh DEK,
//! compute the searchable hash, wrap the DEK, rotate the KEK, and
//! decrypt the historical record afterwards.
//!
//! Run with:
//!
//! ```bash
//! cargo run --example field_encryption_demo
//! ```

use std::sync::Arc;

use encx::infrastructure::adapters::{FileSecretStore, InMemoryKms};
use encx::{Crypto, CryptoConfig, FieldCodec};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let workdir = tempfile::TempDir::new()?;
    let kms = Arc::new(InMemoryKms::new());
    let secrets = Arc::new(FileSecretStore::new(workdir.path().join("secrets")));
    let config = CryptoConfig::new("demo-kek", "demo-pepper")
        .with_database(workdir.path().join("db"), "meta.db")
        .with_pepper_provisioning();

    let crypto = Crypto::new(config, kms, secrets).await?;

    // One record, one DEK.
    let email = "user@example.com".to_string();
    let serialized = email.encode()?;

    let dek = crypto.generate_dek()?;
    let ciphertext = crypto.encrypt_data(&serialized, &dek)?;
    let search_hash = crypto.hash_basic(&serialized);
    let wrapped = crypto.encrypt_dek(&dek).await?;

    println!("ciphertext:   {} bytes", ciphertext.len());
    println!("search hash:  {}", search_hash);
    println!("key version:  {}", wrapped.key_version);

    // Rotation does not invalidate the record.
    let rotated = crypto.rotate_kek().await?;
    println!("rotated to:   {}", rotated);

    let recovered_dek = crypto
        .decrypt_dek_with_version(&wrapped.ciphertext, wrapped.key_version)
        .await?;
    let plaintext = crypto.decrypt_data(&ciphertext, &recovered_dek)?;
    let recovered = String::decode(&plaintext)?;
    println!("decrypted:    {}", recovered);

    // Password-style secure hashing with the configured pepper.
    let password_bytes = "SecurePassword123!".to_string().encode()?;
    let phc = crypto.hash_secure(&password_bytes)?;
    println!("secure hash:  {}...", &phc[..32]);
    assert!(crypto.compare_secure_hash_and_value(&password_bytes, &phc)?);

    Ok(())
}
