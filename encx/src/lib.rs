// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Encx
//!
//! Field-level envelope encryption for annotated record types. Application
//! code tags struct fields with capabilities (`encrypt`, `hash_basic`,
//! `hash_secure`); the `encx-gen` tool emits a parallel "encrypted
//! projection" type per record plus `process_*` / `decrypt_*` functions,
//! and those functions drive the [`Crypto`] facade exported here.
//!
//! ## What a projection holds
//!
//! For every tagged source field the projection carries AEAD ciphertext
//! (`<field>_encrypted`), a searchable SHA-256 hex hash (`<field>_hash`),
//! or a PHC-encoded argon2id hash (`<field>_hash_secure`), plus three
//! fixed fields: the record's envelope-encrypted DEK, the KEK version
//! that wrapped it, and a reserved metadata blob. Untagged fields are
//! copied verbatim.
//!
//! ## Layers
//!
//! - `application` — the validated [`CryptoConfig`] and the thread-safe
//!   [`Crypto`] facade
//! - `infrastructure` — AES-256-GCM engine, framed streaming, hashing,
//!   the SQLite KEK metadata repository, in-process KMS / secret-store
//!   adapters, and the environment config loader
//!
//! The pure domain types (errors, value objects, the deterministic
//! [`FieldCodec`], the external-service ports) live in the `encx-domain`
//! crate and are re-exported here so generated code needs a single
//! dependency.
//!
//! ## Construction
//!
//! A facade is built fail-fast from a validated config plus the two
//! external services: open/create the metadata store, load (or
//! self-provision) the pepper, and bootstrap KEK version 1 idempotently.
//! The handle is cheap to clone and safe to share across tasks.

pub mod application;
pub mod infrastructure;

// Re-export the domain surface generated code and applications depend on.
pub use encx_domain::{
    Argon2Params, Dek, EncxError, FieldCodec, KekAlias, KekRepository, KekVersionRecord,
    KeyVersion, KmsService, Pepper, SecretStore, WrappedDek,
};

// The inert derive that registers the #[encx(...)] field annotations.
pub use encx_derive::Encx;

pub use application::config::CryptoConfig;
pub use application::crypto::Crypto;
