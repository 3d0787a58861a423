// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Encx Domain
//!
//! The encx domain crate holds the pure business logic of field-level
//! envelope encryption: what a data-encryption key is, what a key version
//! history looks like, how field values map deterministically onto bytes,
//! and which contracts the external key infrastructure must satisfy. It is
//! completely independent of concrete cryptography backends, databases,
//! and user interfaces.
//!
//! ## Module Structure
//!
//! - [`error`] — the `EncxError` taxonomy shared by every layer
//! - [`entities`] — `KekVersionRecord`, the persisted key-version entity
//! - [`value_objects`] — self-validating immutable values: [`Dek`],
//!   [`Pepper`], [`KekAlias`], [`KeyVersion`], [`Argon2Params`],
//!   [`WrappedDek`]
//! - [`services`] — the deterministic [`FieldCodec`] and the
//!   [`KmsService`] / [`SecretStore`] ports
//! - [`repositories`] — the [`KekRepository`] port over the version
//!   metadata store
//!
//! ## Design Rules
//!
//! - Value objects validate themselves at construction and never expose a
//!   broken state.
//! - Key material (`Dek`, `Pepper`) is zeroized on drop and never appears
//!   in `Debug` output or error messages.
//! - CPU-bound domain services are synchronous; only the ports that talk
//!   to remote or stored state are async.

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-export commonly used types for convenient access
// These exports provide a clean API surface for consumers of the domain layer
pub use entities::KekVersionRecord;
pub use error::EncxError;
pub use repositories::KekRepository;
pub use services::{FieldCodec, KmsService, SecretStore};
pub use value_objects::{Argon2Params, Dek, KekAlias, KeyVersion, Pepper, WrappedDek};
