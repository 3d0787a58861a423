// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Services and Ports
//!
//! - [`field_codec`] — the deterministic field serializer, a pure
//!   synchronous domain service
//! - [`kms_service`] — async port over the external Key Management
//!   Service
//! - [`secret_store`] — async port over the pepper secret store
//!
//! CPU-bound services are sync; ports that reach remote or stored state
//! are async and object-safe so infrastructure can be swapped per
//! deployment.

pub mod field_codec;
pub mod kms_service;
pub mod secret_store;

pub use field_codec::FieldCodec;
pub use kms_service::KmsService;
pub use secret_store::SecretStore;
