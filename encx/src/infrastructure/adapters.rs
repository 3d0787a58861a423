// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Infrastructure adapters: the AEAD engine, streaming frames, hashing,
//! and in-process stand-ins for the external key services.

pub mod aead;
pub mod file_secret_store;
pub mod hashing;
pub mod in_memory_kms;
pub mod streaming;

pub use aead::AeadEngine;
pub use file_secret_store::FileSecretStore;
pub use hashing::SecureHasher;
pub use in_memory_kms::InMemoryKms;
