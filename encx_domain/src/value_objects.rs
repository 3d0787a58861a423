// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Value Objects
//!
//! Immutable, self-validating values of the encryption domain. Two value
//! objects with the same attributes are equal; none of them can be
//! constructed in an invalid state.
//!
//! - [`Dek`] — a 32-byte data-encryption key, zeroized on drop
//! - [`Pepper`] — the 32-byte secure-hash secret, zeroized on drop
//! - [`KekAlias`] — validated alias binding a service to a key family
//! - [`KeyVersion`] — positive, monotonically increasing KEK version
//! - [`Argon2Params`] — argon2id cost profile with enforced floors
//! - [`WrappedDek`] — an envelope-encrypted DEK with its version stamp

pub mod argon2_params;
pub mod dek;
pub mod kek_alias;
pub mod key_version;
pub mod pepper;
pub mod wrapped_dek;

pub use argon2_params::Argon2Params;
pub use dek::Dek;
pub use kek_alias::KekAlias;
pub use key_version::KeyVersion;
pub use pepper::Pepper;
pub use wrapped_dek::WrappedDek;
