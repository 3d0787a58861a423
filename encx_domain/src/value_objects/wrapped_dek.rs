// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! A [`WrappedDek`] pairs the KMS-encrypted ciphertext of a DEK with the
//! KEK version that wrapped it. Projections persist both so decryption
//! can resolve the historical KMS key regardless of later rotations.

use serde::{Deserialize, Serialize};

use crate::value_objects::KeyVersion;

/// An envelope-encrypted data-encryption key and its version stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedDek {
    /// Opaque ciphertext produced by the KMS.
    pub ciphertext: Vec<u8>,
    /// The KEK version the ciphertext was wrapped under.
    pub key_version: KeyVersion,
}

impl WrappedDek {
    /// Pairs DEK ciphertext with the version that produced it.
    pub fn new(ciphertext: Vec<u8>, key_version: KeyVersion) -> Self {
        Self {
            ciphertext,
            key_version,
        }
    }
}
