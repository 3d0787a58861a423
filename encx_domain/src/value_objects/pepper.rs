// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Pepper
//!
//! The pepper is a fixed 32-byte secret mixed into every secure hash to
//! frustrate offline attacks against a stolen hash store. It is produced
//! externally (generated once and kept in the secret store), loaded at
//! facade construction, and held in memory for the facade's lifetime.
//!
//! An all-zero pepper indicates misconfiguration — a store that returned
//! uninitialized memory or a placeholder value — and is rejected both at
//! load time and again by the secure hasher.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::EncxError;

/// A 32-byte secure-hash secret, zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Pepper {
    bytes: [u8; Pepper::LEN],
}

impl Pepper {
    /// Size of a pepper in bytes.
    pub const LEN: usize = 32;

    /// Wraps raw pepper bytes without the all-zero check. Used by stores
    /// that need to round-trip whatever they persisted; callers that care
    /// about usability gate on [`Pepper::is_uninitialized`].
    pub fn new(bytes: [u8; Pepper::LEN]) -> Self {
        Self { bytes }
    }

    /// Builds a pepper from a byte slice, rejecting any length other
    /// than 32.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EncxError> {
        if bytes.len() != Pepper::LEN {
            return Err(EncxError::invalid_config(format!(
                "invalid pepper length: expected {} bytes, got {}",
                Pepper::LEN,
                bytes.len()
            )));
        }
        let mut pepper = [0u8; Pepper::LEN];
        pepper.copy_from_slice(bytes);
        Ok(Self { bytes: pepper })
    }

    /// True when the pepper is all zero, i.e. never actually provisioned.
    pub fn is_uninitialized(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }

    /// Read-only view of the pepper bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Pepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Pepper(<redacted>)")
    }
}
