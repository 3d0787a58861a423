// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Argon2 Parameters
//!
//! Cost profile for the argon2id secure hasher. The floors follow the
//! OWASP minimum recommendation for argon2id (19 MiB / 2 iterations /
//! 1 lane); profiles below the floor are rejected at construction so a
//! facade can never be built with weak password hashing.
//!
//! The default profile (64 MiB, 3 iterations, 2 lanes, 16-byte salt,
//! 32-byte output) trades tens of milliseconds per hash for GPU/ASIC
//! resistance.

use serde::{Deserialize, Serialize};

use crate::error::EncxError;

/// Validated argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Params {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over the memory.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
    /// Salt length in bytes, drawn fresh per hash.
    pub salt_length: usize,
    /// Output digest length in bytes.
    pub output_length: usize,
}

impl Argon2Params {
    /// Minimum memory cost: 19 MiB.
    pub const MIN_MEMORY_KIB: u32 = 19 * 1024;
    /// Minimum iteration count.
    pub const MIN_ITERATIONS: u32 = 2;
    /// Minimum parallelism.
    pub const MIN_PARALLELISM: u32 = 1;
    /// Minimum salt length in bytes.
    pub const MIN_SALT_LENGTH: usize = 16;
    /// Minimum output length in bytes.
    pub const MIN_OUTPUT_LENGTH: usize = 32;

    /// Creates a validated parameter set.
    pub fn new(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
        salt_length: usize,
        output_length: usize,
    ) -> Result<Self, EncxError> {
        let params = Self {
            memory_kib,
            iterations,
            parallelism,
            salt_length,
            output_length,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the profile against the floors.
    pub fn validate(&self) -> Result<(), EncxError> {
        if self.memory_kib < Self::MIN_MEMORY_KIB {
            return Err(EncxError::invalid_config(format!(
                "argon2 memory cost {} KiB below minimum {} KiB",
                self.memory_kib,
                Self::MIN_MEMORY_KIB
            )));
        }
        if self.iterations < Self::MIN_ITERATIONS {
            return Err(EncxError::invalid_config(format!(
                "argon2 iteration count {} below minimum {}",
                self.iterations,
                Self::MIN_ITERATIONS
            )));
        }
        if self.parallelism < Self::MIN_PARALLELISM {
            return Err(EncxError::invalid_config(format!(
                "argon2 parallelism {} below minimum {}",
                self.parallelism,
                Self::MIN_PARALLELISM
            )));
        }
        if self.salt_length < Self::MIN_SALT_LENGTH {
            return Err(EncxError::invalid_config(format!(
                "argon2 salt length {} below minimum {}",
                self.salt_length,
                Self::MIN_SALT_LENGTH
            )));
        }
        if self.output_length < Self::MIN_OUTPUT_LENGTH {
            return Err(EncxError::invalid_config(format!(
                "argon2 output length {} below minimum {}",
                self.output_length,
                Self::MIN_OUTPUT_LENGTH
            )));
        }
        Ok(())
    }
}

impl Default for Argon2Params {
    /// The default profile: 64 MiB, 3 iterations, 2 lanes, 16-byte salt,
    /// 32-byte output.
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 2,
            salt_length: 16,
            output_length: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        Argon2Params::default().validate().unwrap();
    }

    #[test]
    fn floors_are_enforced() {
        assert!(Argon2Params::new(1024, 3, 2, 16, 32).is_err());
        assert!(Argon2Params::new(65536, 1, 2, 16, 32).is_err());
        assert!(Argon2Params::new(65536, 3, 0, 16, 32).is_err());
        assert!(Argon2Params::new(65536, 3, 2, 8, 32).is_err());
        assert!(Argon2Params::new(65536, 3, 2, 16, 16).is_err());
    }

    #[test]
    fn floor_values_are_accepted() {
        Argon2Params::new(
            Argon2Params::MIN_MEMORY_KIB,
            Argon2Params::MIN_ITERATIONS,
            Argon2Params::MIN_PARALLELISM,
            Argon2Params::MIN_SALT_LENGTH,
            Argon2Params::MIN_OUTPUT_LENGTH,
        )
        .unwrap();
    }
}
