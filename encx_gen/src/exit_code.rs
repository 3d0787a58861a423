// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Code Management
//!
//! Standardized Unix exit codes following BSD `sysexits.h` conventions:
//!
//! - **0**: Success
//! - **1**: General error
//! - **64**: Command line usage error
//! - **65**: Input data failed validation
//! - **74**: I/O error
//! - **78**: Configuration error

use std::fmt;

use crate::error::GenError;

/// Exit codes following Unix conventions (BSD sysexits.h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful termination (0)
    #[default]
    Success = 0,

    /// General error (1)
    Error = 1,

    /// Command line usage error (64)
    UsageError = 64,

    /// Input data error (65): sources failed validation
    DataError = 65,

    /// Input/output error (74)
    IoError = 74,

    /// Configuration error (78)
    ConfigError = 78,
}

impl ExitCode {
    /// The raw process exit code.
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Maps a generator error to its exit code.
    pub fn from_error(err: &GenError) -> Self {
        match err {
            GenError::Io(_) => ExitCode::IoError,
            GenError::Parse { .. } => ExitCode::DataError,
            GenError::Validation(_) => ExitCode::DataError,
            GenError::Config(_) => ExitCode::ConfigError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExitCode::Success => "success",
            ExitCode::Error => "error",
            ExitCode::UsageError => "usage error",
            ExitCode::DataError => "data error",
            ExitCode::IoError => "io error",
            ExitCode::ConfigError => "configuration error",
        };
        write!(f, "{} ({})", name, self.as_i32())
    }
}
