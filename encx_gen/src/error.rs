// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Generator error types and source-positioned diagnostics.

use std::path::PathBuf;

use thiserror::Error;

/// A validation finding anchored to a source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file.display(),
            self.line,
            self.column,
            self.message
        )
    }
}

/// Errors the generator can produce.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("parse error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("validation failed with {} diagnostic(s)", .0.len())]
    Validation(Vec<Diagnostic>),

    #[error("invalid generator configuration: {0}")]
    Config(String),
}

impl From<std::io::Error> for GenError {
    fn from(err: std::io::Error) -> Self {
        GenError::Io(err.to_string())
    }
}
