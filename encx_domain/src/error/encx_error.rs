// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! Hierarchical error type for the encx domain. Every fallible operation
//! in the workspace — serialization, AEAD, hashing, key management,
//! metadata storage, code generation runtime — classifies its failures
//! into one of the variants below.
//!
//! ## Error Categories
//!
//! - **Configuration**: `InvalidConfiguration`, `UninitializedPepper` —
//!   fatal at facade construction, the handle is never returned.
//! - **Validation**: `ValidationError`, `UnsupportedType` — surfaced at
//!   the offending field and aggregated per record.
//! - **Serialization**: `SerializationError` — truncated, malformed, or
//!   type-mismatched byte input.
//! - **Cryptography**: `EncryptionError`, `DecryptionError`,
//!   `AuthenticationFailed`, `HashingError`, `InvalidHashFormat`.
//! - **Key infrastructure**: `KmsError`, `DatabaseError` (both
//!   retryable), `VersionConflict`, `NotInitialized`.
//! - **System**: `IoError`, `ProcessingFailed`, `InternalError`.
//!
//! ## Policy
//!
//! The library never retries internally. Transient failures are
//! identifiable through [`EncxError::is_retryable`] so surrounding
//! reliability layers can decide. Authentication failures are terminal:
//! a tag mismatch means wrong key, wrong version, or tampered data, and
//! retrying cannot fix any of those.
//!
//! Error messages carry component and action context but never key
//! material, plaintext, or hashes.

use thiserror::Error;

/// Domain-specific errors for the encx encryption system.
///
/// Each variant includes a descriptive message and is designed to provide
/// clear information about what went wrong without leaking sensitive data.
#[derive(Error, Debug, Clone)]
pub enum EncxError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Uninitialized pepper: {0}")]
    UninitializedPepper(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Encryption error: {0}")]
    EncryptionError(String),

    #[error("Decryption error: {0}")]
    DecryptionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Invalid hash format: {0}")]
    InvalidHashFormat(String),

    #[error("KMS error: {0}")]
    KmsError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Version conflict: {0}")]
    VersionConflict(String),

    #[error("Not initialized: {0}")]
    NotInitialized(String),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl EncxError {
    /// Creates a new configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Creates a new serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Creates a new encryption error
    pub fn encryption(msg: impl Into<String>) -> Self {
        Self::EncryptionError(msg.into())
    }

    /// Creates a new decryption error
    pub fn decryption(msg: impl Into<String>) -> Self {
        Self::DecryptionError(msg.into())
    }

    /// Creates a new authentication failure
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }

    /// Creates a new hashing error
    pub fn hashing(msg: impl Into<String>) -> Self {
        Self::HashingError(msg.into())
    }

    /// Creates a new KMS error
    pub fn kms(msg: impl Into<String>) -> Self {
        Self::KmsError(msg.into())
    }

    /// Creates a new database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::DatabaseError(msg.into())
    }

    /// Creates a new version conflict error
    pub fn version_conflict(msg: impl Into<String>) -> Self {
        Self::VersionConflict(msg.into())
    }

    /// Creates a new processing error
    pub fn processing_failed(msg: impl Into<String>) -> Self {
        Self::ProcessingFailed(msg.into())
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Checks if the error is a transient condition worth retrying.
    ///
    /// The library itself never retries; this predicate exists so callers
    /// can wrap operations in their own retry or circuit-breaker layers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EncxError::KmsError(_) | EncxError::DatabaseError(_) | EncxError::IoError(_)
        )
    }

    /// Checks if the error is a security-related error
    pub fn is_security_error(&self) -> bool {
        matches!(
            self,
            EncxError::AuthenticationFailed(_) | EncxError::EncryptionError(_) | EncxError::DecryptionError(_)
        )
    }

    /// Gets the error category
    pub fn category(&self) -> &'static str {
        match self {
            EncxError::InvalidConfiguration(_) => "configuration",
            EncxError::UninitializedPepper(_) => "configuration",
            EncxError::ValidationError(_) => "validation",
            EncxError::UnsupportedType(_) => "validation",
            EncxError::SerializationError(_) => "serialization",
            EncxError::EncryptionError(_) => "encryption",
            EncxError::DecryptionError(_) => "decryption",
            EncxError::AuthenticationFailed(_) => "authentication",
            EncxError::HashingError(_) => "hashing",
            EncxError::InvalidHashFormat(_) => "hashing",
            EncxError::KmsError(_) => "kms",
            EncxError::DatabaseError(_) => "database",
            EncxError::VersionConflict(_) => "conflict",
            EncxError::NotInitialized(_) => "initialization",
            EncxError::ProcessingFailed(_) => "processing",
            EncxError::IoError(_) => "io",
            EncxError::InternalError(_) => "internal",
        }
    }
}

// Implement conversion from standard library errors
impl From<std::io::Error> for EncxError {
    fn from(err: std::io::Error) -> Self {
        EncxError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for EncxError {
    fn from(err: serde_json::Error) -> Self {
        EncxError::SerializationError(err.to_string())
    }
}
