// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # encx-gen
//!
//! Build-time code generator for the encx envelope-encryption library.
//! It parses the Rust sources of configured packages, finds struct types
//! whose fields carry `#[encx(...)]` capability tags, validates the tags
//! and field types, and emits one generated source file per package with:
//!
//! - an encrypted-projection struct per record (`UserEncx` for `User`)
//! - an async `process_user` function that serializes, encrypts, and
//!   hashes the tagged fields under a fresh DEK and stamps the KEK
//!   version
//! - an async `decrypt_user` function that reverses the projection using
//!   the stamped version
//!
//! Generated functions call statically typed facade primitives — no
//! runtime reflection, no per-field type switches. Re-running the
//! generator on unchanged sources produces byte-identical output.
//!
//! ## Pipeline
//!
//! ```text
//! encx.yaml ──► config ──► analyzer (syn) ──► emitter ──► <package>_encx.rs
//!                              │
//!                              └── diagnostics (file:line:column), all
//!                                  collected before emission is abandoned
//! ```

pub mod analyzer;
pub mod config;
pub mod emitter;
pub mod error;
pub mod exit_code;
pub mod generator;

pub use analyzer::{analyze_package, AnalyzedPackage, FieldKind, RecordField, RecordType, TagSet};
pub use config::{GenConfig, PackageConfig};
pub use emitter::emit_package;
pub use error::{Diagnostic, GenError};
pub use exit_code::ExitCode;
