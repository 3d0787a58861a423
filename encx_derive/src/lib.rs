// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # encx-derive
//!
//! The inert `#[derive(Encx)]` macro. It expands to nothing; its sole
//! purpose is registering `encx` as a helper attribute so record types
//! can carry `#[encx(encrypt)]`, `#[encx(hash_basic)]`, and
//! `#[encx(hash_secure)]` field annotations as legal Rust.
//!
//! The annotations themselves are consumed at build time by the
//! `encx-gen` tool, which parses the package sources and emits the
//! encrypted-projection type plus `process_*` / `decrypt_*` functions.
//! Keeping the derive empty keeps compilation of annotated crates free
//! of any code-generation cost or ordering constraint.
//!
//! ```ignore
//! use encx::Encx;
//!
//! #[derive(Debug, Clone, Default, Encx)]
//! pub struct User {
//!     pub id: i64,
//!     #[encx(encrypt)]
//!     pub name: String,
//!     #[encx(encrypt, hash_basic)]
//!     pub email: String,
//!     #[encx(hash_secure)]
//!     pub password: String,
//! }
//! ```

use proc_macro::TokenStream;

/// Registers the `encx` helper attribute. Expands to nothing; tag
/// validation and code emission happen in `encx-gen`.
#[proc_macro_derive(Encx, attributes(encx))]
pub fn derive_encx(_input: TokenStream) -> TokenStream {
    TokenStream::new()
}
