// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Persistence layer: SQLite-backed KEK metadata storage.

pub mod schema;
pub mod sqlite_kek_repository;

pub use sqlite_kek_repository::SqliteKekRepository;
