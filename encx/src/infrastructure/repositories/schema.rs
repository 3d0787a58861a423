// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite schema helpers for the KEK metadata store.
//!
//! Applies the schema on start-up so facades, tools, and integration
//! tests see a consistent database. All statements are idempotent, so
//! concurrent construction against the same file is safe.

use sqlx::migrate::MigrateDatabase;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// DDL for the versioned KEK directory.
const KEK_VERSIONS_DDL: &str = "CREATE TABLE IF NOT EXISTS kek_versions (
    alias         TEXT    NOT NULL,
    version       INTEGER NOT NULL,
    kms_key_id    TEXT    NOT NULL,
    is_deprecated INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT    NOT NULL,
    PRIMARY KEY (alias, version)
)";

const KEK_VERSIONS_ACTIVE_INDEX_DDL: &str = "CREATE INDEX IF NOT EXISTS idx_kek_versions_active
    ON kek_versions (alias, is_deprecated)";

/// Applies the schema against the provided SQLite pool.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Ensuring database schema is up to date");

    sqlx::query(KEK_VERSIONS_DDL).execute(pool).await?;
    sqlx::query(KEK_VERSIONS_ACTIVE_INDEX_DDL).execute(pool).await?;

    debug!("Database schema is up to date");
    Ok(())
}

/// Creates a new SQLite database file if it doesn't exist.
///
/// `SqlitePool::connect` fails when the file is missing, so callers that
/// may run against a fresh path go through here first.
pub async fn create_database_if_missing(database_url: &str) -> Result<(), sqlx::Error> {
    if !sqlx::Sqlite::database_exists(database_url).await? {
        debug!("Database does not exist, creating: {}", database_url);
        sqlx::Sqlite::create_database(database_url).await?;
        info!("Created new SQLite database: {}", database_url);
    } else {
        debug!("Database already exists: {}", database_url);
    }
    Ok(())
}

/// Creates the database if needed, connects, and applies the schema.
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_database_if_missing(database_url).await?;
    let pool = SqlitePool::connect(database_url).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn initialize_creates_file_and_schema() {
        let dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", dir.path().join("meta.db").display());

        let pool = initialize_database(&db_url).await.unwrap();

        let count: i32 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='kek_versions'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1, "kek_versions table should exist");
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", dir.path().join("meta.db").display());

        let pool = initialize_database(&db_url).await.unwrap();
        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn create_database_if_missing_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", dir.path().join("meta.db").display());

        create_database_if_missing(&db_url).await.unwrap();
        create_database_if_missing(&db_url).await.unwrap();
    }
}
