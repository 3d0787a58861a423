// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SQLite KEK Repository
//!
//! Persistent directory of KEK versions over a `sqlx` SQLite pool. Every
//! query is a prepared statement; all mutation happens in transactions.
//!
//! ## Rotation concurrency
//!
//! `rotate` reads the current version `N` outside the write transaction,
//! then opens a transaction whose first statement inserts
//! `(alias, N + 1)`. SQLite serializes writers, and the `(alias, version)`
//! primary key turns every concurrent rotation that observed the same `N`
//! into a unique-constraint violation, reported as
//! [`EncxError::VersionConflict`]. Exactly one caller wins; losers can
//! re-read the current version and decide whether rotating again is still
//! meaningful.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use encx_domain::{EncxError, KekAlias, KekRepository, KekVersionRecord, KeyVersion};

use super::schema;

/// SQLite-backed implementation of the KEK metadata store.
pub struct SqliteKekRepository {
    pool: SqlitePool,
}

impl SqliteKekRepository {
    /// Wraps an existing pool. The schema must already be applied (see
    /// [`schema::ensure_schema`]).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the database if needed, applies the schema, and returns a
    /// ready repository.
    pub async fn from_url(database_url: &str) -> Result<Self, EncxError> {
        let pool = schema::initialize_database(database_url)
            .await
            .map_err(|e| EncxError::database(format!("failed to initialize metadata store: {}", e)))?;
        Ok(Self::new(pool))
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn map_query_error(action: &str, e: sqlx::Error) -> EncxError {
        EncxError::database(format!("{}: {}", action, e))
    }

    fn is_unique_violation(e: &sqlx::Error) -> bool {
        matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
    }

    fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<KekVersionRecord, EncxError> {
        let alias = KekAlias::new(row.get::<String, _>("alias"))?;
        let version = KeyVersion::new(row.get::<i64, _>("version"))?;
        let kms_key_id: String = row.get("kms_key_id");
        let is_deprecated: bool = row.get("is_deprecated");
        let created_at: DateTime<Utc> = row.get("created_at");
        Ok(KekVersionRecord {
            alias,
            version,
            kms_key_id,
            is_deprecated,
            created_at,
        })
    }
}

#[async_trait]
impl KekRepository for SqliteKekRepository {
    async fn current_version(&self, alias: &KekAlias) -> Result<KeyVersion, EncxError> {
        let max: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(version) FROM kek_versions WHERE alias = ?1 AND is_deprecated = 0",
        )
        .bind(alias.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_query_error("failed to read current KEK version", e))?;

        match max {
            Some(version) => KeyVersion::new(version),
            None => Err(EncxError::NotInitialized(format!(
                "no KEK version recorded for alias '{}'",
                alias
            ))),
        }
    }

    async fn resolve_kms_key_id(&self, alias: &KekAlias, version: KeyVersion) -> Result<String, EncxError> {
        let key_id: Option<String> = sqlx::query_scalar(
            "SELECT kms_key_id FROM kek_versions WHERE alias = ?1 AND version = ?2",
        )
        .bind(alias.as_str())
        .bind(version.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_query_error("failed to resolve KMS key id", e))?;

        key_id.ok_or_else(|| {
            EncxError::NotInitialized(format!(
                "no KEK version {} recorded for alias '{}'",
                version, alias
            ))
        })
    }

    async fn append_version(
        &self,
        alias: &KekAlias,
        version: KeyVersion,
        kms_key_id: &str,
    ) -> Result<(), EncxError> {
        let result = sqlx::query(
            "INSERT INTO kek_versions (alias, version, kms_key_id, is_deprecated, created_at)
             VALUES (?1, ?2, ?3, 0, ?4)",
        )
        .bind(alias.as_str())
        .bind(version.get())
        .bind(kms_key_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!(alias = %alias, version = %version, "appended KEK version");
                Ok(())
            }
            Err(e) if Self::is_unique_violation(&e) => Err(EncxError::version_conflict(format!(
                "KEK version {} already exists for alias '{}'",
                version, alias
            ))),
            Err(e) => Err(Self::map_query_error("failed to append KEK version", e)),
        }
    }

    async fn deprecate_version(&self, alias: &KekAlias, version: KeyVersion) -> Result<(), EncxError> {
        sqlx::query("UPDATE kek_versions SET is_deprecated = 1 WHERE alias = ?1 AND version = ?2")
            .bind(alias.as_str())
            .bind(version.get())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_query_error("failed to deprecate KEK version", e))?;
        Ok(())
    }

    async fn rotate(&self, alias: &KekAlias, new_kms_key_id: &str) -> Result<KeyVersion, EncxError> {
        let current = self.current_version(alias).await?;
        let next = current.next();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Self::map_query_error("failed to begin rotation transaction", e))?;

        // The insert is the transaction's first statement, so the write
        // lock is taken here and the primary key decides the winner among
        // concurrent rotations that observed the same current version.
        let insert = sqlx::query(
            "INSERT INTO kek_versions (alias, version, kms_key_id, is_deprecated, created_at)
             VALUES (?1, ?2, ?3, 0, ?4)",
        )
        .bind(alias.as_str())
        .bind(next.get())
        .bind(new_kms_key_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert {
            if Self::is_unique_violation(&e) {
                return Err(EncxError::version_conflict(format!(
                    "concurrent rotation won for alias '{}': version {} already exists",
                    alias, next
                )));
            }
            return Err(Self::map_query_error("failed to insert rotated KEK version", e));
        }

        sqlx::query("UPDATE kek_versions SET is_deprecated = 1 WHERE alias = ?1 AND version = ?2")
            .bind(alias.as_str())
            .bind(current.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::map_query_error("failed to deprecate previous KEK version", e))?;

        tx.commit()
            .await
            .map_err(|e| Self::map_query_error("failed to commit rotation", e))?;

        info!(alias = %alias, from = %current, to = %next, "rotated KEK");
        Ok(next)
    }

    async fn list_versions(&self, alias: &KekAlias) -> Result<Vec<KekVersionRecord>, EncxError> {
        let rows = sqlx::query(
            "SELECT alias, version, kms_key_id, is_deprecated, created_at
             FROM kek_versions WHERE alias = ?1 ORDER BY version ASC",
        )
        .bind(alias.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Self::map_query_error("failed to list KEK versions", e))?;

        rows.iter().map(Self::record_from_row).collect()
    }
}
