// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # File Secret Store
//!
//! A [`SecretStore`] that keeps peppers on the local filesystem at
//! `<base>/<alias>/pepper.bin`. Intended for development machines and
//! single-host deployments; anything multi-host should sit behind a real
//! secret manager implementing the same port.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use encx_domain::{EncxError, Pepper, SecretStore};

/// Filesystem-backed pepper storage.
pub struct FileSecretStore {
    base_dir: PathBuf,
}

impl FileSecretStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn pepper_path(&self, alias: &str) -> PathBuf {
        self.base_dir.join(alias).join("pepper.bin")
    }

    async fn ensure_parent(path: &Path) -> Result<(), EncxError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| EncxError::IoError(format!("failed to create secret directory: {}", e)))?;
        }
        Ok(())
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn store_pepper(&self, alias: &str, pepper: &Pepper) -> Result<(), EncxError> {
        let path = self.pepper_path(alias);
        Self::ensure_parent(&path).await?;
        fs::write(&path, pepper.as_bytes())
            .await
            .map_err(|e| EncxError::IoError(format!("failed to write pepper: {}", e)))?;
        Ok(())
    }

    async fn get_pepper(&self, alias: &str) -> Result<Pepper, EncxError> {
        let path = self.pepper_path(alias);
        let bytes = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EncxError::NotInitialized(format!("no pepper stored for alias '{}'", alias))
            } else {
                EncxError::IoError(format!("failed to read pepper: {}", e))
            }
        })?;
        Pepper::from_slice(&bytes)
    }

    async fn pepper_exists(&self, alias: &str) -> Result<bool, EncxError> {
        let path = self.pepper_path(alias);
        fs::try_exists(&path)
            .await
            .map_err(|e| EncxError::IoError(format!("failed to check pepper path: {}", e)))
    }

    fn storage_path(&self, alias: &str) -> String {
        self.pepper_path(alias).display().to_string()
    }
}
