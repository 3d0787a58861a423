// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Environment Config Loader
//!
//! Thin loader building a [`CryptoConfig`] from `ENCX_*` environment
//! variables. The aliases are required; the database location falls back
//! to the config defaults.
//!
//! | Variable             | Meaning                         | Required |
//! |----------------------|---------------------------------|----------|
//! | `ENCX_KEK_ALIAS`     | KEK alias                       | yes      |
//! | `ENCX_PEPPER_ALIAS`  | Pepper alias                    | yes      |
//! | `ENCX_DB_PATH`       | Metadata database directory     | no       |
//! | `ENCX_DB_FILENAME`   | Metadata database filename      | no       |

use std::env;
use std::path::PathBuf;

use encx_domain::EncxError;

use crate::application::config::CryptoConfig;

pub const ENV_KEK_ALIAS: &str = "ENCX_KEK_ALIAS";
pub const ENV_PEPPER_ALIAS: &str = "ENCX_PEPPER_ALIAS";
pub const ENV_DB_PATH: &str = "ENCX_DB_PATH";
pub const ENV_DB_FILENAME: &str = "ENCX_DB_FILENAME";

fn required(name: &str) -> Result<String, EncxError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(EncxError::invalid_config(format!(
            "environment variable {} is required",
            name
        ))),
    }
}

/// Builds a validated [`CryptoConfig`] from the environment.
pub fn config_from_env() -> Result<CryptoConfig, EncxError> {
    let mut config = CryptoConfig::new(required(ENV_KEK_ALIAS)?, required(ENV_PEPPER_ALIAS)?);

    if let Ok(path) = env::var(ENV_DB_PATH) {
        if !path.trim().is_empty() {
            config.db_path = PathBuf::from(path);
        }
    }
    if let Ok(filename) = env::var(ENV_DB_FILENAME) {
        if !filename.trim().is_empty() {
            config.db_filename = filename;
        }
    }

    config.validate()?;
    Ok(config)
}
