// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Generator Configuration
//!
//! `encx.yaml` describes where the annotated packages live, the suffix of
//! the generated files, and which record types to skip per package:
//!
//! ```yaml
//! version: 1
//! output_suffix: "_encx"
//! packages:
//!   - path: "src/models"
//!     skip_types:
//!       - "AuditLog"
//! ```
//!
//! The generated file for a package lands adjacent to its sources as
//! `<dir_name><output_suffix>.rs` and is meant to be declared as a module
//! of the package (`mod models_encx;`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// Default name of the generator configuration file.
pub const DEFAULT_CONFIG_FILENAME: &str = "encx.yaml";

/// Starter configuration written by `encx-gen init`.
pub const STARTER_CONFIG: &str = "# encx-gen configuration\nversion: 1\n\n# Suffix of the generated file; `src/models` becomes `src/models/models_encx.rs`.\noutput_suffix: \"_encx\"\n\n# Packages to scan for #[encx(...)] annotated record types.\npackages:\n  - path: \"src/models\"\n    skip_types: []\n";

fn default_version() -> u32 {
    1
}

fn default_output_suffix() -> String {
    "_encx".to_string()
}

/// One package directory to scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Directory containing the annotated sources.
    pub path: PathBuf,
    /// Record type names to exclude from generation.
    #[serde(default)]
    pub skip_types: Vec<String>,
}

impl PackageConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            skip_types: Vec::new(),
        }
    }
}

/// The parsed `encx.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
    #[serde(default)]
    pub packages: Vec<PackageConfig>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            output_suffix: default_output_suffix(),
            packages: Vec::new(),
        }
    }
}

impl GenConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GenError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: GenConfig = serde_yaml::from_str(&contents)
            .map_err(|e| GenError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks structural invariants of the configuration.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.version != 1 {
            return Err(GenError::Config(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }
        if self.output_suffix.is_empty() {
            return Err(GenError::Config("output_suffix must not be empty".to_string()));
        }
        let ident_safe = self
            .output_suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !ident_safe {
            return Err(GenError::Config(format!(
                "output_suffix '{}' must be a valid identifier fragment",
                self.output_suffix
            )));
        }
        Ok(())
    }

    /// Name of the generated file for a package directory.
    pub fn output_filename(&self, package_dir: &Path) -> Result<String, GenError> {
        let base = package_dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                GenError::Config(format!(
                    "package path '{}' has no usable directory name",
                    package_dir.display()
                ))
            })?;
        Ok(format!("{}{}.rs", base, self.output_suffix))
    }
}
