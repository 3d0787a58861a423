// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Generation Driver
//!
//! Orchestrates a run: resolve which packages to scan, analyze them all
//! (collecting every diagnostic before failing), emit, and write the
//! generated files adjacent to their sources. Validation always runs
//! before generation; a run with diagnostics writes nothing.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::analyzer::{analyze_package, AnalyzedPackage};
use crate::config::{GenConfig, PackageConfig, DEFAULT_CONFIG_FILENAME, STARTER_CONFIG};
use crate::emitter::emit_package;
use crate::error::GenError;

/// One emitted file, not yet or already written.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// The packages a run operates on: CLI-provided paths win over the
/// config's package list.
pub fn resolve_packages(config: &GenConfig, overrides: &[PathBuf]) -> Result<Vec<PackageConfig>, GenError> {
    let packages: Vec<PackageConfig> = if overrides.is_empty() {
        config.packages.clone()
    } else {
        overrides.iter().map(PackageConfig::new).collect()
    };
    if packages.is_empty() {
        return Err(GenError::Config(
            "no packages configured; list them in encx.yaml or pass paths on the command line".to_string(),
        ));
    }
    Ok(packages)
}

/// Analyzes every package, pooling diagnostics across all of them so a
/// single run reports every problem.
pub fn validate_packages(
    config: &GenConfig,
    packages: &[PackageConfig],
) -> Result<Vec<AnalyzedPackage>, GenError> {
    let mut analyzed = Vec::new();
    let mut diagnostics = Vec::new();

    for package in packages {
        debug!(path = %package.path.display(), "analyzing package");
        match analyze_package(&package.path, &package.skip_types, &config.output_suffix) {
            Ok(result) => analyzed.push(result),
            Err(GenError::Validation(diags)) => diagnostics.extend(diags),
            Err(other) => return Err(other),
        }
    }

    if !diagnostics.is_empty() {
        return Err(GenError::Validation(diagnostics));
    }
    Ok(analyzed)
}

/// Validates and emits, returning the files to write. Packages without
/// annotated records produce no file.
pub fn generate_files(config: &GenConfig, packages: &[PackageConfig]) -> Result<Vec<GeneratedFile>, GenError> {
    let analyzed = validate_packages(config, packages)?;

    let mut files = Vec::new();
    for package in analyzed {
        let Some(contents) = emit_package(&package) else {
            debug!(path = %package.dir.display(), "no annotated records, skipping");
            continue;
        };
        let filename = config.output_filename(&package.dir)?;
        files.push(GeneratedFile {
            path: package.dir.join(filename),
            contents,
        });
    }
    Ok(files)
}

/// Validates, emits, and writes. Returns the written paths.
pub fn generate(config: &GenConfig, packages: &[PackageConfig]) -> Result<Vec<PathBuf>, GenError> {
    let files = generate_files(config, packages)?;
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        std::fs::write(&file.path, &file.contents)
            .map_err(|e| GenError::Io(format!("cannot write {}: {}", file.path.display(), e)))?;
        info!(path = %file.path.display(), "wrote generated file");
        written.push(file.path);
    }
    Ok(written)
}

/// Writes a starter `encx.yaml` into `dir`, refusing to overwrite.
pub fn init_config(dir: &Path) -> Result<PathBuf, GenError> {
    let path = dir.join(DEFAULT_CONFIG_FILENAME);
    if path.exists() {
        return Err(GenError::Config(format!("{} already exists", path.display())));
    }
    std::fs::write(&path, STARTER_CONFIG)
        .map_err(|e| GenError::Io(format!("cannot write {}: {}", path.display(), e)))?;
    Ok(path)
}
