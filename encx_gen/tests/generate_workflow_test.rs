// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Full generator workflow: config file on disk, analysis, emission, and
//! deterministic regeneration.

use encx_gen::config::GenConfig;
use encx_gen::error::GenError;
use encx_gen::generator;

const USER_SOURCE: &str = r#"
use encx::Encx;

#[derive(Debug, Clone, Default, Encx)]
pub struct User {
    pub id: i64,
    #[encx(encrypt)]
    pub name: String,
    #[encx(encrypt, hash_basic)]
    pub email: String,
    #[encx(hash_secure)]
    pub password: String,
    #[encx(encrypt)]
    pub phone: Option<String>,
    pub active: bool,
}
"#;

const CONFIG: &str = r#"
version: 1
output_suffix: "_encx"
packages:
  - path: "models"
    skip_types: []
"#;

#[test]
fn generates_from_a_config_file_on_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let models = dir.path().join("models");
    std::fs::create_dir_all(&models).unwrap();
    std::fs::write(models.join("user.rs"), USER_SOURCE).unwrap();

    let config_path = dir.path().join("encx.yaml");
    std::fs::write(&config_path, CONFIG.replace("models", models.to_str().unwrap())).unwrap();

    let config = GenConfig::load(&config_path).unwrap();
    let packages = generator::resolve_packages(&config, &[]).unwrap();
    let written = generator::generate(&config, &packages).unwrap();

    assert_eq!(written.len(), 1);
    let contents = std::fs::read_to_string(&written[0]).unwrap();
    assert!(contents.starts_with("// Code generated by encx-gen. DO NOT EDIT."));
    assert!(contents.contains("pub struct UserEncx {"));
    assert!(contents.contains("pub async fn process_user"));
    assert!(contents.contains("pub async fn decrypt_user"));
    assert!(contents.contains("pub key_version: i64,"));

    // Regeneration over unchanged sources is byte-identical.
    let before = std::fs::read(&written[0]).unwrap();
    generator::generate(&config, &packages).unwrap();
    let after = std::fs::read(&written[0]).unwrap();
    assert_eq!(before, after);
}

#[test]
fn generated_fixture_in_the_encx_crate_is_current() {
    // The checked-in companion used by encx's e2e tests must be exactly
    // what this generator emits for the same record definition.
    let dir = tempfile::TempDir::new().unwrap();
    let package = dir.path().join("e2e");
    std::fs::create_dir_all(&package).unwrap();
    std::fs::write(package.join("user.rs"), USER_SOURCE).unwrap();

    let config = GenConfig::default();
    let packages = vec![encx_gen::config::PackageConfig::new(&package)];
    let files = generator::generate_files(&config, &packages).unwrap();
    assert_eq!(files.len(), 1);

    let fixture_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../encx/tests/e2e/user_encx.rs");
    let fixture = std::fs::read_to_string(fixture_path).unwrap();
    assert_eq!(files[0].contents, fixture);
}

#[test]
fn validation_diagnostics_abort_generation() {
    let dir = tempfile::TempDir::new().unwrap();
    let models = dir.path().join("models");
    std::fs::create_dir_all(&models).unwrap();
    std::fs::write(
        models.join("user.rs"),
        "pub struct User {\n    #[encx(encrypt, shred)]\n    pub name: String,\n}\n",
    )
    .unwrap();

    let config = GenConfig::default();
    let packages = vec![encx_gen::config::PackageConfig::new(&models)];
    match generator::generate(&config, &packages) {
        Err(GenError::Validation(diags)) => {
            assert_eq!(diags.len(), 1);
            assert!(diags[0].message.contains("shred"));
        }
        other => panic!("expected validation failure, got {:?}", other.map(|v| v.len())),
    }
    assert!(!models.join("models_encx.rs").exists());
}
