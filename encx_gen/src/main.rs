// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # encx-gen CLI
//!
//! Command-line front end for the encx code generator:
//!
//! - `encx-gen init [DIR]` — write a starter `encx.yaml`
//! - `encx-gen validate [PATHS...]` — analyze and report diagnostics
//! - `encx-gen generate [PATHS...]` — validate, then emit one generated
//!   file per package, adjacent to its sources
//!
//! Exit code 0 on success; sysexits-style codes otherwise (65 when
//! validation fails, 78 for configuration problems, 74 for I/O).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use encx_gen::config::{GenConfig, DEFAULT_CONFIG_FILENAME};
use encx_gen::error::GenError;
use encx_gen::exit_code::ExitCode;
use encx_gen::generator;

#[derive(Parser)]
#[command(
    name = "encx-gen",
    version,
    about = "Code generator for encx field-level envelope encryption"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the generator configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILENAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter encx.yaml
    Init {
        /// Directory to place the configuration in
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Analyze the configured packages and report diagnostics
    Validate {
        /// Package directories (override the configured list)
        packages: Vec<PathBuf>,
    },
    /// Validate, then emit generated files
    Generate {
        /// Package directories (override the configured list)
        packages: Vec<PathBuf>,
    },
}

fn load_config(path: &PathBuf, overrides_present: bool) -> Result<GenConfig, GenError> {
    if path.exists() {
        GenConfig::load(path)
    } else if overrides_present {
        // Explicit paths on the command line work without a config file.
        debug!(path = %path.display(), "no config file, using defaults");
        Ok(GenConfig::default())
    } else {
        Err(GenError::Config(format!(
            "{} not found; run `encx-gen init` or pass package paths explicitly",
            path.display()
        )))
    }
}

fn run(cli: &Cli) -> Result<(), GenError> {
    match &cli.command {
        Commands::Init { dir } => {
            let path = generator::init_config(dir)?;
            println!("wrote {}", path.display());
            Ok(())
        }
        Commands::Validate { packages } => {
            let config = load_config(&cli.config, !packages.is_empty())?;
            let resolved = generator::resolve_packages(&config, packages)?;
            let analyzed = generator::validate_packages(&config, &resolved)?;
            let records: usize = analyzed.iter().map(|p| p.records.len()).sum();
            println!(
                "validated {} package(s), {} annotated record type(s)",
                analyzed.len(),
                records
            );
            Ok(())
        }
        Commands::Generate { packages } => {
            let config = load_config(&cli.config, !packages.is_empty())?;
            let resolved = generator::resolve_packages(&config, packages)?;
            let written = generator::generate(&config, &resolved)?;
            for path in &written {
                println!("wrote {}", path.display());
            }
            if written.is_empty() {
                println!("no annotated record types found; nothing generated");
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    let exit = match run(&cli) {
        Ok(()) => ExitCode::Success,
        Err(GenError::Validation(diagnostics)) => {
            for diagnostic in &diagnostics {
                eprintln!("error: {}", diagnostic);
            }
            eprintln!("validation failed with {} diagnostic(s)", diagnostics.len());
            ExitCode::DataError
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from_error(&err)
        }
    };

    std::process::exit(exit.as_i32());
}
