// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Code Emitter
//!
//! Turns analyzed record types into Rust source: one projection struct
//! plus async `process_*` / `decrypt_*` functions per record, written as
//! one file per package.
//!
//! The emitted code follows a fixed shape:
//!
//! - one DEK per record, generated first;
//! - every tagged field is serialized once, then encrypted and/or hashed
//!   from those same bytes (hashes always come from the serialized
//!   original, never from ciphertext);
//! - per-field failures are collected and reported as one composite
//!   error — a projection is never partially emitted;
//! - the DEK is envelope-encrypted last and the KEK version stamped;
//! - decryption resolves the stamped version, then reverses each
//!   encrypted field; hash-only fields stay at their `Default` value.
//!
//! Skip semantics mirror the library's zero-value policy: `Option`
//! fields are processed only when `Some`, `Uuid` fields only when not
//! nil, and everything value-typed is processed unconditionally (an
//! empty string or zero is valid data).
//!
//! Emission is deterministic: records are emitted in source order, and
//! nothing in the output depends on the environment, so re-running the
//! generator on unchanged input produces byte-identical files. Generated
//! source expects to live as a module next to the package it was
//! generated from (`use super::*`), and source record types must
//! implement `Default` and `Clone`.

use std::fmt::Write;

use crate::analyzer::{AnalyzedPackage, FieldKind, RecordField, RecordType};

/// Converts a record type name to the snake_case function stem.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = i + 1 < chars.len() && chars[i + 1].is_lowercase();
            if i > 0 && (prev_lower || next_lower) {
                out.push('_');
            }
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else {
            out.push(*c);
        }
    }
    out
}

/// Emits the generated file for one package. Returns `None` when the
/// package has no annotated records.
pub fn emit_package(package: &AnalyzedPackage) -> Option<String> {
    if package.records.is_empty() {
        return None;
    }

    let mut out = String::new();
    out.push_str("// Code generated by encx-gen. DO NOT EDIT.\n");
    out.push_str("//\n");
    out.push_str("// Encrypted projections and process/decrypt functions for the\n");
    out.push_str("// annotated record types in this package.\n");
    out.push('\n');
    out.push_str("#![allow(clippy::all)]\n");
    out.push_str("#![allow(dead_code)]\n");
    out.push_str("#![allow(unused_imports)]\n");
    out.push('\n');
    out.push_str("use encx::{Crypto, EncxError, FieldCodec, KeyVersion};\n");
    out.push('\n');
    out.push_str("use super::*;\n");

    for record in &package.records {
        emit_projection_struct(&mut out, record);
        emit_process_fn(&mut out, record);
        emit_decrypt_fn(&mut out, record);
    }

    Some(out)
}

fn emit_projection_struct(out: &mut String, record: &RecordType) {
    let _ = write!(
        out,
        "\n/// Encrypted projection of [`{name}`].\n\
         #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]\n\
         pub struct {name}Encx {{\n",
        name = record.name
    );

    for field in &record.fields {
        if field.tags.is_empty() {
            let _ = writeln!(out, "    pub {}: {},", field.name, field.type_tokens);
            continue;
        }
        if field.tags.encrypt {
            let _ = writeln!(out, "    pub {}_encrypted: Vec<u8>,", field.name);
        }
        if field.tags.hash_basic {
            let _ = writeln!(out, "    pub {}_hash: String,", field.name);
        }
        if field.tags.hash_secure {
            let _ = writeln!(out, "    pub {}_hash_secure: String,", field.name);
        }
    }

    out.push_str("    pub dek_encrypted: Vec<u8>,\n");
    out.push_str("    pub key_version: i64,\n");
    out.push_str("    pub metadata: Vec<u8>,\n");
    out.push_str("}\n");
}

/// The guard wrapping a tagged field's processing, per the zero-value
/// policy, plus the expression yielding the value to serialize.
fn process_guard(field: &RecordField) -> (Option<String>, String) {
    match &field.kind {
        Some(FieldKind::Option(_)) => (
            Some(format!("if let Some(value) = &source.{} {{", field.name)),
            "value".to_string(),
        ),
        Some(FieldKind::Uuid) => (
            Some(format!("if !source.{}.is_nil() {{", field.name)),
            format!("source.{}", field.name),
        ),
        _ => (None, format!("source.{}", field.name)),
    }
}

fn emit_tagged_field_processing(out: &mut String, field: &RecordField) {
    let (guard, value_expr) = process_guard(field);
    let outer_indent = if guard.is_some() { "    " } else { "" };

    if let Some(guard) = &guard {
        let _ = writeln!(out, "    {}", guard);
    }

    let _ = writeln!(out, "{}    match {}.encode() {{", outer_indent, value_expr);
    let _ = writeln!(out, "{}        Ok(bytes) => {{", outer_indent);

    if field.tags.encrypt {
        let _ = writeln!(
            out,
            "{}            match crypto.encrypt_data(&bytes, &dek) {{",
            outer_indent
        );
        let _ = writeln!(
            out,
            "{}                Ok(ciphertext) => projection.{}_encrypted = ciphertext,",
            outer_indent, field.name
        );
        let _ = writeln!(
            out,
            "{}                Err(e) => field_errors.push(format!(\"field `{}`: encrypt: {{}}\", e)),",
            outer_indent, field.name
        );
        let _ = writeln!(out, "{}            }}", outer_indent);
    }
    if field.tags.hash_basic {
        let _ = writeln!(
            out,
            "{}            projection.{}_hash = crypto.hash_basic(&bytes);",
            outer_indent, field.name
        );
    }
    if field.tags.hash_secure {
        let _ = writeln!(out, "{}            match crypto.hash_secure(&bytes) {{", outer_indent);
        let _ = writeln!(
            out,
            "{}                Ok(hash) => projection.{}_hash_secure = hash,",
            outer_indent, field.name
        );
        let _ = writeln!(
            out,
            "{}                Err(e) => field_errors.push(format!(\"field `{}`: hash_secure: {{}}\", e)),",
            outer_indent, field.name
        );
        let _ = writeln!(out, "{}            }}", outer_indent);
    }

    let _ = writeln!(out, "{}        }}", outer_indent);
    let _ = writeln!(
        out,
        "{}        Err(e) => field_errors.push(format!(\"field `{}`: serialize: {{}}\", e)),",
        outer_indent, field.name
    );
    let _ = writeln!(out, "{}    }}", outer_indent);

    if guard.is_some() {
        out.push_str("    }\n");
    }
}

fn emit_process_fn(out: &mut String, record: &RecordType) {
    let stem = snake_case(&record.name);
    let _ = write!(
        out,
        "\n/// Produces the encrypted projection of a [`{name}`] under a fresh\n\
         /// record DEK, envelope-encrypted at the current key version.\n\
         pub async fn process_{stem}(crypto: &Crypto, source: &{name}) -> Result<{name}Encx, EncxError> {{\n\
         \x20   let dek = crypto.generate_dek()?;\n\
         \x20   let mut projection = {name}Encx::default();\n\
         \x20   let mut field_errors: Vec<String> = Vec::new();\n",
        name = record.name,
        stem = stem
    );

    let untagged: Vec<&RecordField> = record.fields.iter().filter(|f| f.tags.is_empty()).collect();
    if !untagged.is_empty() {
        out.push('\n');
        for field in untagged {
            let _ = writeln!(out, "    projection.{name} = source.{name}.clone();", name = field.name);
        }
    }

    for field in record.fields.iter().filter(|f| !f.tags.is_empty()) {
        out.push('\n');
        emit_tagged_field_processing(out, field);
    }

    let _ = write!(
        out,
        "\n    if !field_errors.is_empty() {{\n\
         \x20       return Err(EncxError::processing_failed(format!(\n\
         \x20           \"record `{name}`: {{}}\",\n\
         \x20           field_errors.join(\"; \")\n\
         \x20       )));\n\
         \x20   }}\n\
         \n\
         \x20   let wrapped = crypto.encrypt_dek(&dek).await?;\n\
         \x20   projection.dek_encrypted = wrapped.ciphertext;\n\
         \x20   projection.key_version = wrapped.key_version.get();\n\
         \n\
         \x20   Ok(projection)\n\
         }}\n",
        name = record.name
    );
}

fn decode_type(field: &RecordField) -> String {
    match &field.kind {
        Some(FieldKind::Option(inner)) => inner.rust_type(),
        Some(kind) => kind.rust_type(),
        None => String::new(),
    }
}

fn emit_decrypt_fn(out: &mut String, record: &RecordType) {
    let stem = snake_case(&record.name);
    let _ = write!(
        out,
        "\n/// Reconstructs a [`{name}`] from its encrypted projection using the\n\
         /// stamped key version. Hash-only fields stay at their default value.\n\
         pub async fn decrypt_{stem}(crypto: &Crypto, source: &{name}Encx) -> Result<{name}, EncxError> {{\n\
         \x20   let key_version = KeyVersion::new(source.key_version)?;\n\
         \x20   let dek = crypto\n\
         \x20       .decrypt_dek_with_version(&source.dek_encrypted, key_version)\n\
         \x20       .await?;\n\
         \x20   let mut record = {name}::default();\n\
         \x20   let mut field_errors: Vec<String> = Vec::new();\n",
        name = record.name,
        stem = stem
    );

    let untagged: Vec<&RecordField> = record.fields.iter().filter(|f| f.tags.is_empty()).collect();
    if !untagged.is_empty() {
        out.push('\n');
        for field in untagged {
            let _ = writeln!(out, "    record.{name} = source.{name}.clone();", name = field.name);
        }
    }

    for field in record.fields.iter().filter(|f| f.tags.encrypt) {
        let assign = match &field.kind {
            Some(FieldKind::Option(_)) => format!("record.{} = Some(value)", field.name),
            _ => format!("record.{} = value", field.name),
        };
        let _ = write!(
            out,
            "\n    if !source.{name}_encrypted.is_empty() {{\n\
             \x20       match crypto.decrypt_data(&source.{name}_encrypted, &dek) {{\n\
             \x20           Ok(bytes) => match <{ty} as FieldCodec>::decode(&bytes) {{\n\
             \x20               Ok(value) => {assign},\n\
             \x20               Err(e) => field_errors.push(format!(\"field `{name}`: deserialize: {{}}\", e)),\n\
             \x20           }},\n\
             \x20           Err(e) => field_errors.push(format!(\"field `{name}`: decrypt: {{}}\", e)),\n\
             \x20       }}\n\
             \x20   }}\n",
            name = field.name,
            ty = decode_type(field),
            assign = assign
        );
    }

    let _ = write!(
        out,
        "\n    if !field_errors.is_empty() {{\n\
         \x20       return Err(EncxError::processing_failed(format!(\n\
         \x20           \"record `{name}`: {{}}\",\n\
         \x20           field_errors.join(\"; \")\n\
         \x20       )));\n\
         \x20   }}\n\
         \n\
         \x20   Ok(record)\n\
         }}\n",
        name = record.name
    );
}
