// /////////////////////////////////////////////////////////////////////////////
// Encx
// Copyright (c) 2025 the encx contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Static Analyzer
//!
//! Parses every non-generated `.rs` file in a package directory, locates
//! struct types whose named fields carry `#[encx(...)]` capability tags,
//! and validates:
//!
//! - tag syntax: a comma-separated subset of `encrypt`, `hash_basic`,
//!   `hash_secure`; unknown tokens are errors
//! - forbidden combinations: `hash_basic` + `hash_secure` on one field
//! - field typing: the tagged type must be serializable by the field
//!   codec (integer widths, floats, `bool`, `String`, `Vec<u8>`,
//!   `DateTime<Utc>`, `Uuid`, or a single `Option` wrapper around one of
//!   those)
//! - annotation sites: tags are only meaningful on named struct fields
//!
//! Every finding is reported as a [`Diagnostic`] with file, line, and
//! column; all findings across all files are collected before analysis
//! fails, so one run surfaces every problem at once.

use std::path::{Path, PathBuf};

use syn::spanned::Spanned;

use crate::error::{Diagnostic, GenError};

pub const TAG_ENCRYPT: &str = "encrypt";
pub const TAG_HASH_BASIC: &str = "hash_basic";
pub const TAG_HASH_SECURE: &str = "hash_secure";

/// Capability tags attached to one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSet {
    pub encrypt: bool,
    pub hash_basic: bool,
    pub hash_secure: bool,
}

impl TagSet {
    pub fn is_empty(&self) -> bool {
        !self.encrypt && !self.hash_basic && !self.hash_secure
    }
}

/// The serializable type shapes a tagged field may have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    String,
    Bytes,
    Timestamp,
    Uuid,
    Option(Box<FieldKind>),
}

impl FieldKind {
    /// The fully qualified Rust type the emitter decodes into.
    pub fn rust_type(&self) -> String {
        match self {
            FieldKind::I8 => "i8".to_string(),
            FieldKind::I16 => "i16".to_string(),
            FieldKind::I32 => "i32".to_string(),
            FieldKind::I64 => "i64".to_string(),
            FieldKind::U8 => "u8".to_string(),
            FieldKind::U16 => "u16".to_string(),
            FieldKind::U32 => "u32".to_string(),
            FieldKind::U64 => "u64".to_string(),
            FieldKind::F32 => "f32".to_string(),
            FieldKind::F64 => "f64".to_string(),
            FieldKind::Bool => "bool".to_string(),
            FieldKind::String => "String".to_string(),
            FieldKind::Bytes => "Vec<u8>".to_string(),
            FieldKind::Timestamp => "chrono::DateTime<chrono::Utc>".to_string(),
            FieldKind::Uuid => "uuid::Uuid".to_string(),
            FieldKind::Option(inner) => format!("Option<{}>", inner.rust_type()),
        }
    }
}

/// One field of an annotated record.
#[derive(Debug, Clone)]
pub struct RecordField {
    pub name: String,
    /// Empty for untagged fields, which are copied verbatim.
    pub tags: TagSet,
    /// Present for tagged fields only.
    pub kind: Option<FieldKind>,
    /// Verbatim source type text, used for untagged projection fields.
    pub type_tokens: String,
}

/// A struct type with at least one tagged field.
#[derive(Debug, Clone)]
pub struct RecordType {
    pub name: String,
    pub fields: Vec<RecordField>,
    pub file: PathBuf,
}

/// Analysis result for one package directory.
#[derive(Debug, Clone)]
pub struct AnalyzedPackage {
    pub dir: PathBuf,
    pub records: Vec<RecordType>,
}

fn line_column(span: proc_macro2::Span) -> (usize, usize) {
    let start = span.start();
    (start.line, start.column + 1)
}

fn type_to_string(ty: &syn::Type) -> String {
    use quote::ToTokens;
    ty.to_token_stream()
        .to_string()
        .replace(" < ", "<")
        .replace(" > ", "> ")
        .replace(" >", ">")
        .replace("< ", "<")
        .replace(" ,", ",")
        .replace(" :: ", "::")
        .replace("& ", "&")
}

fn field_kind(ty: &syn::Type) -> Option<FieldKind> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    let name = segment.ident.to_string();

    let scalar = |kind: FieldKind| {
        if matches!(segment.arguments, syn::PathArguments::None) {
            Some(kind)
        } else {
            None
        }
    };

    match name.as_str() {
        "i8" => scalar(FieldKind::I8),
        "i16" => scalar(FieldKind::I16),
        "i32" => scalar(FieldKind::I32),
        "i64" => scalar(FieldKind::I64),
        "u8" => scalar(FieldKind::U8),
        "u16" => scalar(FieldKind::U16),
        "u32" => scalar(FieldKind::U32),
        "u64" => scalar(FieldKind::U64),
        "f32" => scalar(FieldKind::F32),
        "f64" => scalar(FieldKind::F64),
        "bool" => scalar(FieldKind::Bool),
        "String" => scalar(FieldKind::String),
        "Uuid" => scalar(FieldKind::Uuid),
        // DateTime<Utc> and type-aliased spellings of it.
        "DateTime" => Some(FieldKind::Timestamp),
        "Vec" => match generic_argument(segment) {
            Some(syn::Type::Path(inner))
                if inner.path.is_ident("u8") =>
            {
                Some(FieldKind::Bytes)
            }
            _ => None,
        },
        "Option" => {
            let inner = generic_argument(segment)?;
            let inner_kind = field_kind(inner)?;
            // A single level of optionality; Option<Option<_>> is not a
            // meaningful field shape.
            if matches!(inner_kind, FieldKind::Option(_)) {
                return None;
            }
            Some(FieldKind::Option(Box::new(inner_kind)))
        }
        _ => None,
    }
}

fn generic_argument(segment: &syn::PathSegment) -> Option<&syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        syn::GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

fn parse_tags(attr: &syn::Attribute, file: &Path, diagnostics: &mut Vec<Diagnostic>) -> TagSet {
    let mut tags = TagSet::default();

    let paths = match &attr.meta {
        syn::Meta::List(_) => {
            match attr.parse_args_with(
                syn::punctuated::Punctuated::<syn::Path, syn::Token![,]>::parse_terminated,
            ) {
                Ok(paths) => paths,
                Err(e) => {
                    let (line, column) = line_column(attr.span());
                    diagnostics.push(Diagnostic::new(
                        file,
                        line,
                        column,
                        format!("malformed encx tag list: {}", e),
                    ));
                    return tags;
                }
            }
        }
        _ => {
            let (line, column) = line_column(attr.span());
            diagnostics.push(Diagnostic::new(
                file,
                line,
                column,
                "encx attribute requires a tag list, e.g. #[encx(encrypt)]",
            ));
            return tags;
        }
    };

    if paths.is_empty() {
        let (line, column) = line_column(attr.span());
        diagnostics.push(Diagnostic::new(file, line, column, "empty encx tag list"));
        return tags;
    }

    for path in &paths {
        let (line, column) = line_column(path.span());
        match path.get_ident().map(|i| i.to_string()).as_deref() {
            Some(TAG_ENCRYPT) => tags.encrypt = true,
            Some(TAG_HASH_BASIC) => tags.hash_basic = true,
            Some(TAG_HASH_SECURE) => tags.hash_secure = true,
            Some(other) => diagnostics.push(Diagnostic::new(
                file,
                line,
                column,
                format!(
                    "unknown encx tag '{}' (expected {}, {}, or {})",
                    other, TAG_ENCRYPT, TAG_HASH_BASIC, TAG_HASH_SECURE
                ),
            )),
            None => diagnostics.push(Diagnostic::new(file, line, column, "encx tags must be bare identifiers")),
        }
    }

    tags
}

fn has_encx_attr(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|a| a.path().is_ident("encx"))
}

fn analyze_struct(
    item: &syn::ItemStruct,
    file: &Path,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<RecordType> {
    let named = match &item.fields {
        syn::Fields::Named(named) => named,
        other => {
            // Tuple and unit structs cannot carry field tags; report only
            // when someone tried.
            let tagged = match other {
                syn::Fields::Unnamed(unnamed) => unnamed.unnamed.iter().any(|f| has_encx_attr(&f.attrs)),
                _ => false,
            };
            if tagged {
                let (line, column) = line_column(item.span());
                diagnostics.push(Diagnostic::new(
                    file,
                    line,
                    column,
                    format!("record `{}`: encx tags require named struct fields", item.ident),
                ));
            }
            return None;
        }
    };

    if !named.named.iter().any(|f| has_encx_attr(&f.attrs)) {
        return None;
    }

    let record_name = item.ident.to_string();
    let mut fields = Vec::new();

    for field in &named.named {
        let Some(ident) = &field.ident else { continue };
        let field_name = ident.to_string();
        let type_tokens = type_to_string(&field.ty);

        let encx_attrs: Vec<&syn::Attribute> =
            field.attrs.iter().filter(|a| a.path().is_ident("encx")).collect();

        if encx_attrs.is_empty() {
            fields.push(RecordField {
                name: field_name,
                tags: TagSet::default(),
                kind: None,
                type_tokens,
            });
            continue;
        }

        if encx_attrs.len() > 1 {
            let (line, column) = line_column(field.span());
            diagnostics.push(Diagnostic::new(
                file,
                line,
                column,
                format!(
                    "record `{}`, field `{}`: duplicate encx attributes",
                    record_name, field_name
                ),
            ));
        }

        let mut tags = TagSet::default();
        for attr in &encx_attrs {
            let parsed = parse_tags(attr, file, diagnostics);
            tags.encrypt |= parsed.encrypt;
            tags.hash_basic |= parsed.hash_basic;
            tags.hash_secure |= parsed.hash_secure;
        }

        if tags.hash_basic && tags.hash_secure {
            let (line, column) = line_column(field.span());
            diagnostics.push(Diagnostic::new(
                file,
                line,
                column,
                format!(
                    "record `{}`, field `{}`: hash_basic and hash_secure cannot be combined",
                    record_name, field_name
                ),
            ));
        }

        let kind = field_kind(&field.ty);
        if !tags.is_empty() && kind.is_none() {
            let (line, column) = line_column(field.ty.span());
            diagnostics.push(Diagnostic::new(
                file,
                line,
                column,
                format!(
                    "record `{}`, field `{}`: type `{}` is not serializable for encx tags",
                    record_name, field_name, type_tokens
                ),
            ));
        }

        fields.push(RecordField {
            name: field_name,
            tags,
            kind,
            type_tokens,
        });
    }

    Some(RecordType {
        name: record_name,
        fields,
        file: file.to_path_buf(),
    })
}

fn scan_misplaced_enum_tags(item: &syn::ItemEnum, file: &Path, diagnostics: &mut Vec<Diagnostic>) {
    for variant in &item.variants {
        let tagged = variant
            .fields
            .iter()
            .any(|f| has_encx_attr(&f.attrs));
        if tagged {
            let (line, column) = line_column(variant.span());
            diagnostics.push(Diagnostic::new(
                file,
                line,
                column,
                format!(
                    "enum `{}`: encx tags are only supported on named struct fields",
                    item.ident
                ),
            ));
        }
    }
}

fn source_files(dir: &Path, output_suffix: &str) -> Result<Vec<PathBuf>, GenError> {
    let generated_ending = format!("{}.rs", output_suffix);
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .map_err(|e| GenError::Io(format!("cannot read package directory {}: {}", dir.display(), e)))?
    {
        let entry = entry.map_err(|e| GenError::Io(e.to_string()))?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_file() || !name.ends_with(".rs") || name.ends_with(&generated_ending) {
            continue;
        }
        files.push(path);
    }
    // Stable ordering keeps the emitted output byte-identical across runs.
    files.sort();
    Ok(files)
}

/// Analyzes one package directory, returning its records or every
/// diagnostic found.
pub fn analyze_package(
    dir: &Path,
    skip_types: &[String],
    output_suffix: &str,
) -> Result<AnalyzedPackage, GenError> {
    let mut diagnostics = Vec::new();
    let mut records = Vec::new();

    for file in source_files(dir, output_suffix)? {
        let source = std::fs::read_to_string(&file)
            .map_err(|e| GenError::Io(format!("cannot read {}: {}", file.display(), e)))?;
        let ast = match syn::parse_file(&source) {
            Ok(ast) => ast,
            Err(e) => {
                let (line, column) = line_column(e.span());
                diagnostics.push(Diagnostic::new(
                    &file,
                    line,
                    column,
                    format!("cannot parse source: {}", e),
                ));
                continue;
            }
        };

        for item in &ast.items {
            match item {
                syn::Item::Struct(item_struct) => {
                    if skip_types.iter().any(|s| s == &item_struct.ident.to_string()) {
                        continue;
                    }
                    if let Some(record) = analyze_struct(item_struct, &file, &mut diagnostics) {
                        records.push(record);
                    }
                }
                syn::Item::Enum(item_enum) => {
                    scan_misplaced_enum_tags(item_enum, &file, &mut diagnostics);
                }
                _ => {}
            }
        }
    }

    if !diagnostics.is_empty() {
        return Err(GenError::Validation(diagnostics));
    }

    Ok(AnalyzedPackage {
        dir: dir.to_path_buf(),
        records,
    })
}
