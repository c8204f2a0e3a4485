//! JSON Schema and catalog export for errdef
//!
//! This module provides machine-readable descriptions of the error wire
//! format for API documentation and client generation.
//!
//! # Generated Files
//!
//! - `error-value.schema.json` - schema of the `{err_code, err_msg, err_msg_en}` object
//! - `error-codes.json` - every registered code with both messages
//!
//! # Example
//!
//! ```rust
//! use errdef_common::api::schema::{generate_error_catalog, generate_error_value_schema};
//! use errdef_common::errors::ErrorRegistry;
//!
//! let schema = generate_error_value_schema();
//! println!("{}", serde_json::to_string_pretty(&schema).unwrap());
//!
//! let catalog = generate_error_catalog(&ErrorRegistry::empty());
//! println!("{}", serde_json::to_string_pretty(&catalog).unwrap());
//! ```

use crate::errors::catalog::{ErrorCode, ErrorRegistry};
use crate::errors::value::ErrorValue;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::{Deserialize, Serialize};

/// Version of the [`ErrorCatalog`] layout.
pub const CATALOG_SCHEMA_VERSION: &str = "1.0";

/// Generate JSON Schema for the error wire format.
#[must_use]
pub fn generate_error_value_schema() -> RootSchema {
    schema_for!(ErrorValue)
}

/// Machine-readable error code entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCodeEntry {
    pub code: ErrorCode,
    /// Localized message template.
    pub msg: String,
    /// English message.
    pub msg_en: String,
    /// Number of printf arguments the localized template expects.
    pub arg_count: usize,
}

/// Complete error catalog for machine consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCatalog {
    /// Schema version for catalog format.
    pub schema_version: String,
    /// Entries sorted by code.
    pub errors: Vec<ErrorCodeEntry>,
}

/// Generate the catalog for `registry`, sorted by code.
#[must_use]
pub fn generate_error_catalog(registry: &ErrorRegistry) -> ErrorCatalog {
    let errors = registry
        .iter()
        .map(|(code, base)| ErrorCodeEntry {
            code,
            msg: base.message.clone(),
            msg_en: base.message_en.clone(),
            arg_count: crate::errors::template::scan(&base.message).arg_count(),
        })
        .collect();

    ErrorCatalog {
        schema_version: CATALOG_SCHEMA_VERSION.to_string(),
        errors,
    }
}

/// Schema export result containing all generated files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaExportResult {
    /// Number of files generated.
    pub files_generated: usize,
    /// List of generated file paths.
    pub files: Vec<String>,
    /// Output directory.
    pub output_dir: String,
}

/// Export the wire schema and the catalog of `registry` to `output_dir`.
///
/// # Errors
///
/// Returns error if directory creation or file writing fails.
pub fn export_schemas(
    output_dir: &std::path::Path,
    registry: &ErrorRegistry,
) -> std::io::Result<SchemaExportResult> {
    use std::fs;

    fs::create_dir_all(output_dir)?;

    let mut files = Vec::new();

    let schema_path = output_dir.join("error-value.schema.json");
    fs::write(
        &schema_path,
        serde_json::to_string_pretty(&generate_error_value_schema())?,
    )?;
    files.push(schema_path.display().to_string());

    let catalog_path = output_dir.join("error-codes.json");
    fs::write(
        &catalog_path,
        serde_json::to_string_pretty(&generate_error_catalog(registry))?,
    )?;
    files.push(catalog_path.display().to_string());

    tracing::info!(
        dir = %output_dir.display(),
        files = files.len(),
        "Exported error schemas"
    );

    Ok(SchemaExportResult {
        files_generated: files.len(),
        files,
        output_dir: output_dir.display().to_string(),
    })
}
