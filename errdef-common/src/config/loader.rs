//! Catalog files: loading an [`ErrorRegistry`] from TOML or JSON.
//!
//! # TOML
//!
//! ```toml
//! [[errors]]
//! code = 1001
//! msg = "参数错误"
//! msg_en = "invalid parameter"
//! ```
//!
//! # JSON
//!
//! Either a bare array or an object with an `errors` array:
//!
//! ```json
//! [{"code": 1001, "msg": "参数错误", "msg_en": "invalid parameter"}]
//! ```
//!
//! `msg_en` may be omitted and defaults to an empty string. `msg` is required
//! and must be non-empty.

use crate::errors::catalog::{BaseMessage, ErrorCode, ErrorRegistry, RegistryBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while building a registry from catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported catalog format for {path}: expected a .toml or .json file")]
    UnsupportedFormat { path: PathBuf },

    #[error("Duplicate error code {code} in catalog")]
    DuplicateCode { code: ErrorCode },

    #[error("Error code {code} has an empty localized message")]
    EmptyMessage { code: ErrorCode },
}

/// One catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: ErrorCode,
    pub msg: String,
    #[serde(default)]
    pub msg_en: String,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    errors: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Bare(Vec<CatalogEntry>),
    Wrapped(CatalogFile),
}

/// Catalog file formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    /// Detects the format from the file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Builds a registry from entries, rejecting empty messages and duplicates.
///
/// # Errors
///
/// [`CatalogError::EmptyMessage`] or [`CatalogError::DuplicateCode`].
pub fn build_registry(
    entries: impl IntoIterator<Item = CatalogEntry>,
) -> Result<ErrorRegistry, CatalogError> {
    let mut builder = RegistryBuilder::new();
    for entry in entries {
        if entry.msg.is_empty() {
            return Err(CatalogError::EmptyMessage { code: entry.code });
        }
        builder.insert(entry.code, BaseMessage::new(entry.msg, entry.msg_en));
    }
    builder.build()
}

impl ErrorRegistry {
    /// Parses a TOML catalog.
    ///
    /// # Errors
    ///
    /// Parse failures and the validation errors of [`build_registry`].
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        build_registry(file.errors)
    }

    /// Parses a JSON catalog.
    ///
    /// # Errors
    ///
    /// Parse failures and the validation errors of [`build_registry`].
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let entries = match serde_json::from_str::<JsonCatalog>(text)? {
            JsonCatalog::Bare(entries) => entries,
            JsonCatalog::Wrapped(file) => file.errors,
        };
        build_registry(entries)
    }

    /// Loads a catalog file, choosing the parser from its extension.
    ///
    /// # Errors
    ///
    /// [`CatalogError::UnsupportedFormat`], [`CatalogError::Io`], parse
    /// failures and the validation errors of [`build_registry`].
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let format = CatalogFormat::from_path(path).ok_or_else(|| {
            CatalogError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;
        debug!(path = %path.display(), ?format, "reading error catalog");
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = match format {
            CatalogFormat::Toml => Self::from_toml_str(&text)?,
            CatalogFormat::Json => Self::from_json_str(&text)?,
        };
        info!(
            path = %path.display(),
            codes = registry.len(),
            "Loaded error catalog"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML_CATALOG: &str = r#"
[[errors]]
code = 1001
msg = "参数错误"
msg_en = "invalid parameter"

[[errors]]
code = 1002
msg = "用户 %s 不存在"
"#;

    #[test]
    fn test_toml_catalog() {
        let registry = ErrorRegistry::from_toml_str(TOML_CATALOG).expect("valid catalog");
        assert_eq!(registry.len(), 2);
        let base = registry.lookup(ErrorCode::new(1002)).expect("registered");
        assert_eq!(base.message, "用户 %s 不存在");
        assert_eq!(base.message_en, "");
    }

    #[test]
    fn test_empty_toml_catalog() {
        let registry = ErrorRegistry::from_toml_str("").expect("empty catalog is valid");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_json_bare_and_wrapped() {
        let bare = r#"[{"code": 1001, "msg": "参数错误", "msg_en": "invalid parameter"}]"#;
        let wrapped = r#"{"errors": [{"code": 1001, "msg": "参数错误", "msg_en": "invalid parameter"}]}"#;
        let a = ErrorRegistry::from_json_str(bare).expect("bare array");
        let b = ErrorRegistry::from_json_str(wrapped).expect("wrapped object");
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let text = r#"
[[errors]]
code = 1
msg = "a"

[[errors]]
code = 1
msg = "b"
"#;
        let err = ErrorRegistry::from_toml_str(text).expect_err("duplicate should fail");
        assert!(matches!(err, CatalogError::DuplicateCode { code } if code == ErrorCode::new(1)));
    }

    #[test]
    fn test_empty_message_rejected() {
        let err = ErrorRegistry::from_json_str(r#"[{"code": 5, "msg": ""}]"#)
            .expect_err("empty message should fail");
        assert!(matches!(err, CatalogError::EmptyMessage { .. }));
        assert_eq!(err.to_string(), "Error code 5 has an empty localized message");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ErrorRegistry::from_toml_str("[[errors]\ncode ="),
            Err(CatalogError::Toml(_))
        ));
        assert!(matches!(
            ErrorRegistry::from_json_str("{not json"),
            Err(CatalogError::Json(_))
        ));
        assert!(matches!(
            ErrorRegistry::from_json_str(r#"[{"msg": "missing code"}]"#),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_from_path_detects_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let toml_path = dir.path().join("errors.TOML");
        std::fs::write(&toml_path, TOML_CATALOG).expect("write toml");
        assert_eq!(ErrorRegistry::from_path(&toml_path).expect("toml").len(), 2);

        let json_path = dir.path().join("errors.json");
        let mut file = std::fs::File::create(&json_path).expect("create json");
        file.write_all(br#"[{"code": 9, "msg": "x"}]"#)
            .expect("write json");
        assert_eq!(ErrorRegistry::from_path(&json_path).expect("json").len(), 1);
    }

    #[test]
    fn test_from_path_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let yaml = dir.path().join("errors.yaml");
        assert!(matches!(
            ErrorRegistry::from_path(&yaml),
            Err(CatalogError::UnsupportedFormat { .. })
        ));
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            ErrorRegistry::from_path(&missing),
            Err(CatalogError::Io { .. })
        ));
    }
}
