//! Configuration system for errdef.
//!
//! This module provides:
//! - Catalog loading (TOML / JSON) into an [`ErrorRegistry`](crate::errors::ErrorRegistry)
//! - Catalog validation
//! - Environment variable parsing with type safety
//! - Source tracking for debugging

pub mod env;
pub mod loader;
pub mod source;
pub mod validate;

pub use env::{EnvError, EnvParser};
pub use loader::{CatalogEntry, CatalogError, CatalogFormat, build_registry};
pub use source::{ConfigSource, Sourced};
pub use validate::{CatalogWarning, Severity, validate_registry};

use std::path::PathBuf;

/// Settings read from `ERRDEF_*` environment variables.
///
/// | Variable                | Meaning                                  | Default  |
/// |-------------------------|------------------------------------------|----------|
/// | `ERRDEF_CATALOG`        | catalog file to load (must exist)        | none     |
/// | `ERRDEF_LOG_LEVEL`      | trace/debug/info/warn/error/off          | `info`   |
/// | `ERRDEF_LOG_FORMAT`     | `pretty` or `json`                       | `pretty` |
/// | `ERRDEF_LOG_DIR`        | directory for a daily rolling log file   | none     |
/// | `ERRDEF_STRICT_CATALOG` | treat catalog warnings as failures       | `false`  |
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog: Sourced<Option<PathBuf>>,
    pub log_level: Sourced<String>,
    pub log_format: Sourced<String>,
    pub log_dir: Sourced<Option<PathBuf>>,
    pub strict_catalog: Sourced<bool>,
}

impl Settings {
    /// Reads all settings, returning them with any parse errors encountered.
    ///
    /// Invalid values fall back to their defaults; the errors say which.
    pub fn from_env() -> (Self, Vec<EnvError>) {
        let mut parser = EnvParser::new();
        let settings = Self {
            catalog: parser.get_optional_path("CATALOG", true),
            log_level: parser.get_log_level("LOG_LEVEL", "info"),
            log_format: parser.get_choice("LOG_FORMAT", "pretty", &["pretty", "json"]),
            log_dir: parser.get_optional_path("LOG_DIR", false),
            strict_catalog: parser.get_bool("STRICT_CATALOG", false),
        };
        (settings, parser.take_errors())
    }
}

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
