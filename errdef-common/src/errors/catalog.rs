//! Error registry for errdef
//!
//! The registry maps numeric error codes to a base bilingual message pair:
//! - A localized message (also the template used by formatted construction)
//! - An English message (never templated)
//!
//! A registry is built once, usually by the catalog loader in
//! [`crate::config::loader`], and is read-only afterwards. It is `Send + Sync`
//! and is shared between callers behind an `Arc`, so concurrent lookups need
//! no locking.
//!
//! # Example
//!
//! ```rust
//! use errdef_common::errors::catalog::{ErrorCode, RegistryBuilder};
//!
//! let registry = RegistryBuilder::new()
//!     .with_entry(1001, "参数错误", "invalid parameter")
//!     .build()
//!     .expect("no duplicate codes");
//!
//! let base = registry.lookup(ErrorCode::new(1001)).expect("registered");
//! println!("{} / {}", base.message, base.message_en);
//! ```

use crate::config::loader::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Numeric error code used as the registry key.
///
/// Serializes as a bare integer so the wire shape stays `"err_code": 1001`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
#[serde(transparent)]
pub struct ErrorCode(i64);

impl ErrorCode {
    /// Wraps a raw code.
    #[must_use]
    pub const fn new(code: i64) -> Self {
        Self(code)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        Self(i64::from(code))
    }
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        Self(i64::from(code))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical message pair stored for a registered code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseMessage {
    /// Localized message; also the printf-style template for formatted errors.
    #[serde(rename = "msg")]
    pub message: String,
    /// English message.
    #[serde(rename = "msg_en", default)]
    pub message_en: String,
}

impl BaseMessage {
    /// Creates a message pair.
    #[must_use]
    pub fn new(message: impl Into<String>, message_en: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            message_en: message_en.into(),
        }
    }
}

/// Read-only mapping from [`ErrorCode`] to [`BaseMessage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorRegistry {
    entries: HashMap<ErrorCode, BaseMessage>,
}

impl ErrorRegistry {
    /// An empty registry. Every lookup misses.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the base message for `code`, or `None` if it is unregistered.
    #[must_use]
    pub fn lookup(&self, code: ErrorCode) -> Option<&BaseMessage> {
        self.entries.get(&code)
    }

    /// Returns true if `code` is registered.
    #[must_use]
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.entries.contains_key(&code)
    }

    /// Number of registered codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no codes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered codes in ascending order.
    #[must_use]
    pub fn codes(&self) -> Vec<ErrorCode> {
        let mut codes: Vec<ErrorCode> = self.entries.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// Iterates entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (ErrorCode, &BaseMessage)> + '_ {
        self.codes()
            .into_iter()
            .filter_map(move |code| self.entries.get(&code).map(|base| (code, base)))
    }
}

/// Accumulates entries and produces an [`ErrorRegistry`].
///
/// Duplicate codes are remembered rather than silently overwritten, and
/// [`RegistryBuilder::build`] reports the first one.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: HashMap<ErrorCode, BaseMessage>,
    duplicate: Option<ErrorCode>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry in place.
    pub fn insert(&mut self, code: impl Into<ErrorCode>, base: BaseMessage) -> &mut Self {
        let code = code.into();
        if self.entries.insert(code, base).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(code);
        }
        self
    }

    /// Adds an entry, builder style.
    #[must_use]
    pub fn with_entry(
        mut self,
        code: impl Into<ErrorCode>,
        message: impl Into<String>,
        message_en: impl Into<String>,
    ) -> Self {
        self.insert(code, BaseMessage::new(message, message_en));
        self
    }

    /// Finishes the registry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCode`] if any code was inserted twice.
    pub fn build(self) -> Result<ErrorRegistry, CatalogError> {
        if let Some(code) = self.duplicate {
            return Err(CatalogError::DuplicateCode { code });
        }
        Ok(ErrorRegistry {
            entries: self.entries,
        })
    }
}
