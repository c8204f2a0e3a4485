//! Catalog validation.
//!
//! Loading already rejects hard errors (duplicates, empty localized text).
//! This pass reports softer problems that still deserve a look before a
//! catalog ships.

use crate::errors::catalog::{ErrorCode, ErrorRegistry};
use crate::errors::template;
use serde::Serialize;
use std::fmt;

/// How serious a [`CatalogWarning`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A problem found in one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogWarning {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] code {}: {}", self.severity, self.code, self.message)
    }
}

/// Checks every entry of `registry`, in code order.
#[must_use]
pub fn validate_registry(registry: &ErrorRegistry) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();
    for (code, base) in registry.iter() {
        let mut push = |severity, message: String| {
            warnings.push(CatalogWarning {
                code,
                severity,
                message,
            });
        };

        if template::scan(&base.message).dangling {
            push(
                Severity::Error,
                "localized template ends with a lone '%'".to_string(),
            );
        }
        if base.message_en.is_empty() {
            push(Severity::Warning, "English message is empty".to_string());
        } else {
            let en_scan = template::scan(&base.message_en);
            if en_scan.arg_count() > 0 {
                push(
                    Severity::Warning,
                    format!(
                        "English message contains {} printf verb(s) that are never substituted",
                        en_scan.arg_count()
                    ),
                );
            }
        }
        if code.value() < 0 {
            push(Severity::Info, "negative error code".to_string());
        }
    }
    warnings
}
