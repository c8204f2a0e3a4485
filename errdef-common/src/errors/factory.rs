//! Error construction against a registry.
//!
//! [`ErrorFactory`] holds the registry and a diagnostic sink and exposes the
//! two construction entry points:
//!
//! - [`ErrorFactory::construct`]: registry text, optionally overridden per slot
//! - [`ErrorFactory::construct_formatted`]: registry template with printf args
//!
//! Both are total. Invalid input degrades to a placeholder value
//! ("未知错误" / "unknown error") that keeps the requested code.
//!
//! The two entry points treat unregistered codes differently: `construct`
//! reports an error diagnostic, `construct_formatted` stays silent. Callers
//! observe both behaviors, so they are kept separate rather than unified.

use super::catalog::{ErrorCode, ErrorRegistry};
use super::custom::CustomMessage;
use super::template::{FormatArg, sprintf};
use super::value::ErrorValue;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use std::sync::Arc;
use tracing::trace;

/// Diagnostic emitted when more than one override is passed.
pub const REDUNDANT_OVERRIDE_MSG: &str = "redundant override parameters";

/// Diagnostic emitted when an unregistered code arrives without a localized message.
pub const MISSING_MESSAGE_MSG: &str = "missing message when defining a custom error";

/// Builds [`ErrorValue`]s from a shared, read-only registry.
///
/// Cloning is cheap; clones share the registry and sink.
#[derive(Clone)]
pub struct ErrorFactory {
    registry: Arc<ErrorRegistry>,
    sink: Arc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for ErrorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorFactory")
            .field("registered_codes", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl ErrorFactory {
    /// Factory reporting diagnostics through [`TracingSink`].
    #[must_use]
    pub fn new(registry: Arc<ErrorRegistry>) -> Self {
        Self::with_sink(registry, Arc::new(TracingSink))
    }

    /// Factory reporting diagnostics through `sink`.
    #[must_use]
    pub fn with_sink(registry: Arc<ErrorRegistry>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { registry, sink }
    }

    #[must_use]
    pub fn registry(&self) -> &ErrorRegistry {
        &self.registry
    }

    /// Builds an error for `code`, optionally overriding its messages.
    ///
    /// Registered code:
    /// - no override: the registry pair, verbatim
    /// - override: each slot independently takes the override text when it is
    ///   non-empty, otherwise the registry text
    ///
    /// Unregistered code:
    /// - override with a non-empty localized slot: the override, verbatim
    ///   (an absent English slot becomes `""`)
    /// - anything else: placeholder value plus an error diagnostic
    #[must_use]
    pub fn construct(
        &self,
        code: impl Into<ErrorCode>,
        custom: Option<&CustomMessage>,
    ) -> ErrorValue {
        let code = code.into();

        if let Some(base) = self.registry.lookup(code) {
            let Some(custom) = custom else {
                return ErrorValue::new(code, base.message.as_str(), base.message_en.as_str());
            };
            trace!(%code, "applying message override to registered code");
            return ErrorValue::new(
                code,
                custom.localized_text().unwrap_or(&base.message),
                custom.english_text().unwrap_or(&base.message_en),
            );
        }

        match custom {
            Some(custom) if custom.localized_text().is_some() => ErrorValue::new(
                code,
                custom.message.as_deref().unwrap_or_default(),
                custom.message_en.as_deref().unwrap_or_default(),
            ),
            _ => {
                self.sink.record_error(MISSING_MESSAGE_MSG);
                ErrorValue::placeholder(code)
            }
        }
    }

    /// Slice form of [`ErrorFactory::construct`].
    ///
    /// Only the first override is honoured; passing more than one emits a
    /// warning diagnostic and otherwise behaves like passing the first alone.
    #[must_use]
    pub fn construct_from_slice(
        &self,
        code: impl Into<ErrorCode>,
        customs: &[CustomMessage],
    ) -> ErrorValue {
        if customs.len() > 1 {
            self.sink.warn(REDUNDANT_OVERRIDE_MSG);
        }
        self.construct(code, customs.first())
    }

    /// Builds an error for `code`, rendering its localized template with `args`.
    ///
    /// The English message is never templated. Without args, the registry
    /// pair is returned verbatim (a literal `%%` stays doubled). Template and
    /// argument mismatches are rendered inline as described in
    /// [`crate::errors::template`].
    ///
    /// An unregistered code yields the placeholder value with no diagnostic.
    #[must_use]
    pub fn construct_formatted(&self, code: impl Into<ErrorCode>, args: &[FormatArg]) -> ErrorValue {
        let code = code.into();
        let Some(base) = self.registry.lookup(code) else {
            return ErrorValue::placeholder(code);
        };
        if args.is_empty() {
            return ErrorValue::new(code, base.message.as_str(), base.message_en.as_str());
        }
        ErrorValue::new(code, sprintf(&base.message, args), base.message_en.as_str())
    }
}
