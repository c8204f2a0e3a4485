//! Diagnostic sinks consulted when constructor input is inconsistent.
//!
//! Constructors never fail. When the caller asks for something that cannot
//! be honoured (an unregistered code without a message, redundant overrides),
//! the constructor degrades and reports through a [`DiagnosticSink`].
//! Reporting is fire-and-forget: sinks return nothing and must not block.

use std::sync::Mutex;

/// Log target used by [`TracingSink`].
pub const DIAGNOSTICS_TARGET: &str = "errdef::diagnostics";

/// Receiver for constructor diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Non-fatal misuse; the constructor carried on with a sensible choice.
    fn warn(&self, message: &str);

    /// Misuse that forced a placeholder value.
    fn record_error(&self, message: &str);
}

/// Default sink: forwards to `tracing` under [`DIAGNOSTICS_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!(target: DIAGNOSTICS_TARGET, "{}", message);
    }

    fn record_error(&self, message: &str) {
        tracing::error!(target: DIAGNOSTICS_TARGET, "{}", message);
    }
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&self, _message: &str) {}

    fn record_error(&self, _message: &str) {}
}

/// Severity of a recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Warn,
    Error,
}

/// A diagnostic captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// Sink that keeps every diagnostic in memory, for tests and for callers
/// that want to surface diagnostics themselves.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn records(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Recorded diagnostics at `level`.
    #[must_use]
    pub fn at_level(&self, level: DiagnosticLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|d| d.level == level)
            .map(|d| d.message.clone())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drains and returns everything recorded.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        // A panicking test thread must not hide diagnostics from the others.
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn push(&self, level: DiagnosticLevel, message: &str) {
        self.lock().push(Diagnostic {
            level,
            message: message.to_string(),
        });
    }
}

impl DiagnosticSink for RecordingSink {
    fn warn(&self, message: &str) {
        self.push(DiagnosticLevel::Warn, message);
    }

    fn record_error(&self, message: &str) {
        self.push(DiagnosticLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order_and_levels() {
        let sink = RecordingSink::new();
        sink.warn("first");
        sink.record_error("second");
        sink.warn("third");

        assert_eq!(sink.at_level(DiagnosticLevel::Warn), vec!["first", "third"]);
        assert_eq!(sink.at_level(DiagnosticLevel::Error), vec!["second"]);
        assert_eq!(sink.records().len(), 3);
    }

    #[test]
    fn test_recording_sink_take_drains() {
        let sink = RecordingSink::new();
        sink.record_error("boom");
        let drained = sink.take();
        assert_eq!(drained.len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_tracing_and_null_sinks_do_not_panic() {
        crate::testing::init_test_logging();
        TracingSink.warn("tracing warn");
        TracingSink.record_error("tracing error");
        NullSink.warn("ignored");
        NullSink.record_error("ignored");
    }
}
