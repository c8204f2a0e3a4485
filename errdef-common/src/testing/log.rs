//! Test logging.
//!
//! Call [`init_test_logging`] at the top of a test to route `tracing`
//! output, including constructor diagnostics, through the libtest writer.
//!
//! ```ignore
//! #[test]
//! fn test_example() {
//!     errdef_common::testing::init_test_logging(); // safe to call repeatedly
//!     tracing::info!("captured per test");
//! }
//! ```

use std::sync::Once;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

static TEST_LOGGING_INIT: Once = Once::new();

/// Installs a compact test-writer subscriber once per process.
///
/// # Environment Variables
///
/// - `ERRDEF_TEST_LOG_LEVEL`: filter directive (default: `debug`)
/// - `ERRDEF_TEST_LOG_JSON`: when set, emit JSON lines instead
pub fn init_test_logging() {
    TEST_LOGGING_INIT.call_once(|| {
        let level = std::env::var("ERRDEF_TEST_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());
        let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("debug"));

        let json = std::env::var_os("ERRDEF_TEST_LOG_JSON").is_some();
        let layer = if json {
            fmt::layer()
                .json()
                .with_test_writer()
                .with_current_span(true)
                .boxed()
        } else {
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_level(true)
                .compact()
                .boxed()
        };

        // Another subscriber may already be installed by the embedding test
        // binary; keep it.
        let _ = tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::debug!(target: "errdef::test", "logging initialised twice without panicking");
    }
}
