//! Shared library for errdef: bilingual error codes.
//!
//! - [`errors`]: registry, error values and the constructors
//! - [`diagnostics`]: sinks for constructor misuse reports
//! - [`config`]: catalog loading, validation and `ERRDEF_*` settings
//! - [`logging`]: `tracing` subscriber setup
//! - [`api`]: JSON schema and catalog export
//!
//! ```rust
//! use std::sync::Arc;
//! use errdef_common::{CustomMessage, ErrorFactory, ErrorRegistry, format_args_vec};
//!
//! let registry = ErrorRegistry::from_toml_str(r#"
//! [[errors]]
//! code = 1001
//! msg = "参数错误：%s"
//! msg_en = "invalid parameter"
//! "#).unwrap();
//! let factory = ErrorFactory::new(Arc::new(registry));
//!
//! let plain = factory.construct(1001, None);
//! let custom = factory.construct(1001, Some(&CustomMessage::english("bad phone")));
//! let formatted = factory.construct_formatted(1001, &format_args_vec!["phone"]);
//! println!("{formatted}\n{}", custom.to_json_string());
//! # let _ = plain;
//! ```

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod logging;
pub mod testing;

pub use diagnostics::{DiagnosticSink, RecordingSink, TracingSink};
pub use errors::{
    BaseMessage, CustomMessage, ErrorCode, ErrorFactory, ErrorRegistry, ErrorValue, FormatArg,
    RegistryBuilder,
};
pub use logging::{LogConfig, LogFormat, init_logging};
