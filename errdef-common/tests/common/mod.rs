#![allow(dead_code)]

use errdef_common::{ErrorFactory, ErrorRegistry, RecordingSink, RegistryBuilder};
use std::sync::Arc;

pub use errdef_common::testing::init_test_logging;

pub const FIXTURE_TOML: &str = r#"
[[errors]]
code = 1001
msg = "参数错误"
msg_en = "invalid parameter"

[[errors]]
code = 1002
msg = "用户 %s 不存在"
msg_en = "user not found"

[[errors]]
code = 2001
msg = "余额不足，还差 %.2f 元（订单 %d）"
msg_en = "insufficient balance"
"#;

pub fn fixture_registry() -> ErrorRegistry {
    ErrorRegistry::from_toml_str(FIXTURE_TOML).expect("fixture catalog is valid")
}

/// Factory over `registry` with a recording sink the test can inspect.
pub fn recording_factory(registry: ErrorRegistry) -> (ErrorFactory, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let factory = ErrorFactory::with_sink(Arc::new(registry), sink.clone());
    (factory, sink)
}

/// Registry with one entry per `(code, msg, msg_en)` triple; later duplicates win.
pub fn registry_from(entries: &[(i64, String, String)]) -> ErrorRegistry {
    let mut seen = std::collections::HashMap::new();
    for (code, msg, msg_en) in entries {
        seen.insert(*code, (msg.clone(), msg_en.clone()));
    }
    let mut builder = RegistryBuilder::new();
    for (code, (msg, msg_en)) in seen {
        builder = builder.with_entry(code, msg, msg_en);
    }
    builder.build().expect("deduplicated entries")
}
