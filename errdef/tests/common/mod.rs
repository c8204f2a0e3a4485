#![allow(dead_code)]

pub mod assertions;
pub mod logging;

pub use assertions::{assert_contains, assert_path_exists};
pub use logging::init_test_logging;

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const FIXTURE_TOML: &str = r#"
[[errors]]
code = 1001
msg = "参数错误"
msg_en = "invalid parameter"

[[errors]]
code = 2001
msg = "余额不足，还差 %.2f 元（订单 %d）"
msg_en = "insufficient balance"
"#;

/// Writes `body` as `name` inside `dir`.
pub fn write_catalog(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write catalog");
    path
}

/// The errdef binary with a clean `ERRDEF_*` environment.
pub fn errdef_command() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_errdef"));
    command
        .env_remove("ERRDEF_CATALOG")
        .env_remove("ERRDEF_STRICT_CATALOG")
        .env_remove("ERRDEF_LOG_DIR")
        .env_remove("ERRDEF_LOG_FORMAT")
        .env("ERRDEF_LOG_LEVEL", "warn");
    command
}

/// Runs the errdef binary with a clean `ERRDEF_*` environment.
pub fn run_errdef(args: &[&str]) -> Output {
    errdef_command()
        .args(args)
        .output()
        .expect("Failed to run errdef")
}
