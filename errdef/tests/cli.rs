mod common;

use common::{
    FIXTURE_TOML, assert_contains, assert_path_exists, errdef_command, init_test_logging,
    run_errdef, write_catalog,
};

#[test]
fn test_help_includes_description() {
    init_test_logging();
    crate::test_log!("TEST START: test_help_includes_description");

    let output = run_errdef(&["--help"]);
    assert!(output.status.success(), "errdef --help failed");
    assert_contains(&String::from_utf8_lossy(&output.stdout), "Bilingual error code");
}

#[test]
fn test_show_display_form() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = write_catalog(dir.path(), "errors.toml", FIXTURE_TOML);

    let output = run_errdef(&["--catalog", catalog.to_str().unwrap(), "show", "1001"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "ErrCode [1001]\nErrMsg: 参数错误\nErrMsgEn: invalid parameter\n"
    );
}

#[test]
fn test_show_unregistered_reports_diagnostic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = write_catalog(dir.path(), "errors.toml", FIXTURE_TOML);

    let output = run_errdef(&["show", "9999", "--json", "--catalog", catalog.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        r#"{"err_code":9999,"err_msg":"未知错误","err_msg_en":"unknown error"}"#
    );
    assert_contains(
        &String::from_utf8_lossy(&output.stderr),
        "missing message when defining a custom error",
    );
}

#[test]
fn test_show_custom_error_without_catalog_entry() {
    let output = run_errdef(&["show", "42", "--msg", "自定义", "--json"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        r#"{"err_code":42,"err_msg":"自定义","err_msg_en":""}"#
    );
}

#[test]
fn test_format_fills_template() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = write_catalog(dir.path(), "errors.toml", FIXTURE_TOML);

    let output = run_errdef(&[
        "--catalog",
        catalog.to_str().unwrap(),
        "format",
        "2001",
        "12.5",
        "77",
        "--json",
    ]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        r#"{"err_code":2001,"err_msg":"余额不足，还差 12.50 元（订单 77）","err_msg_en":"insufficient balance"}"#
    );
}

#[test]
fn test_catalog_reads_json_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = write_catalog(
        dir.path(),
        "errors.json",
        r#"[{"code": 5, "msg": "找不到 %s", "msg_en": "not found"}]"#,
    );

    let output = run_errdef(&["catalog", "--catalog", catalog.to_str().unwrap()]);
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("catalog output is JSON");
    assert_eq!(value["errors"][0]["code"], 5);
    assert_eq!(value["errors"][0]["arg_count"], 1);
}

#[test]
fn test_validate_strict_exit_status() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = write_catalog(
        dir.path(),
        "errors.toml",
        "[[errors]]\ncode = 3\nmsg = \"用户 %s\"\nmsg_en = \"user %s\"\n",
    );
    let path = catalog.to_str().unwrap();

    let lenient = run_errdef(&["--catalog", path, "validate"]);
    assert!(lenient.status.success());
    assert_contains(&String::from_utf8_lossy(&lenient.stdout), "[warning] code 3");

    let strict = run_errdef(&["--catalog", path, "validate", "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
    assert_contains(&String::from_utf8_lossy(&strict.stderr), "strict mode");
}

#[test]
fn test_load_error_exits_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = write_catalog(
        dir.path(),
        "errors.toml",
        "[[errors]]\ncode = 1\nmsg = \"a\"\n\n[[errors]]\ncode = 1\nmsg = \"b\"\n",
    );

    let output = run_errdef(&["--catalog", catalog.to_str().unwrap(), "show", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert_contains(&String::from_utf8_lossy(&output.stderr), "Failed to load catalog");
}

#[test]
fn test_usage_error_exits_two() {
    let output = run_errdef(&["show", "not-a-number"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_schema_writes_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = write_catalog(dir.path(), "errors.toml", FIXTURE_TOML);
    let out = dir.path().join("schemas");

    let output = run_errdef(&[
        "--catalog",
        catalog.to_str().unwrap(),
        "schema",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_path_exists(&out.join("error-value.schema.json"));
    assert_path_exists(&out.join("error-codes.json"));
}

#[test]
fn test_missing_catalog_from_environment_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.toml");

    let output = errdef_command()
        .env("ERRDEF_CATALOG", &missing)
        .args(["show", "1001"])
        .output()
        .expect("Failed to run errdef");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "Path not found for ERRDEF_CATALOG");
    assert_contains(&stderr, "Failed to load catalog");
}

#[test]
fn test_invalid_environment_setting_reported_once() {
    let output = errdef_command()
        .env("ERRDEF_LOG_FORMAT", "loud")
        .args(["show", "42", "--msg", "自定义"])
        .output()
        .expect("Failed to run errdef");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("Invalid value for ERRDEF_LOG_FORMAT").count(),
        1,
        "stderr: {stderr}"
    );
}
