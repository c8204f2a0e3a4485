//! Subcommand implementations.
//!
//! Each command returns the text to print so `main` owns stdout and the
//! exit status.

use anyhow::{Context, Result, bail};
use errdef_common::api::{export_schemas, generate_error_catalog};
use errdef_common::config::{CatalogWarning, Severity, Sourced, validate_registry};
use errdef_common::{CustomMessage, ErrorFactory, ErrorRegistry, ErrorValue, FormatArg};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loads the catalog named by `catalog`, or an empty registry when none is set.
pub fn load_registry(catalog: &Sourced<Option<PathBuf>>) -> Result<ErrorRegistry> {
    let Some(path) = &catalog.value else {
        warn!("No catalog configured (--catalog or ERRDEF_CATALOG); every code is unregistered");
        return Ok(ErrorRegistry::empty());
    };
    debug!(
        path = %path.display(),
        source = %catalog.describe_source(),
        "Loading catalog"
    );
    ErrorRegistry::from_path(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))
}

fn render(value: &ErrorValue, json: bool) -> String {
    if json {
        value.to_json_string()
    } else {
        value.to_string()
    }
}

/// `show`: the override constructor.
pub fn show(
    factory: &ErrorFactory,
    code: i64,
    msg: Option<String>,
    msg_en: Option<String>,
    json: bool,
) -> String {
    let custom = (msg.is_some() || msg_en.is_some()).then(|| CustomMessage {
        message: msg,
        message_en: msg_en,
    });
    render(&factory.construct(code, custom.as_ref()), json)
}

/// `format`: the template constructor with loosely typed arguments.
pub fn format(factory: &ErrorFactory, code: i64, raw_args: &[String], json: bool) -> String {
    let args: Vec<FormatArg> = raw_args.iter().map(|raw| FormatArg::parse_loose(raw)).collect();
    debug!(code, args = args.len(), "Formatting error");
    render(&factory.construct_formatted(code, &args), json)
}

/// `catalog`: the machine-readable catalog as pretty JSON.
pub fn catalog(registry: &ErrorRegistry) -> Result<String> {
    serde_json::to_string_pretty(&generate_error_catalog(registry))
        .context("Failed to serialize catalog")
}

/// Result of the `validate` command.
#[derive(Debug)]
pub struct ValidationReport {
    pub warnings: Vec<CatalogWarning>,
    pub entries: usize,
}

impl ValidationReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for warning in &self.warnings {
            out.push_str(&warning.to_string());
            out.push('\n');
        }
        let errors = self
            .warnings
            .iter()
            .filter(|w| w.severity == Severity::Error)
            .count();
        out.push_str(&format!(
            "{} entries checked, {} findings ({} errors)",
            self.entries,
            self.warnings.len(),
            errors
        ));
        out
    }

    /// Fails when strict mode is on and anything was reported.
    pub fn enforce(&self, strict: bool) -> Result<()> {
        if strict && !self.warnings.is_empty() {
            bail!(
                "Catalog has {} findings and strict mode is enabled",
                self.warnings.len()
            );
        }
        Ok(())
    }
}

/// `validate`: requires a configured catalog.
pub fn validate(catalog: &Sourced<Option<PathBuf>>) -> Result<ValidationReport> {
    if catalog.value.is_none() {
        bail!("validate needs a catalog (--catalog or ERRDEF_CATALOG)");
    }
    let registry = load_registry(catalog)?;
    let warnings = validate_registry(&registry);
    info!(
        entries = registry.len(),
        findings = warnings.len(),
        "Catalog validated"
    );
    Ok(ValidationReport {
        warnings,
        entries: registry.len(),
    })
}

/// `schema`: writes the schema files into `dir`.
pub fn schema(dir: &Path, registry: &ErrorRegistry) -> Result<String> {
    let result = export_schemas(dir, registry)
        .with_context(|| format!("Failed to export schemas to {}", dir.display()))?;
    Ok(result.files.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use errdef_common::RegistryBuilder;
    use errdef_common::config::ConfigSource;
    use std::sync::Arc;

    fn factory() -> ErrorFactory {
        let registry = RegistryBuilder::new()
            .with_entry(1001, "参数错误", "invalid parameter")
            .with_entry(2001, "余额不足 %.2f 元", "insufficient balance")
            .build()
            .expect("registry");
        ErrorFactory::new(Arc::new(registry))
    }

    fn write_catalog(dir: &Path, body: &str) -> Sourced<Option<PathBuf>> {
        let path = dir.join("errors.toml");
        std::fs::write(&path, body).expect("write catalog");
        Sourced::default_value(None).override_cli(Some(path))
    }

    #[test]
    fn test_show_without_override() {
        assert_eq!(
            show(&factory(), 1001, None, None, false),
            "ErrCode [1001]\nErrMsg: 参数错误\nErrMsgEn: invalid parameter"
        );
    }

    #[test]
    fn test_show_with_english_override_as_json() {
        let out = show(&factory(), 1001, None, Some("bad phone".into()), true);
        assert_eq!(
            out,
            r#"{"err_code":1001,"err_msg":"参数错误","err_msg_en":"bad phone"}"#
        );
    }

    #[test]
    fn test_format_parses_arguments() {
        let out = format(&factory(), 2001, &["3.5".to_string()], true);
        assert_eq!(
            out,
            r#"{"err_code":2001,"err_msg":"余额不足 3.50 元","err_msg_en":"insufficient balance"}"#
        );
    }

    #[test]
    fn test_catalog_output_is_json() {
        let out = catalog(factory().registry()).expect("catalog");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["errors"][1]["code"], 2001);
        assert_eq!(value["errors"][1]["arg_count"], 1);
    }

    #[test]
    fn test_load_registry_without_catalog_is_empty() {
        let registry = load_registry(&Sourced::default_value(None)).expect("empty registry");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_registry_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = write_catalog(dir.path(), "[[errors]]\ncode = 1\nmsg = \"\"\n");
        assert_eq!(catalog.source, ConfigSource::CommandLine);
        let err = load_registry(&catalog).expect_err("empty message rejected");
        assert!(format!("{err:#}").contains("errors.toml"));
    }

    #[test]
    fn test_validate_strict_fails_on_findings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = write_catalog(
            dir.path(),
            "[[errors]]\ncode = 7\nmsg = \"坏的模板 %\"\nmsg_en = \"\"\n",
        );
        let report = validate(&catalog).expect("catalog loads");
        assert_eq!(report.entries, 1);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.render().ends_with("1 entries checked, 2 findings (1 errors)"));
        assert!(report.enforce(false).is_ok());
        assert!(report.enforce(true).is_err());
    }

    #[test]
    fn test_validate_requires_catalog() {
        assert!(validate(&Sourced::default_value(None)).is_err());
    }

    #[test]
    fn test_schema_lists_written_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = schema(dir.path(), factory().registry()).expect("export");
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("error-codes.json"));
    }
}
