//! errdef - inspect, render and validate bilingual error catalogs.
#![forbid(unsafe_code)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use errdef_common::config::Settings;
use errdef_common::{ErrorFactory, LogConfig, LogFormat, init_logging};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "errdef",
    version,
    about = "Bilingual error code catalogs: render, validate and export"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog file (.toml or .json); defaults to ERRDEF_CATALOG
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log line format on stderr
    #[arg(long, global = true)]
    log_format: Option<LogFormatArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an error, optionally overriding either message
    Show {
        /// Error code
        #[arg(allow_negative_numbers = true)]
        code: i64,

        /// Localized message override
        #[arg(long)]
        msg: Option<String>,

        /// English message override
        #[arg(long)]
        msg_en: Option<String>,

        /// Print the JSON wire form instead of the display form
        #[arg(long)]
        json: bool,
    },
    /// Build an error by filling the localized template
    Format {
        /// Error code
        #[arg(allow_negative_numbers = true)]
        code: i64,

        /// Template arguments; numbers and booleans are detected
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,

        /// Print the JSON wire form instead of the display form
        #[arg(long)]
        json: bool,
    },
    /// Print every registered code as JSON
    Catalog,
    /// Check the catalog for suspicious entries
    Validate {
        /// Fail on any finding (also ERRDEF_STRICT_CATALOG=true)
        #[arg(long)]
        strict: bool,
    },
    /// Write the JSON schema and catalog export to a directory
    Schema {
        /// Output directory
        dir: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Json => Self::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut settings, env_errors) = Settings::from_env();

    let mut log_config = LogConfig::from_settings(&settings, "warn").with_stderr();
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format.into());
    }
    let _logging_guards = init_logging(&log_config)?;

    for err in &env_errors {
        warn!(error = %err, "Ignoring invalid environment setting");
    }
    if let Some(path) = cli.catalog {
        settings.catalog = settings.catalog.override_cli(Some(path));
    }

    let output = match cli.command {
        Commands::Show {
            code,
            msg,
            msg_en,
            json,
        } => {
            let factory = factory(&settings)?;
            commands::show(&factory, code, msg, msg_en, json)
        }
        Commands::Format { code, args, json } => {
            let factory = factory(&settings)?;
            commands::format(&factory, code, &args, json)
        }
        Commands::Catalog => commands::catalog(&commands::load_registry(&settings.catalog)?)?,
        Commands::Validate { strict } => {
            let report = commands::validate(&settings.catalog)?;
            println!("{}", report.render());
            report.enforce(strict || settings.strict_catalog.value)?;
            return Ok(());
        }
        Commands::Schema { dir } => {
            commands::schema(&dir, &commands::load_registry(&settings.catalog)?)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn factory(settings: &Settings) -> Result<ErrorFactory> {
    let registry = commands::load_registry(&settings.catalog)?;
    Ok(ErrorFactory::new(Arc::new(registry)))
}
