//! Logging setup shared by errdef binaries.
//!
//! Layers:
//! - stderr, pretty or JSON (optional)
//! - daily rolling JSON file via `tracing-appender` (optional)
//!
//! Keep the returned [`LoggingGuards`] alive for the life of the process,
//! otherwise buffered file output is lost.

use crate::config::{ConfigSource, Settings};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to create log directory {path}: {source}")]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install logging subscriber: {0}")]
    Init(String),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `errdef=debug,warn`.
    pub level: String,
    pub format: LogFormat,
    pub stderr: bool,
    pub file_dir: Option<PathBuf>,
    pub file_prefix: String,
}

impl LogConfig {
    /// Stderr-less configuration at `level`.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::Pretty,
            stderr: false,
            file_dir: None,
            file_prefix: "errdef.log".to_string(),
        }
    }

    /// Builds a configuration from parsed [`Settings`].
    ///
    /// `default_level` applies when `ERRDEF_LOG_LEVEL` was not set.
    pub fn from_settings(settings: &Settings, default_level: &str) -> Self {
        let level = match settings.log_level.source {
            ConfigSource::Default => default_level.to_string(),
            _ => settings.log_level.value.clone(),
        };
        Self {
            level,
            format: settings.log_format.value.parse().unwrap_or_default(),
            file_dir: settings.log_dir.value.clone(),
            ..Self::new(default_level)
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }

    #[must_use]
    pub fn with_file_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file_dir = Some(dir.into());
        self
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_new(&self.level).map_err(|e| LoggingError::InvalidFilter {
            filter: self.level.clone(),
            reason: e.to_string(),
        })
    }
}

/// Flush guards for non-blocking writers.
#[must_use = "dropping the guards stops file logging"]
pub struct LoggingGuards {
    guards: Vec<WorkerGuard>,
}

impl LoggingGuards {
    /// Number of background writers kept alive.
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// Invalid filter, unusable log directory, or a subscriber already installed.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuards, LoggingError> {
    let filter = config.filter()?;
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    let mut guards = Vec::new();

    if config.stderr {
        let layer = match config.format {
            LogFormat::Pretty => fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .boxed(),
        };
        layers.push(layer);
    }

    if let Some(dir) = &config.file_dir {
        std::fs::create_dir_all(dir).map_err(|source| LoggingError::LogDir {
            path: dir.clone(),
            source,
        })?;
        let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(LoggingGuards { guards })
}
