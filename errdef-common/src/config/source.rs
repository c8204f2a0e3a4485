//! Source tracking for configuration values.

use serde::Serialize;
use std::fmt;

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    /// Built-in default.
    Default,
    /// `ERRDEF_*` environment variable.
    Environment,
    /// Command-line flag.
    CommandLine,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Environment => write!(f, "environment"),
            Self::CommandLine => write!(f, "command line"),
        }
    }
}

/// A value together with its [`ConfigSource`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub value: T,
    pub source: ConfigSource,
    /// Name of the environment variable, when `source` is `Environment`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_var: Option<String>,
}

impl<T> Sourced<T> {
    /// Value read from environment variable `var`.
    pub fn from_env(value: T, var: impl Into<String>) -> Self {
        Self {
            value,
            source: ConfigSource::Environment,
            env_var: Some(var.into()),
        }
    }

    /// Built-in default.
    pub fn default_value(value: T) -> Self {
        Self {
            value,
            source: ConfigSource::Default,
            env_var: None,
        }
    }

    /// Replaces the value with a command-line override.
    #[must_use]
    pub fn override_cli(self, value: T) -> Self {
        Self {
            value,
            source: ConfigSource::CommandLine,
            env_var: None,
        }
    }

    /// Human-readable origin, e.g. `environment (ERRDEF_CATALOG)`.
    pub fn describe_source(&self) -> String {
        match &self.env_var {
            Some(var) => format!("{} ({})", self.source, var),
            None => self.source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_source() {
        let from_env = Sourced::from_env(3, "ERRDEF_CATALOG");
        assert_eq!(from_env.describe_source(), "environment (ERRDEF_CATALOG)");

        let overridden = from_env.override_cli(4);
        assert_eq!(overridden.value, 4);
        assert_eq!(overridden.source, ConfigSource::CommandLine);
        assert_eq!(overridden.describe_source(), "command line");

        assert_eq!(Sourced::default_value(0).describe_source(), "default");
    }
}
