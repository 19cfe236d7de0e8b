//! Configuration management for EcoValuate.
//!
//! The runner reads a single configuration file at `~/.ecovaluate/config.json`,
//! optionally split into per-section files (see [`crate::config_loader`]).
//!
//! # Configuration Priority
//!
//! 1. Environment variables (ECOVALUATE_* prefix)
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `ECOVALUATE_LOG_LEVEL` → observability.log_level
//! - `ECOVALUATE_LOG_FORMAT` → observability.log_format
//! - `ECOVALUATE_REPORT_FORMAT` → report.format

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config_loader::load_modular_config;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".ecovaluate"),
        |dirs| dirs.home_dir().join(".ecovaluate"),
    )
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    /// Aliases: "level" for backward compatibility with existing config files
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,

    /// Additional module targets to force to `warn`.
    #[serde(default)]
    pub excluded_targets: Vec<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            excluded_targets: Vec::new(),
        }
    }
}

// ============================================================================
// Report Configuration
// ============================================================================

/// Output format of a rendered valuation report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable Markdown tables
    #[default]
    Markdown,
    /// Pretty-printed JSON of the full report record
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format '{other}' (expected markdown or json)")),
        }
    }
}

/// Report rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format
    #[serde(default)]
    pub format: ReportFormat,

    /// Render the baseline-vs-ESG comparison, margin trajectory and attribution
    #[serde(default = "default_true")]
    pub include_baseline: bool,

    /// Scenario file used when none is given on the command line.
    /// A leading `~` is expanded to the home directory.
    #[serde(default)]
    pub scenario_path: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            include_baseline: true,
            scenario_path: None,
        }
    }
}

impl ReportConfig {
    /// Configured scenario path with `~` expanded.
    pub fn expanded_scenario_path(&self) -> Option<PathBuf> {
        self.scenario_path
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Report rendering
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from the default directory.
    ///
    /// Falls back to defaults when no configuration file exists.
    pub fn load() -> Result<Self> {
        Self::load_from_dir(&config_dir())
    }

    /// Load configuration from a directory holding `config.json` and optional
    /// section files.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let value = load_modular_config(Some(dir.to_path_buf()))?;
        let is_empty = value.as_object().map_or(true, |obj| obj.is_empty());
        if is_empty {
            tracing::info!(dir = %dir.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        serde_json::from_value(value)
            .with_context(|| format!("Failed to parse config from {}", dir.display()))
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("ECOVALUATE_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("ECOVALUATE_LOG_FORMAT") {
            self.observability.log_format = format;
        }
        if let Some(format) = lookup("ECOVALUATE_REPORT_FORMAT") {
            match format.parse() {
                Ok(f) => self.report.format = f,
                Err(e) => tracing::warn!(error = %e, "Ignoring ECOVALUATE_REPORT_FORMAT"),
            }
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.log_format, "pretty");
        assert_eq!(config.report.format, ReportFormat::Markdown);
        assert!(config.report.include_baseline);
        assert!(config.report.scenario_path.is_none());
    }

    #[test]
    fn test_parse_partial_config_with_aliases() {
        let config: Config = serde_json::from_str(
            r#"{ "observability": { "level": "debug", "format": "json" },
                 "report": { "format": "json", "include_baseline": false } }"#,
        )
        .unwrap();

        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.log_format, "json");
        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(!config.report.include_baseline);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ECOVALUATE_LOG_LEVEL", "trace"),
            ("ECOVALUATE_REPORT_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.observability.log_level, "trace");
        assert_eq!(config.observability.log_format, "pretty");
        assert_eq!(config.report.format, ReportFormat::Json);
    }

    #[test]
    fn test_invalid_report_format_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| {
            (key == "ECOVALUATE_REPORT_FORMAT").then(|| "pdf".to_string())
        });
        assert_eq!(config.report.format, ReportFormat::Markdown);
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, r#"{ "report": { "scenario_path": "/tmp/s.json" } }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.report.expanded_scenario_path(),
            Some(PathBuf::from("/tmp/s.json"))
        );
    }

    #[test]
    fn test_report_format_round_trip_strings() {
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!(ReportFormat::Json.to_string(), "json");
        assert!("xml".parse::<ReportFormat>().is_err());
    }
}
