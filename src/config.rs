// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration handling for wcag-auditor

use crate::catalog::WcagLevel;
use crate::error::{AuditError, Result};
use crate::report::export::ExportFormat;
use crate::report::DEFAULT_LEVELS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// WCAG levels under test
    #[serde(default = "default_levels")]
    pub levels: Vec<WcagLevel>,

    /// Run the automated scanner
    #[serde(default = "default_true")]
    pub automated: bool,

    /// Default export format (json, html, csv, text)
    #[serde(default = "default_export_format")]
    pub export_format: String,

    /// Fail the run when the compliance score is below this value
    #[serde(default)]
    pub fail_under: Option<u8>,

    /// AI judgment of manual criteria
    #[serde(default)]
    pub ai_assessment: AiAssessmentConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            automated: true,
            export_format: default_export_format(),
            fail_under: None,
            ai_assessment: AiAssessmentConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Reject values that cannot drive a run
    pub fn validate(&self) -> Result<()> {
        if let Some(threshold) = self.fail_under {
            if threshold > 100 {
                return Err(AuditError::Config(format!(
                    "fail_under must be between 0 and 100, got {}",
                    threshold
                )));
            }
        }
        self.export_format.parse::<ExportFormat>()?;
        Ok(())
    }

    /// Whether a judgment provider should run for this configuration
    pub fn judge_enabled(&self) -> bool {
        self.ai_assessment.enabled && self.ai_assessment.command.is_some()
    }
}

fn default_levels() -> Vec<WcagLevel> {
    DEFAULT_LEVELS.to_vec()
}

fn default_true() -> bool {
    true
}

fn default_export_format() -> String {
    "json".to_string()
}

/// AI judgment configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiAssessmentConfig {
    /// Judge manual criteria during `report`
    #[serde(default)]
    pub enabled: bool,

    /// Provider command; receives one JSON request per criterion on stdin
    #[serde(default)]
    pub command: Option<String>,

    /// Extra arguments for the provider command
    #[serde(default)]
    pub args: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|e| e == "toml").unwrap_or(false)
}

/// Load configuration from a path
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if is_toml(path) {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    config.validate()?;
    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Default config path, relative to the working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".wcag-auditor/config.yml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if is_toml(path) {
        toml::to_string_pretty(&config).map_err(|e| AuditError::Config(e.to_string()))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.levels, vec![WcagLevel::A, WcagLevel::AA]);
        assert!(config.automated);
        assert!(!config.ai_assessment.enabled);
        assert!(!config.judge_enabled());
        assert_eq!(config.export_format, "json");
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.yml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "levels: [A, AA, AAA]\nfail_under: 80\nai_assessment:\n  enabled: true\n  command: ./judge.sh\n",
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.levels.len(), 3);
        assert_eq!(config.fail_under, Some(80));
        assert!(config.judge_enabled());
        assert!(config.ai_assessment.args.is_empty());
        assert!(config.automated);
    }

    #[test]
    fn test_enabled_without_command_does_not_judge() {
        let config: Config = serde_yaml::from_str("ai_assessment:\n  enabled: true\n").unwrap();
        assert!(!config.judge_enabled());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        std::fs::write(&path, "fail_under: 120\n").unwrap();
        assert!(matches!(load_config(&path), Err(AuditError::Config(_))));

        std::fs::write(&path, "export_format: pdf\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(AuditError::UnsupportedExportFormat(_))
        ));
    }
}
