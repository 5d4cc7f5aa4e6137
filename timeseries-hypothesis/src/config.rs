//! Configuration loading for timeseries-hypothesis.
//!
//! Supports loading configuration from TOML files, with sensible defaults
//! for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Top-level configuration for timeseries-hypothesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the statistical analysis.
    pub analysis: AnalysisConfig,
    /// Settings for report rendering.
    pub report: ReportConfig,
}

/// Configuration for the statistical analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Confidence level for statistical tests (e.g., 0.95 for 95% confidence).
    pub confidence_level: f64,
}

/// Configuration for report rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Absolute percent difference at which significant segments are highlighted.
    pub threshold_pct: f64,
    /// Whether colored output is allowed at all.
    pub color: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            threshold_pct: 5.0,
            color: true,
        }
    }
}

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("confidence_level must be between 0 and 1 (exclusive), got {0}")]
    InvalidConfidenceLevel(f64),

    #[error("threshold_pct must be a non-negative number, got {0}")]
    InvalidThreshold(f64),
}

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".timeseries-hypothesis.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `path` if it exists, or fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Check that all values are usable by the analysis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let confidence_level = self.analysis.confidence_level;
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ConfigError::InvalidConfidenceLevel(confidence_level));
        }

        let threshold = self.report.threshold_pct;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        Ok(())
    }
}
