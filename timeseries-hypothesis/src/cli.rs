//! Command-line interface for timeseries-hypothesis.

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report
    Text,
    /// Machine-readable JSON document
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "timeseries-hypothesis")]
#[command(about = "Statistically rigorous A/B comparison of time-stamped measurement series")]
#[command(version)]
pub struct Cli {
    /// Semicolon-delimited input file (timestamp;value;label, with a header row)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Label of the baseline series (inferred when the input has two labels)
    #[arg(short, long)]
    pub baseline: Option<String>,

    /// Label of the experiment series (inferred when the input has two labels)
    #[arg(short, long)]
    pub experiment: Option<String>,

    /// Confidence level for statistical tests (0.0-1.0)
    #[arg(long)]
    pub confidence_level: Option<f64>,

    /// Percent difference at which significant segments are highlighted
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    /// Only non-None optional values will override the config.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(confidence_level) = self.confidence_level {
            config.analysis.confidence_level = confidence_level;
        }

        if let Some(threshold) = self.threshold {
            config.report.threshold_pct = threshold;
        }

        if self.no_color {
            config.report.color = false;
        }
    }
}
