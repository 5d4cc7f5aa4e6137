//! timeseries-hypothesis: Statistically rigorous A/B comparison of measurement series
//!
//! This library reads labeled, time-stamped measurements, selects a baseline
//! and an experiment series, and compares their means overall and per hour of
//! day and day of week using Welch's t-test.

pub mod cli;
pub mod config;
pub mod input;
pub mod pipeline;
pub mod selection;

// Re-export core types for convenience
pub use timeseries_hypothesis_core::analysis::{AnalysisSet, SegmentKey, TimeSegmentAnalysis};
pub use timeseries_hypothesis_core::report::{
    JsonReporter, ReportError, ReportOptions, Reporter, TerminalReporter,
};
pub use timeseries_hypothesis_core::stats::AnalysisResult;
pub use timeseries_hypothesis_core::{Measurement, TimeSeries};

// Re-export main types from this crate
pub use cli::{Cli, OutputFormat};
pub use config::{Config, ConfigError};
pub use input::{parse_measurements, read_measurements, InputError};
pub use pipeline::{compare, Comparison, RunOptions};
pub use selection::{select_labels, LabelSelection, SelectionError};
