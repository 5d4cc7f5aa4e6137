//! Core types and analysis for timeseries-hypothesis.
//!
//! This crate holds the statistics engine, the label/calendar partitioning of
//! measurement series, the per-segment analyzer and the report renderers. It
//! performs no input parsing; callers hand it already-parsed measurements.

pub mod analysis;
pub mod measurement;
pub mod partition;
pub mod report;
pub mod stats;

// Re-export main types for convenience
pub use analysis::{
    analyze_segment, analyze_time_series, AnalysisSet, SegmentKey, TimeSegmentAnalysis,
};
pub use measurement::{Measurement, TimeSeries, TIMESTAMP_FORMAT};
pub use partition::{distinct_labels, filter_by_label, group_by_day_of_week, group_by_hour};
pub use report::{JsonReporter, ReportError, ReportOptions, Reporter, TerminalReporter};
pub use stats::{confidence_interval, mean, std_dev, welch_t_test, AnalysisResult};
