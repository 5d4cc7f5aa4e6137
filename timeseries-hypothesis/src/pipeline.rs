//! End-to-end comparison: label partitioning, segment analysis and report options.

use timeseries_hypothesis_core::{
    analyze_time_series, filter_by_label, AnalysisSet, Measurement, ReportOptions, TimeSeries,
};

use crate::config::Config;
use crate::selection::LabelSelection;

/// Everything one comparison run needs, passed explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub baseline_label: String,
    pub experiment_label: String,
    pub confidence_level: f64,
    pub threshold_pct: f64,
    pub color_enabled: bool,
}

impl RunOptions {
    /// Combine resolved labels with validated configuration.
    ///
    /// `is_terminal` reports whether output goes to a terminal; colors are
    /// only enabled when the configuration allows them and it does.
    pub fn new(labels: LabelSelection, config: &Config, is_terminal: bool) -> Self {
        Self {
            baseline_label: labels.baseline,
            experiment_label: labels.experiment,
            confidence_level: config.analysis.confidence_level,
            threshold_pct: config.report.threshold_pct,
            color_enabled: config.report.color && is_terminal,
        }
    }
}

/// Result of comparing the two selected series.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub baseline: TimeSeries,
    pub experiment: TimeSeries,
    pub analysis: AnalysisSet,
    pub report_options: ReportOptions,
}

/// Partition `records` by the selected labels and analyze every segment.
pub fn compare(records: &[Measurement], options: &RunOptions) -> Comparison {
    let baseline = filter_by_label(records, &options.baseline_label);
    let experiment = filter_by_label(records, &options.experiment_label);
    log::debug!(
        "baseline {:?}: {} measurements, experiment {:?}: {} measurements",
        baseline.label(),
        baseline.len(),
        experiment.label(),
        experiment.len()
    );

    let analysis = analyze_time_series(&baseline, &experiment, options.confidence_level);
    log::debug!("analyzed {} segments", analysis.len());

    let report_options =
        ReportOptions::for_baseline(&baseline, options.confidence_level, options.threshold_pct);

    Comparison {
        baseline,
        experiment,
        analysis,
        report_options,
    }
}
