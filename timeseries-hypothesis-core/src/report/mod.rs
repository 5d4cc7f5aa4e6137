use chrono::TimeDelta;
use serde::Serialize;
use thiserror::Error;

use crate::analysis::AnalysisSet;
use crate::measurement::TimeSeries;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a reporter should show, and how to judge it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportOptions {
    /// Show the per-hour breakdown (baseline spans at least a day).
    pub show_hourly: bool,
    /// Show the per-day-of-week breakdown (baseline spans at least a week).
    pub show_daily: bool,
    /// Confidence level the analysis ran at.
    pub confidence_level: f64,
    /// Absolute percent difference at which a significant segment is highlighted.
    pub threshold_pct: f64,
}

impl ReportOptions {
    /// Derive breakdown visibility from the time span covered by the baseline.
    ///
    /// An empty baseline (`None`) shows neither breakdown.
    pub fn from_span(span: Option<TimeDelta>, confidence_level: f64, threshold_pct: f64) -> Self {
        let (show_hourly, show_daily) = match span {
            Some(span) => (span >= TimeDelta::hours(24), span >= TimeDelta::days(7)),
            None => (false, false),
        };

        Self {
            show_hourly,
            show_daily,
            confidence_level,
            threshold_pct,
        }
    }

    /// Derive options from the baseline series.
    pub fn for_baseline(baseline: &TimeSeries, confidence_level: f64, threshold_pct: f64) -> Self {
        Self::from_span(baseline.span(), confidence_level, threshold_pct)
    }
}

pub trait Reporter: Send + Sync {
    fn report(&self, analysis: &AnalysisSet, options: &ReportOptions) -> Result<(), ReportError>;
}

mod json;
mod terminal;
pub use json::JsonReporter;
pub use terminal::TerminalReporter;
