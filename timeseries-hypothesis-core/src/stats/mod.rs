use serde::Serialize;

/// Descriptive summary of one sample.
///
/// With fewer than two values the standard deviation is zero and the
/// confidence interval collapses onto the mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Sample mean (zero for an empty sample).
    pub mean: f64,
    /// Number of observations.
    pub count: usize,
    /// Sample standard deviation (n-1 denominator).
    pub std_dev: f64,
    /// Two-sided confidence interval for the mean, as `(low, high)`.
    pub confidence_interval: (f64, f64),
}

impl AnalysisResult {
    /// Summarize `values` at the given confidence level.
    pub fn from_values(values: &[f64], confidence_level: f64) -> Self {
        Self {
            mean: mean(values),
            count: values.len(),
            std_dev: std_dev(values),
            confidence_interval: confidence_interval(values, confidence_level),
        }
    }
}

mod descriptive;
mod interval;
mod welch;

pub use descriptive::{mean, std_dev, variance};
pub use interval::confidence_interval;
pub use welch::welch_t_test;
