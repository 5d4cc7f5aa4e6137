use chrono::{NaiveDateTime, TimeDelta};

/// Timestamp format used by the input table (`YYYY-MM-DD HH:MM:SS`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single labeled observation.
///
/// Timestamps carry no timezone; they are compared and bucketed exactly as
/// they were recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub timestamp: NaiveDateTime,
    pub value: f64,
    pub label: String,
}

impl Measurement {
    pub fn new(timestamp: NaiveDateTime, value: f64, label: impl Into<String>) -> Self {
        Self {
            timestamp,
            value,
            label: label.into(),
        }
    }
}

/// All measurements sharing one label, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    label: String,
    measurements: Vec<Measurement>,
    /// Inclusive `(min, max)` timestamp bounds, `None` when empty.
    bounds: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl TimeSeries {
    /// Build a series from measurements, computing the timestamp bounds in one pass.
    pub fn new(label: impl Into<String>, measurements: Vec<Measurement>) -> Self {
        let bounds = measurements.iter().fold(None, |bounds, m| match bounds {
            None => Some((m.timestamp, m.timestamp)),
            Some((min, max)) => Some((min.min(m.timestamp), max.max(m.timestamp))),
        });

        Self {
            label: label.into(),
            measurements,
            bounds,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn min_timestamp(&self) -> Option<NaiveDateTime> {
        self.bounds.map(|(min, _)| min)
    }

    pub fn max_timestamp(&self) -> Option<NaiveDateTime> {
        self.bounds.map(|(_, max)| max)
    }

    /// Time covered by the series (`max - min`), or `None` for an empty series.
    pub fn span(&self) -> Option<TimeDelta> {
        self.bounds.map(|(min, max)| max - min)
    }

    /// The raw values, in input order.
    pub fn values(&self) -> Vec<f64> {
        values(&self.measurements)
    }
}

/// Project measurements onto their numeric values.
pub fn values(measurements: &[Measurement]) -> Vec<f64> {
    measurements.iter().map(|m| m.value).collect()
}
