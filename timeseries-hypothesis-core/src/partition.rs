//! Splitting measurements into labeled series and calendar buckets.

use std::collections::BTreeMap;

use chrono::{Datelike, Timelike};

use crate::measurement::{Measurement, TimeSeries};

/// Select every record whose label equals `label`, preserving input order.
///
/// Returns an empty series when nothing matches.
pub fn filter_by_label(records: &[Measurement], label: &str) -> TimeSeries {
    let matching = records
        .iter()
        .filter(|m| m.label == label)
        .cloned()
        .collect();
    TimeSeries::new(label, matching)
}

/// Distinct labels in order of first appearance.
pub fn distinct_labels(records: &[Measurement]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for m in records {
        if !labels.iter().any(|l| *l == m.label) {
            labels.push(m.label.clone());
        }
    }
    labels
}

/// Group measurements by hour of day (0..=23).
pub fn group_by_hour(measurements: &[Measurement]) -> BTreeMap<u32, Vec<Measurement>> {
    group_by(measurements, |m| m.timestamp.hour())
}

/// Group measurements by day of week, 0 = Sunday .. 6 = Saturday.
pub fn group_by_day_of_week(measurements: &[Measurement]) -> BTreeMap<u32, Vec<Measurement>> {
    group_by(measurements, |m| m.timestamp.weekday().num_days_from_sunday())
}

fn group_by<F>(measurements: &[Measurement], key: F) -> BTreeMap<u32, Vec<Measurement>>
where
    F: Fn(&Measurement) -> u32,
{
    let mut grouped: BTreeMap<u32, Vec<Measurement>> = BTreeMap::new();
    for m in measurements {
        grouped.entry(key(m)).or_default().push(m.clone());
    }
    grouped
}
