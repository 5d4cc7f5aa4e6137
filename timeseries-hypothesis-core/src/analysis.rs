//! Segment analysis: overall, per hour of day and per day of week.
//!
//! Every segment is an independent pure computation over two slices of
//! measurements, so hourly and daily buckets are analyzed in parallel and then
//! assembled into an [`AnalysisSet`] ordered by [`SegmentKey`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::measurement::{values, Measurement, TimeSeries};
use crate::partition::{group_by_day_of_week, group_by_hour};
use crate::stats::{welch_t_test, AnalysisResult};

/// Day names indexed by the day-of-week segment number (0 = Sunday).
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Identifies one analyzed segment.
///
/// Ordered as overall, then hours ascending, then days ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentKey {
    Overall,
    /// Hour of day, 0..=23.
    Hour(u32),
    /// Day of week, 0 = Sunday .. 6 = Saturday.
    Day(u32),
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKey::Overall => write!(f, "overall"),
            SegmentKey::Hour(hour) => write!(f, "hour_{:02}", hour),
            SegmentKey::Day(day) => write!(f, "day_{}", day),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid segment key: {0}")]
pub struct ParseSegmentKeyError(String);

impl FromStr for SegmentKey {
    type Err = ParseSegmentKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSegmentKeyError(s.to_string());

        if s == "overall" {
            return Ok(SegmentKey::Overall);
        }
        if let Some(hour) = s.strip_prefix("hour_") {
            if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            return match hour.parse::<u32>() {
                Ok(h) if h < 24 => Ok(SegmentKey::Hour(h)),
                _ => Err(invalid()),
            };
        }
        if let Some(day) = s.strip_prefix("day_") {
            if day.len() != 1 || !day.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            return match day.parse::<u32>() {
                Ok(d) if d < 7 => Ok(SegmentKey::Day(d)),
                _ => Err(invalid()),
            };
        }
        Err(invalid())
    }
}

impl Serialize for SegmentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Comparison of baseline ("benchmark") and experiment within one segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSegmentAnalysis {
    pub benchmark: AnalysisResult,
    pub experiment: AnalysisResult,
    /// Percent change of the experiment mean relative to the benchmark mean.
    /// `NaN` when the benchmark mean is zero.
    pub difference_pct: f64,
    /// Two-tailed p-value from Welch's t-test.
    pub p_value: f64,
    /// Whether `p_value < 1 - confidence_level`.
    pub significant: bool,
}

impl TimeSegmentAnalysis {
    /// The percent difference, or `None` when it is undefined.
    pub fn difference(&self) -> Option<f64> {
        if self.difference_pct.is_nan() {
            None
        } else {
            Some(self.difference_pct)
        }
    }
}

/// Segment analyses keyed and ordered by [`SegmentKey`].
///
/// Only segments where both sides have at least one measurement are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisSet {
    segments: BTreeMap<SegmentKey, TimeSegmentAnalysis>,
}

impl AnalysisSet {
    pub fn get(&self, key: SegmentKey) -> Option<&TimeSegmentAnalysis> {
        self.segments.get(&key)
    }

    pub fn overall(&self) -> Option<&TimeSegmentAnalysis> {
        self.get(SegmentKey::Overall)
    }

    /// Hourly segments in ascending hour order.
    pub fn hours(&self) -> impl Iterator<Item = (u32, &TimeSegmentAnalysis)> {
        self.segments.iter().filter_map(|(key, analysis)| match key {
            SegmentKey::Hour(hour) => Some((*hour, analysis)),
            _ => None,
        })
    }

    /// Day-of-week segments in ascending day order.
    pub fn days(&self) -> impl Iterator<Item = (u32, &TimeSegmentAnalysis)> {
        self.segments.iter().filter_map(|(key, analysis)| match key {
            SegmentKey::Day(day) => Some((*day, analysis)),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SegmentKey, &TimeSegmentAnalysis)> {
        self.segments.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SegmentKey> {
        self.segments.keys()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Compare one segment of baseline and experiment measurements.
pub fn analyze_segment(
    benchmark: &[Measurement],
    experiment: &[Measurement],
    confidence_level: f64,
) -> TimeSegmentAnalysis {
    let bench_values = values(benchmark);
    let exp_values = values(experiment);

    let bench = AnalysisResult::from_values(&bench_values, confidence_level);
    let exp = AnalysisResult::from_values(&exp_values, confidence_level);

    let (_, p_value) = welch_t_test(&bench_values, &exp_values);

    TimeSegmentAnalysis {
        benchmark: bench,
        experiment: exp,
        difference_pct: percent_difference(bench.mean, exp.mean),
        p_value,
        significant: p_value < (1.0 - confidence_level),
    }
}

/// Relative change from `base` to `value`, in percent.
///
/// Undefined (`NaN`) when `base` is zero.
fn percent_difference(base: f64, value: f64) -> f64 {
    if base == 0.0 {
        return f64::NAN;
    }
    (value - base) / base * 100.0
}

/// Analyze the full series plus every hour and day-of-week bucket present on
/// both sides.
pub fn analyze_time_series(
    benchmark: &TimeSeries,
    experiment: &TimeSeries,
    confidence_level: f64,
) -> AnalysisSet {
    let mut segments = BTreeMap::new();

    if !benchmark.is_empty() && !experiment.is_empty() {
        segments.insert(
            SegmentKey::Overall,
            analyze_segment(
                benchmark.measurements(),
                experiment.measurements(),
                confidence_level,
            ),
        );
    }

    let mut buckets = paired_buckets(
        group_by_hour(benchmark.measurements()),
        group_by_hour(experiment.measurements()),
        SegmentKey::Hour,
    );
    buckets.extend(paired_buckets(
        group_by_day_of_week(benchmark.measurements()),
        group_by_day_of_week(experiment.measurements()),
        SegmentKey::Day,
    ));

    let analyzed: Vec<(SegmentKey, TimeSegmentAnalysis)> = buckets
        .into_par_iter()
        .map(|(key, bench, exp)| (key, analyze_segment(&bench, &exp, confidence_level)))
        .collect();
    segments.extend(analyzed);

    AnalysisSet { segments }
}

type Bucket = (SegmentKey, Vec<Measurement>, Vec<Measurement>);

/// Pair up buckets present on both sides; one-sided buckets are dropped.
fn paired_buckets(
    benchmark: BTreeMap<u32, Vec<Measurement>>,
    mut experiment: BTreeMap<u32, Vec<Measurement>>,
    key: fn(u32) -> SegmentKey,
) -> Vec<Bucket> {
    benchmark
        .into_iter()
        .filter_map(|(idx, bench)| experiment.remove(&idx).map(|exp| (key(idx), bench, exp)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::TIMESTAMP_FORMAT;
    use crate::partition::filter_by_label;
    use chrono::{Duration, NaiveDateTime};

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    fn at_hours(label: &str, start: &str, values: &[f64]) -> Vec<Measurement> {
        let start = ts(start);
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Measurement::new(start + Duration::hours(i as i64), *v, label))
            .collect()
    }

    fn same_time(label: &str, at: &str, values: &[f64]) -> Vec<Measurement> {
        values
            .iter()
            .map(|v| Measurement::new(ts(at), *v, label))
            .collect()
    }

    #[test]
    fn test_segment_key_names() {
        assert_eq!(SegmentKey::Overall.to_string(), "overall");
        assert_eq!(SegmentKey::Hour(0).to_string(), "hour_00");
        assert_eq!(SegmentKey::Hour(23).to_string(), "hour_23");
        assert_eq!(SegmentKey::Day(0).to_string(), "day_0");
        assert_eq!(SegmentKey::Day(6).to_string(), "day_6");
    }

    #[test]
    fn test_segment_key_parse() {
        assert_eq!("overall".parse(), Ok(SegmentKey::Overall));
        assert_eq!("hour_07".parse(), Ok(SegmentKey::Hour(7)));
        assert_eq!("day_3".parse(), Ok(SegmentKey::Day(3)));

        for bad in [
            "hour_7", "hour_24", "hour_+7", "day_7", "day_10", "Overall", "hour_xx", "",
        ] {
            assert!(bad.parse::<SegmentKey>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_segment_key_ordering() {
        let mut keys = vec![
            SegmentKey::Day(0),
            SegmentKey::Hour(13),
            SegmentKey::Overall,
            SegmentKey::Hour(2),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                SegmentKey::Overall,
                SegmentKey::Hour(2),
                SegmentKey::Hour(13),
                SegmentKey::Day(0)
            ]
        );
    }

    #[test]
    fn test_constant_samples_with_different_means() {
        let bench = same_time("b", "2024-01-01 10:00:00", &[10.0, 10.0, 10.0, 10.0]);
        let exp = same_time("e", "2024-01-01 10:00:00", &[11.0, 11.0, 11.0, 11.0]);

        let result = analyze_segment(&bench, &exp, 0.95);

        assert!((result.difference_pct - 10.0).abs() < 1e-9);
        assert!(result.p_value < 0.001);
        assert!(result.significant);
        assert_eq!(result.benchmark.count, 4);
        assert_eq!(result.experiment.mean, 11.0);
    }

    #[test]
    fn test_identical_samples_not_significant() {
        let bench = same_time("b", "2024-01-01 10:00:00", &[5.0, 6.0, 7.0]);
        let exp = same_time("e", "2024-01-01 10:00:00", &[5.0, 6.0, 7.0]);

        let result = analyze_segment(&bench, &exp, 0.95);

        assert_eq!(result.difference_pct, 0.0);
        assert!((result.p_value - 1.0).abs() < 1e-9);
        assert!(!result.significant);
    }

    #[test]
    fn test_single_baseline_observation() {
        let bench = same_time("b", "2024-01-01 10:00:00", &[100.0]);
        let exp = same_time("e", "2024-01-01 10:00:00", &[90.0, 110.0]);

        let result = analyze_segment(&bench, &exp, 0.95);

        assert_eq!(result.p_value, 1.0);
        assert!(!result.significant);
        assert_eq!(result.difference_pct, 0.0);
        assert_eq!(result.benchmark.confidence_interval, (100.0, 100.0));
    }

    #[test]
    fn test_zero_baseline_mean_is_undefined() {
        let bench = same_time("b", "2024-01-01 10:00:00", &[-1.0, 1.0]);
        let exp = same_time("e", "2024-01-01 10:00:00", &[2.0, 3.0]);

        let result = analyze_segment(&bench, &exp, 0.95);

        assert!(result.difference_pct.is_nan());
        assert!(result.difference().is_none());
    }

    #[test]
    fn test_one_sided_hours_are_omitted() {
        // Baseline covers hours 00..=05, experiment only 02..=03.
        let mut records = at_hours("b", "2024-01-01 00:00:00", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        records.extend(at_hours("e", "2024-01-01 02:00:00", &[3.5, 4.5]));

        let bench = filter_by_label(&records, "b");
        let exp = filter_by_label(&records, "e");
        let set = analyze_time_series(&bench, &exp, 0.95);

        let hours: Vec<u32> = set.hours().map(|(h, _)| h).collect();
        assert_eq!(hours, vec![2, 3]);
        assert!(set.get(SegmentKey::Hour(0)).is_none());
        assert!(set.get(SegmentKey::Hour(5)).is_none());

        // 2024-01-01 is a Monday.
        let days: Vec<u32> = set.days().map(|(d, _)| d).collect();
        assert_eq!(days, vec![1]);

        let overall = set.overall().unwrap();
        assert_eq!(overall.benchmark.count, 6);
        assert_eq!(overall.experiment.count, 2);
    }

    #[test]
    fn test_no_segment_has_an_empty_side() {
        let mut records = at_hours("b", "2024-01-01 00:00:00", &[1.0; 60]);
        records.extend(at_hours("e", "2024-01-02 07:00:00", &[2.0; 30]));

        let bench = filter_by_label(&records, "b");
        let exp = filter_by_label(&records, "e");
        let set = analyze_time_series(&bench, &exp, 0.95);

        assert!(!set.is_empty());
        for (key, analysis) in set.iter() {
            assert!(analysis.benchmark.count > 0, "{key} has empty benchmark");
            assert!(analysis.experiment.count > 0, "{key} has empty experiment");
            assert_eq!(key.to_string().parse::<SegmentKey>(), Ok(*key));
        }
    }

    #[test]
    fn test_empty_experiment_yields_empty_set() {
        let records = at_hours("b", "2024-01-01 00:00:00", &[1.0, 2.0, 3.0]);

        let bench = filter_by_label(&records, "b");
        let exp = filter_by_label(&records, "e");
        let set = analyze_time_series(&bench, &exp, 0.95);

        assert!(set.is_empty());
        assert!(set.overall().is_none());
    }

    #[test]
    fn test_serializes_with_segment_names() {
        let bench = TimeSeries::new("b", same_time("b", "2024-01-07 09:00:00", &[1.0, 2.0]));
        let exp = TimeSeries::new("e", same_time("e", "2024-01-07 09:30:00", &[0.0, 0.0]));

        let set = analyze_time_series(&bench, &exp, 0.95);
        let json = serde_json::to_value(&set).unwrap();

        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert!(json.get("overall").is_some());
        assert!(json.get("hour_09").is_some());
        assert!(json.get("day_0").is_some());
        assert_eq!(json["overall"]["benchmark"]["count"], 2);
    }
}
