//! Resolving which labels are the baseline and the experiment.

use thiserror::Error;
use timeseries_hypothesis_core::{distinct_labels, Measurement};

/// Errors that can occur while choosing the two series to compare.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error(
        "Label {label:?} not found in input. Available labels: {}",
        .available.join(", ")
    )]
    LabelNotFound {
        label: String,
        available: Vec<String>,
    },

    #[error(
        "Cannot infer baseline/experiment from {} label(s). Available labels: {}",
        .available.len(),
        .available.join(", ")
    )]
    Ambiguous { available: Vec<String> },

    #[error("Baseline and experiment must differ, both are {0:?}")]
    SameLabel(String),
}

/// The two labels chosen for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSelection {
    pub baseline: String,
    pub experiment: String,
}

/// Choose the baseline and experiment labels.
///
/// Explicit labels must exist in the input. A missing label is inferred only
/// when exactly one other label remains; with neither given the input must
/// have exactly two labels, taken in order of first appearance.
pub fn select_labels(
    records: &[Measurement],
    baseline: Option<&str>,
    experiment: Option<&str>,
) -> Result<LabelSelection, SelectionError> {
    let available = distinct_labels(records);

    let require = |label: &str| -> Result<String, SelectionError> {
        if available.iter().any(|l| l == label) {
            Ok(label.to_string())
        } else {
            Err(SelectionError::LabelNotFound {
                label: label.to_string(),
                available: available.clone(),
            })
        }
    };

    let (baseline, experiment) = match (baseline, experiment) {
        (Some(b), Some(e)) => (require(b)?, require(e)?),
        (Some(b), None) => {
            let b = require(b)?;
            let e = single_other(&available, &b)?;
            (b, e)
        }
        (None, Some(e)) => {
            let e = require(e)?;
            let b = single_other(&available, &e)?;
            (b, e)
        }
        (None, None) => match available.as_slice() {
            [b, e] => (b.clone(), e.clone()),
            _ => {
                return Err(SelectionError::Ambiguous {
                    available: available.clone(),
                })
            }
        },
    };

    if baseline == experiment {
        return Err(SelectionError::SameLabel(baseline));
    }

    Ok(LabelSelection {
        baseline,
        experiment,
    })
}

fn single_other(available: &[String], chosen: &str) -> Result<String, SelectionError> {
    let others: Vec<&String> = available.iter().filter(|l| *l != chosen).collect();
    match others.as_slice() {
        [only] => Ok((*only).clone()),
        _ => Err(SelectionError::Ambiguous {
            available: available.to_vec(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use timeseries_hypothesis_core::TIMESTAMP_FORMAT;

    fn records(labels: &[&str]) -> Vec<Measurement> {
        let at = NaiveDateTime::parse_from_str("2024-01-01 00:00:00", TIMESTAMP_FORMAT).unwrap();
        labels
            .iter()
            .map(|label| Measurement::new(at, 1.0, *label))
            .collect()
    }

    #[test]
    fn test_explicit_labels() {
        let data = records(&["old", "new", "old"]);
        let selection = select_labels(&data, Some("new"), Some("old")).unwrap();

        assert_eq!(selection.baseline, "new");
        assert_eq!(selection.experiment, "old");
    }

    #[test]
    fn test_inferred_from_two_labels() {
        let data = records(&["old", "old", "new"]);
        let selection = select_labels(&data, None, None).unwrap();

        assert_eq!(selection.baseline, "old");
        assert_eq!(selection.experiment, "new");
    }

    #[test]
    fn test_infer_missing_experiment() {
        let data = records(&["old", "new"]);
        let selection = select_labels(&data, Some("new"), None).unwrap();

        assert_eq!(selection.baseline, "new");
        assert_eq!(selection.experiment, "old");
    }

    #[test]
    fn test_infer_missing_baseline() {
        let data = records(&["a", "b"]);
        let selection = select_labels(&data, None, Some("a")).unwrap();

        assert_eq!(selection.baseline, "b");
        assert_eq!(selection.experiment, "a");
    }

    #[test]
    fn test_ambiguous_with_three_labels() {
        let data = records(&["a", "b", "c"]);

        let err = select_labels(&data, None, None).unwrap_err();
        assert_eq!(
            err,
            SelectionError::Ambiguous {
                available: vec!["a".into(), "b".into(), "c".into()]
            }
        );
        assert!(err.to_string().contains("a, b, c"));

        assert!(select_labels(&data, Some("a"), None).is_err());
    }

    #[test]
    fn test_single_label_is_ambiguous() {
        let data = records(&["only"]);
        assert!(matches!(
            select_labels(&data, None, None),
            Err(SelectionError::Ambiguous { .. })
        ));
    }

    #[test]
    fn test_missing_label_lists_available() {
        let data = records(&["a", "b"]);
        let err = select_labels(&data, Some("a"), Some("z")).unwrap_err();

        assert_eq!(
            err,
            SelectionError::LabelNotFound {
                label: "z".into(),
                available: vec!["a".into(), "b".into()]
            }
        );
        assert!(err.to_string().contains("Available labels: a, b"));
    }

    #[test]
    fn test_same_label_rejected() {
        let data = records(&["a", "b"]);
        assert_eq!(
            select_labels(&data, Some("a"), Some("a")),
            Err(SelectionError::SameLabel("a".into()))
        );
    }
}
