//! Timestamp-keyed merge of actual and predicted series.

use super::config::ReconcileConfig;
use crate::core::{display_time, timestamp_key, LoadPoint};
use crate::transform::DisplayUnit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One instant of the reconciled timeline.
///
/// `absolute_error` and `percent_error` are only present where both an actual
/// and a predicted value exist. Absence means "not comparable", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedPoint {
    /// Normalized `YYYY-MM-DD HH:mm` key, or the trimmed raw timestamp when
    /// it could not be normalized.
    pub timestamp: String,
    pub actual: Option<f64>,
    pub smoothed: Option<f64>,
    pub is_anomaly: Option<bool>,
    pub predicted: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub absolute_error: Option<f64>,
    pub percent_error: Option<f64>,
}

impl MergedPoint {
    fn empty(timestamp: String) -> Self {
        Self {
            timestamp,
            actual: None,
            smoothed: None,
            is_anomaly: None,
            predicted: None,
            lower_bound: None,
            upper_bound: None,
            absolute_error: None,
            percent_error: None,
        }
    }

    /// True when both an actual and a predicted value are present.
    pub fn is_overlap(&self) -> bool {
        self.actual.is_some() && self.predicted.is_some()
    }

    /// Time of day (`HH:mm`) for axis labels.
    pub fn display_time(&self) -> &str {
        display_time(&self.timestamp)
    }

    /// Copy with every power value expressed in `unit`.
    ///
    /// Percent error is dimensionless and is left as is.
    pub fn scaled(&self, unit: DisplayUnit) -> MergedPoint {
        let apply = |v: Option<f64>| v.map(|x| unit.apply(x));
        MergedPoint {
            timestamp: self.timestamp.clone(),
            actual: apply(self.actual),
            smoothed: apply(self.smoothed),
            is_anomaly: self.is_anomaly,
            predicted: apply(self.predicted),
            lower_bound: apply(self.lower_bound),
            upper_bound: apply(self.upper_bound),
            absolute_error: apply(self.absolute_error),
            percent_error: self.percent_error,
        }
    }

    /// Fill in the error fields from the merged values.
    fn with_errors(mut self, config: &ReconcileConfig) -> Self {
        if let (Some(actual), Some(predicted)) = (self.actual, self.predicted) {
            let absolute_error = (actual - predicted).abs();
            self.absolute_error = Some(absolute_error);
            self.percent_error = config.percent_error(actual, absolute_error);
        }
        self
    }
}

/// Merge two series into one timeline ordered by normalized timestamp.
///
/// Actual points seed the timeline; each predicted point then joins the entry
/// for its instant or starts a new one. The predicted value is the point's
/// `predicted` field when set, otherwise its `value`. Within one series a
/// repeated timestamp overwrites the earlier point.
pub(crate) fn merge_series(
    actual: &[LoadPoint],
    predicted: &[LoadPoint],
    config: &ReconcileConfig,
) -> Vec<MergedPoint> {
    let mut timeline: BTreeMap<String, MergedPoint> = BTreeMap::new();

    for point in actual {
        let key = timestamp_key(&point.timestamp);
        let entry = timeline
            .entry(key.clone())
            .or_insert_with(|| MergedPoint::empty(key));
        entry.actual = Some(point.value);
        entry.smoothed = point.smoothed;
        entry.is_anomaly = point.is_anomaly;
    }

    for point in predicted {
        let key = timestamp_key(&point.timestamp);
        let entry = timeline
            .entry(key.clone())
            .or_insert_with(|| MergedPoint::empty(key));
        entry.predicted = Some(point.predicted.unwrap_or(point.value));
        entry.lower_bound = point.lower_bound;
        entry.upper_bound = point.upper_bound;
    }

    timeline
        .into_values()
        .map(|point| point.with_errors(config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(actual: &[LoadPoint], predicted: &[LoadPoint]) -> Vec<MergedPoint> {
        merge_series(actual, predicted, &ReconcileConfig::default())
    }

    #[test]
    fn differently_formatted_timestamps_merge() {
        let actual = vec![LoadPoint::new("2024-01-01 10:00", 100.0)];
        let predicted = vec![LoadPoint::new("2024-01-01T10:00:00Z", 104.0)];

        let merged = merge(&actual, &predicted);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].timestamp, "2024-01-01 10:00");
        assert_eq!(merged[0].actual, Some(100.0));
        assert_eq!(merged[0].predicted, Some(104.0));
        assert_eq!(merged[0].absolute_error, Some(4.0));
    }

    #[test]
    fn zone_and_precision_variants_merge_with_canonical_key() {
        let actual = vec![LoadPoint::new("2024-01-01 10:00", 100.0)];
        for raw in [
            "2024-01-01T10:00Z",
            "2024-01-01T10:00:00+0000",
            "2024-01-01 10:00:00 UTC",
            "2024-01-01T10:00:00.000+00:00",
        ] {
            let merged = merge(&actual, &[LoadPoint::new(raw, 104.0)]);

            assert_eq!(merged.len(), 1, "{raw}");
            assert!(merged[0].is_overlap(), "{raw}");
            assert_eq!(merged[0].timestamp, "2024-01-01 10:00");
        }
    }

    #[test]
    fn output_is_time_ordered() {
        let actual = vec![
            LoadPoint::new("2024-01-01 02:00", 2.0),
            LoadPoint::new("2024-01-01 03:00", 3.0),
        ];
        let predicted = vec![
            LoadPoint::new("2024-01-01 04:00", 4.0),
            LoadPoint::new("2024-01-01T01:00", 1.0),
        ];

        let merged = merge(&actual, &predicted);
        let keys: Vec<&str> = merged.iter().map(|p| p.timestamp.as_str()).collect();

        assert_eq!(
            keys,
            vec![
                "2024-01-01 01:00",
                "2024-01-01 02:00",
                "2024-01-01 03:00",
                "2024-01-01 04:00"
            ]
        );
    }

    #[test]
    fn carries_trend_flags_and_bounds() {
        let actual = vec![LoadPoint::new("2024-01-01 10:00", 100.0)
            .with_smoothed(98.5)
            .with_anomaly(true)];
        let predicted = vec![LoadPoint::new("2024-01-01 10:00", 101.0).with_bounds(95.0, 107.0)];

        let merged = merge(&actual, &predicted);

        assert_eq!(merged[0].smoothed, Some(98.5));
        assert_eq!(merged[0].is_anomaly, Some(true));
        assert_eq!(merged[0].lower_bound, Some(95.0));
        assert_eq!(merged[0].upper_bound, Some(107.0));
    }

    #[test]
    fn predicted_field_takes_precedence_over_value() {
        let predicted = vec![LoadPoint::new("2024-01-01 10:00", 0.0).with_predicted(250.0)];
        let merged = merge(&[], &predicted);
        assert_eq!(merged[0].predicted, Some(250.0));
        assert_eq!(merged[0].actual, None);
        assert_eq!(merged[0].smoothed, None);
    }

    #[test]
    fn malformed_timestamps_keep_their_own_bucket() {
        let actual = vec![
            LoadPoint::new("2024-01-01 10:00", 100.0),
            LoadPoint::new("garbage", 50.0),
        ];
        let predicted = vec![LoadPoint::new(" garbage ", 55.0)];

        let merged = merge(&actual, &predicted);

        assert_eq!(merged.len(), 2);
        let bucket = merged.iter().find(|p| p.timestamp == "garbage").unwrap();
        assert_eq!(bucket.actual, Some(50.0));
        assert_eq!(bucket.predicted, Some(55.0));
    }

    #[test]
    fn no_errors_outside_overlap() {
        let actual = vec![LoadPoint::new("2024-01-01 10:00", 100.0)];
        let predicted = vec![LoadPoint::new("2024-01-01 11:00", 100.0)];

        let merged = merge(&actual, &predicted);

        assert!(merged.iter().all(|p| !p.is_overlap()));
        assert!(merged.iter().all(|p| p.absolute_error.is_none()));
        assert!(merged.iter().all(|p| p.percent_error.is_none()));
    }

    #[test]
    fn scaled_point_keeps_percent_error() {
        let actual = vec![LoadPoint::new("2024-01-01 10:00", 8000.0)];
        let predicted = vec![LoadPoint::new("2024-01-01 10:00", 8800.0)];

        let point = merge(&actual, &predicted).remove(0);
        let scaled = point.scaled(DisplayUnit::AGGREGATE);

        assert_eq!(scaled.actual, Some(8.0));
        assert_eq!(scaled.predicted, Some(8.8));
        assert_eq!(scaled.absolute_error, Some(0.8));
        assert_eq!(scaled.percent_error, point.percent_error);
        assert_eq!(scaled.display_time(), "10:00");
    }
}
