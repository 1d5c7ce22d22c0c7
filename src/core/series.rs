//! LoadSeries: an ordered sequence of load points.

use super::point::LoadPoint;
use super::timestamp::timestamp_key;
use crate::detection::{analyze_anomalies, AnomalyConfig};
use crate::error::{ReconcileError, Result};
use crate::transform::savitzky_golay;
use serde::{Deserialize, Serialize};

/// A load series ordered by timestamp, without duplicate timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LoadPoint>", into = "Vec<LoadPoint>")]
pub struct LoadSeries {
    points: Vec<LoadPoint>,
}

impl LoadSeries {
    /// Create a series, validating that normalized timestamps strictly increase.
    pub fn new(points: Vec<LoadPoint>) -> Result<Self> {
        let keys: Vec<String> = points.iter().map(|p| timestamp_key(&p.timestamp)).collect();

        for i in 1..keys.len() {
            if keys[i] <= keys[i - 1] {
                return Err(ReconcileError::TimestampError(format!(
                    "timestamps must be strictly increasing: '{}' follows '{}'",
                    points[i].timestamp,
                    points[i - 1].timestamp
                )));
            }
        }

        Ok(Self { points })
    }

    /// Create a series from parallel timestamp and value vectors.
    pub fn from_parts(timestamps: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ReconcileError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }

        let points = timestamps
            .into_iter()
            .zip(values)
            .map(|(ts, value)| LoadPoint::new(ts, value))
            .collect();

        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[LoadPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<LoadPoint> {
        self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn timestamps(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.timestamp.as_str()).collect()
    }

    /// Largest absolute value, `0.0` for an empty series.
    pub fn max_magnitude(&self) -> f64 {
        crate::utils::stats::max_abs(&self.values())
    }

    /// The last `n` points (all of them if the series is shorter).
    pub fn tail(&self, n: usize) -> LoadSeries {
        let start = self.points.len().saturating_sub(n);
        Self {
            points: self.points[start..].to_vec(),
        }
    }

    /// Attach the smoothed trend and anomaly flags to every point.
    ///
    /// Returns a new series; `self` is left unchanged.
    ///
    /// # Example
    /// ```
    /// use load_reconcile::core::{LoadPoint, LoadSeries};
    /// use load_reconcile::detection::AnomalyConfig;
    ///
    /// let points = (0..24)
    ///     .map(|h| LoadPoint::new(format!("2024-01-01 {h:02}:00"), 100.0 + h as f64))
    ///     .collect();
    /// let series = LoadSeries::new(points).unwrap();
    ///
    /// let conditioned = series.condition(&AnomalyConfig::default());
    /// assert!(conditioned.points().iter().all(|p| p.smoothed.is_some()));
    /// assert!(series.points().iter().all(|p| p.smoothed.is_none()));
    /// ```
    pub fn condition(&self, config: &AnomalyConfig) -> LoadSeries {
        let values = self.values();
        let smoothed = savitzky_golay(&values);
        let anomalies = analyze_anomalies(&values, config);

        let points = self
            .points
            .iter()
            .zip(smoothed)
            .zip(anomalies.flags)
            .map(|((p, s), flag)| p.clone().with_smoothed(s).with_anomaly(flag))
            .collect();

        Self { points }
    }
}

impl TryFrom<Vec<LoadPoint>> for LoadSeries {
    type Error = ReconcileError;

    fn try_from(points: Vec<LoadPoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<LoadSeries> for Vec<LoadPoint> {
    fn from(series: LoadSeries) -> Self {
        series.points
    }
}

impl AsRef<[LoadPoint]> for LoadSeries {
    fn as_ref(&self) -> &[LoadPoint] {
        &self.points
    }
}
