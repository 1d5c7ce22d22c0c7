//! A single timestamped load measurement.

use serde::{Deserialize, Serialize};

/// One timestamped load measurement, in base power units (e.g. MW).
///
/// The timestamp identifies the point. Derived values (trend, anomaly flag,
/// prediction bounds) attach through the `with_*` methods, which return a new
/// point and leave the identity untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPoint {
    pub timestamp: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_anomaly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

impl LoadPoint {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
            smoothed: None,
            is_anomaly: None,
            predicted: None,
            lower_bound: None,
            upper_bound: None,
        }
    }

    pub fn with_smoothed(mut self, smoothed: f64) -> Self {
        self.smoothed = Some(smoothed);
        self
    }

    pub fn with_anomaly(mut self, is_anomaly: bool) -> Self {
        self.is_anomaly = Some(is_anomaly);
        self
    }

    pub fn with_predicted(mut self, predicted: f64) -> Self {
        self.predicted = Some(predicted);
        self
    }

    /// Attach a prediction interval.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = Some(lower);
        self.upper_bound = Some(upper);
        self
    }
}

impl<S: Into<String>> From<(S, f64)> for LoadPoint {
    fn from((timestamp, value): (S, f64)) -> Self {
        Self::new(timestamp, value)
    }
}
