//! Reconciliation settings.

use crate::error::{ReconcileError, Result};
use serde::{Deserialize, Serialize};

/// Percent error above which an overlap point is a high discrepancy.
pub const DEFAULT_DISCREPANCY_THRESHOLD: f64 = 5.0;

/// How to express percent error when the actual value is zero.
///
/// An actual of zero with a zero prediction is always a 0% error; the policy
/// only covers a nonzero prediction against a zero actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZeroActualPolicy {
    /// Leave percent error absent. The point still counts towards the overlap
    /// but not towards the mean percent error.
    #[default]
    Omit,
    /// Report `+inf`, which propagates into the mean and accuracy score.
    Infinite,
}

/// Configuration for reconciling actual and predicted series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconcileConfig {
    /// Percent error strictly above which a point is a high discrepancy.
    pub discrepancy_threshold: f64,
    /// Percent-error policy for zero actual values.
    pub zero_actual: ZeroActualPolicy,
    /// Keep only the most recent `n` actual points before merging.
    pub history_window: Option<usize>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            discrepancy_threshold: DEFAULT_DISCREPANCY_THRESHOLD,
            zero_actual: ZeroActualPolicy::Omit,
            history_window: None,
        }
    }
}

impl ReconcileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the high-discrepancy threshold, in percent.
    pub fn with_discrepancy_threshold(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ReconcileError::InvalidParameter(format!(
                "discrepancy threshold must be finite and non-negative, got {threshold}"
            )));
        }
        self.discrepancy_threshold = threshold;
        Ok(self)
    }

    pub fn with_zero_actual(mut self, policy: ZeroActualPolicy) -> Self {
        self.zero_actual = policy;
        self
    }

    pub fn with_history_window(mut self, points: usize) -> Self {
        self.history_window = Some(points);
        self
    }

    /// Percent error of a prediction, under this configuration.
    ///
    /// Divides by the signed actual, so a negative (net export) actual gives a
    /// negative percent error.
    pub(crate) fn percent_error(&self, actual: f64, absolute_error: f64) -> Option<f64> {
        if actual != 0.0 {
            return Some(absolute_error / actual * 100.0);
        }
        if absolute_error == 0.0 {
            return Some(0.0);
        }
        match self.zero_actual {
            ZeroActualPolicy::Omit => None,
            ZeroActualPolicy::Infinite => Some(f64::INFINITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ReconcileConfig::default();
        assert_eq!(config.discrepancy_threshold, 5.0);
        assert_eq!(config.zero_actual, ZeroActualPolicy::Omit);
        assert_eq!(config.history_window, None);
    }

    #[test]
    fn builder_methods() {
        let config = ReconcileConfig::new()
            .with_discrepancy_threshold(10.0)
            .unwrap()
            .with_zero_actual(ZeroActualPolicy::Infinite)
            .with_history_window(72);

        assert_eq!(config.discrepancy_threshold, 10.0);
        assert_eq!(config.zero_actual, ZeroActualPolicy::Infinite);
        assert_eq!(config.history_window, Some(72));
    }

    #[test]
    fn invalid_threshold_rejected() {
        assert!(ReconcileConfig::new().with_discrepancy_threshold(-1.0).is_err());
        assert!(ReconcileConfig::new()
            .with_discrepancy_threshold(f64::NAN)
            .is_err());
    }

    #[test]
    fn percent_error_policies() {
        let omit = ReconcileConfig::default();
        let infinite = ReconcileConfig::default().with_zero_actual(ZeroActualPolicy::Infinite);

        assert_eq!(omit.percent_error(100.0, 5.0), Some(5.0));
        assert_eq!(omit.percent_error(0.0, 0.0), Some(0.0));
        assert_eq!(omit.percent_error(0.0, 3.0), None);
        assert_eq!(infinite.percent_error(0.0, 3.0), Some(f64::INFINITY));
        // Net export keeps the sign of the actual
        assert_eq!(omit.percent_error(-200.0, 10.0), Some(-5.0));
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ReconcileConfig =
            serde_json::from_str(r#"{"zeroActual":"infinite","historyWindow":72}"#).unwrap();
        assert_eq!(config.discrepancy_threshold, 5.0);
        assert_eq!(config.zero_actual, ZeroActualPolicy::Infinite);
        assert_eq!(config.history_window, Some(72));
    }
}
