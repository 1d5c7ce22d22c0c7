//! Aggregate accuracy over the overlap window.

use super::config::ReconcileConfig;
use super::merge::MergedPoint;
use crate::utils::stats::mean;
use serde::{Deserialize, Serialize};

/// Error magnitudes over the overlap, in the units of the series.
///
/// Percent error is not repeated here: [`AccuracyReport::mean_percent_error`]
/// is the only percent figure, and it follows the configured
/// [`ZeroActualPolicy`](super::ZeroActualPolicy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyMetrics {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    /// Symmetric percentage error; a point where actual and predicted are
    /// both zero contributes nothing.
    pub smape: f64,
    /// Coefficient of determination. A flat actual series gives `1.0` for a
    /// perfect match and `-inf` otherwise.
    pub r_squared: f64,
}

impl AccuracyMetrics {
    /// Metrics over overlap points; `None` when there are none.
    fn from_overlap(overlap: &[&MergedPoint]) -> Option<Self> {
        let pairs: Vec<(f64, f64)> = overlap
            .iter()
            .filter_map(|p| p.actual.zip(p.predicted))
            .collect();
        if pairs.is_empty() {
            return None;
        }

        let residuals: Vec<f64> = pairs.iter().map(|(a, p)| a - p).collect();
        let mae = mean(&residuals.iter().map(|r| r.abs()).collect::<Vec<_>>());
        let mse = mean(&residuals.iter().map(|r| r * r).collect::<Vec<_>>());

        let smape = 100.0
            * mean(
                &pairs
                    .iter()
                    .map(|(a, p)| match a.abs() + p.abs() {
                        d if d == 0.0 => 0.0,
                        d => 2.0 * (a - p).abs() / d,
                    })
                    .collect::<Vec<_>>(),
            );

        let actual_mean = mean(&pairs.iter().map(|(a, _)| *a).collect::<Vec<_>>());
        let ss_tot: f64 = pairs.iter().map(|(a, _)| (a - actual_mean).powi(2)).sum();
        let ss_res: f64 = residuals.iter().map(|r| r * r).sum();
        let r_squared = match (ss_tot == 0.0, ss_res == 0.0) {
            (_, true) => 1.0,
            (true, false) => f64::NEG_INFINITY,
            (false, false) => 1.0 - ss_res / ss_tot,
        };

        Some(Self {
            mae,
            mse,
            rmse: mse.sqrt(),
            smape,
            r_squared,
        })
    }
}

/// How well the predicted series matched the actual one where both exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyReport {
    /// Number of instants with both an actual and a predicted value.
    pub overlap_count: usize,
    /// Mean of the defined percent errors in the overlap.
    pub mean_percent_error: Option<f64>,
    /// `100 - mean_percent_error`. Not floored, so it can go negative.
    pub accuracy_score: Option<f64>,
    /// Overlap points above the discrepancy threshold, in time order.
    pub high_discrepancy_points: Vec<MergedPoint>,
    /// Threshold used for `high_discrepancy_points`.
    pub discrepancy_threshold: f64,
    /// Aggregate error metrics over the overlap.
    pub metrics: Option<AccuracyMetrics>,
}

impl AccuracyReport {
    /// Build the report from a merged, time-ordered timeline.
    pub fn from_timeline(timeline: &[MergedPoint], config: &ReconcileConfig) -> Self {
        let overlap: Vec<&MergedPoint> = timeline.iter().filter(|p| p.is_overlap()).collect();

        let percent_errors: Vec<f64> = overlap.iter().filter_map(|p| p.percent_error).collect();
        let mean_percent_error = if percent_errors.is_empty() {
            None
        } else {
            Some(percent_errors.iter().sum::<f64>() / percent_errors.len() as f64)
        };

        let high_discrepancy_points = overlap
            .iter()
            .filter(|p| {
                p.percent_error
                    .is_some_and(|e| e > config.discrepancy_threshold)
            })
            .map(|&p| p.clone())
            .collect();

        let metrics = AccuracyMetrics::from_overlap(&overlap);

        Self {
            overlap_count: overlap.len(),
            mean_percent_error,
            accuracy_score: mean_percent_error.map(|e| 100.0 - e),
            high_discrepancy_points,
            discrepancy_threshold: config.discrepancy_threshold,
            metrics,
        }
    }

    pub fn has_overlap(&self) -> bool {
        self.overlap_count > 0
    }

    pub fn high_discrepancy_count(&self) -> usize {
        self.high_discrepancy_points.len()
    }
}
