//! Reconciliation of actual and predicted load series.
//!
//! Both series are keyed on normalized timestamps and merged into a single
//! ordered timeline. Where both values exist the point gets absolute and
//! percent errors, and the overlap is summarized in an [`AccuracyReport`].
//!
//! Smoothed values and anomaly flags ride along with the actual series for
//! display only; they never enter the error computation.
//!
//! # Example
//!
//! ```
//! use load_reconcile::core::LoadPoint;
//! use load_reconcile::reconcile::reconcile;
//!
//! let actual = vec![
//!     LoadPoint::new("2024-01-01 00:00", 100.0),
//!     LoadPoint::new("2024-01-01 01:00", 110.0),
//! ];
//! let predicted = vec![
//!     LoadPoint::new("2024-01-01T00:00:00", 105.0),
//!     LoadPoint::new("2024-01-01T02:00:00", 120.0),
//! ];
//!
//! let (timeline, report) = reconcile(&actual, &predicted).into_parts();
//! assert_eq!(timeline.len(), 3);
//! assert_eq!(report.overlap_count, 1);
//! assert_eq!(report.accuracy_score, Some(95.0));
//! ```

mod config;
mod merge;
mod report;

pub use config::{ReconcileConfig, ZeroActualPolicy, DEFAULT_DISCREPANCY_THRESHOLD};
pub use merge::MergedPoint;
pub use report::{AccuracyMetrics, AccuracyReport};

use crate::core::LoadPoint;
use crate::transform::{choose_unit, DisplayUnit};
use crate::utils::stats::max_abs;
use serde::{Deserialize, Serialize};

/// A merged timeline and its accuracy report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    points: Vec<MergedPoint>,
    report: AccuracyReport,
}

impl Reconciliation {
    /// Merged timeline, ordered by timestamp.
    pub fn points(&self) -> &[MergedPoint] {
        &self.points
    }

    pub fn report(&self) -> &AccuracyReport {
        &self.report
    }

    pub fn into_parts(self) -> (Vec<MergedPoint>, AccuracyReport) {
        (self.points, self.report)
    }

    /// Points with both an actual and a predicted value.
    pub fn overlap(&self) -> impl Iterator<Item = &MergedPoint> {
        self.points.iter().filter(|p| p.is_overlap())
    }

    /// Display unit for the largest power value on the timeline.
    pub fn display_unit(&self) -> DisplayUnit {
        let magnitudes: Vec<f64> = self
            .points
            .iter()
            .flat_map(|p| [p.actual, p.smoothed, p.predicted, p.upper_bound, p.lower_bound])
            .flatten()
            .collect();
        choose_unit(max_abs(&magnitudes))
    }

    /// The timeline expressed in its display unit.
    pub fn scaled_points(&self) -> (DisplayUnit, Vec<MergedPoint>) {
        let unit = self.display_unit();
        let points = self.points.iter().map(|p| p.scaled(unit)).collect();
        (unit, points)
    }
}

/// Reconcile actual and predicted series with the default configuration.
///
/// Each input is expected in timestamp order without duplicates; a repeated
/// timestamp overwrites the earlier point rather than failing. An empty
/// `predicted` series is legal and yields an empty overlap.
pub fn reconcile(actual: &[LoadPoint], predicted: &[LoadPoint]) -> Reconciliation {
    reconcile_with(actual, predicted, &ReconcileConfig::default())
}

/// Reconcile actual and predicted series.
pub fn reconcile_with(
    actual: &[LoadPoint],
    predicted: &[LoadPoint],
    config: &ReconcileConfig,
) -> Reconciliation {
    let actual = match config.history_window {
        Some(n) => &actual[actual.len().saturating_sub(n)..],
        None => actual,
    };

    let points = merge::merge_series(actual, predicted, config);
    let report = AccuracyReport::from_timeline(&points, config);

    tracing::debug!(
        actual = actual.len(),
        predicted = predicted.len(),
        merged = points.len(),
        overlap = report.overlap_count,
        high_discrepancy = report.high_discrepancy_points.len(),
        accuracy = ?report.accuracy_score,
        "reconciled series"
    );

    Reconciliation { points, report }
}
