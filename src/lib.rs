//! # load-reconcile
//!
//! Signal conditioning and forecast reconciliation for electrical load series.
//!
//! Provides Savitzky–Golay trend extraction, rolling z-score anomaly
//! detection, display-unit selection, and the merge of measured and
//! predicted series into one timestamp-aligned timeline with accuracy
//! metrics. Forecasts themselves come from elsewhere; this crate only
//! compares them against what was measured.

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod detection;
pub mod error;
pub mod fleet;
pub mod reconcile;
pub mod transform;
pub mod utils;

pub use error::{ReconcileError, Result};

pub mod prelude {
    pub use crate::core::{LoadPoint, LoadSeries};
    pub use crate::detection::{detect_anomalies, AnomalyConfig, StreamingAnomalyDetector};
    pub use crate::error::{ReconcileError, Result};
    pub use crate::reconcile::{
        reconcile, reconcile_with, AccuracyReport, MergedPoint, ReconcileConfig, Reconciliation,
    };
    pub use crate::transform::{choose_unit, savitzky_golay, DisplayUnit};
}
