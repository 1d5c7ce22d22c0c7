//! Detection utilities for load series.
//!
//! Flags samples that are statistically inconsistent with their recent
//! history, either over a whole series or one sample at a time.

mod anomaly;

pub use anomaly::{
    analyze_anomalies, detect_anomalies, detect_anomalies_auto, rolling_z_scores, AnomalyConfig,
    AnomalyResult, StreamingAnomalyDetector, ANOMALY_WINDOW, DEFAULT_Z_THRESHOLD,
};
