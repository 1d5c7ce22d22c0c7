//! Rolling z-score anomaly detection.
//!
//! Each sample is compared against the [`ANOMALY_WINDOW`] samples that
//! precede it. The detector is causal: it never looks ahead, so the batch
//! functions and [`StreamingAnomalyDetector`] flag exactly the same points.

use crate::error::{ReconcileError, Result};
use crate::utils::stats::{mean, population_std_dev};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of preceding samples forming the reference window.
pub const ANOMALY_WINDOW: usize = 12;

/// Default z-score above which a sample is anomalous.
pub const DEFAULT_Z_THRESHOLD: f64 = 2.5;

/// Configuration for anomaly detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnomalyConfig {
    /// A sample is anomalous when its z-score is strictly above this.
    pub threshold: f64,
    /// Treat any departure from a perfectly flat window as anomalous.
    ///
    /// A zero-variance window has no finite z-score. When set, a sample that
    /// differs from such a window scores `+inf`; a sample equal to it scores
    /// zero. When unset, a flat window never flags anything.
    pub flag_flat_window_deviation: bool,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_Z_THRESHOLD,
            flag_flat_window_deviation: true,
        }
    }
}

impl AnomalyConfig {
    /// Config with a custom z-score threshold.
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ReconcileError::InvalidParameter(format!(
                "anomaly threshold must be finite and non-negative, got {threshold}"
            )));
        }
        Ok(Self {
            threshold,
            ..Self::default()
        })
    }

    /// Never flag samples that follow a zero-variance window.
    pub fn ignore_flat_windows(mut self) -> Self {
        self.flag_flat_window_deviation = false;
        self
    }
}

/// Result of anomaly detection over a whole series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyResult {
    /// One flag per input sample.
    pub flags: Vec<bool>,
    /// Z-score per sample; `None` until the window has filled.
    pub scores: Vec<Option<f64>>,
    /// Threshold used for detection.
    pub threshold: f64,
}

impl AnomalyResult {
    /// Indices of flagged samples.
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, &flag)| flag)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn anomaly_count(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag).count()
    }

    pub fn is_anomaly(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Share of flagged samples, in percent.
    pub fn anomaly_percentage(&self) -> f64 {
        if self.flags.is_empty() {
            0.0
        } else {
            100.0 * self.anomaly_count() as f64 / self.flags.len() as f64
        }
    }
}

/// Z-score of `value` against a reference window.
///
/// `None` when the window is flat and `flag_flat` is unset, meaning the
/// sample cannot be scored.
fn window_z_score(window: &[f64], value: f64, flag_flat: bool) -> Option<f64> {
    let m = mean(window);
    let sd = population_std_dev(window);

    if sd > 0.0 {
        Some((value - m).abs() / sd)
    } else if flag_flat {
        Some(if value == m { 0.0 } else { f64::INFINITY })
    } else {
        None
    }
}

/// Per-sample z-scores against the preceding [`ANOMALY_WINDOW`] samples.
///
/// The first `ANOMALY_WINDOW` entries are always `None`.
pub fn rolling_z_scores(series: &[f64], config: &AnomalyConfig) -> Vec<Option<f64>> {
    let mut scores = vec![None; series.len()];

    for i in ANOMALY_WINDOW..series.len() {
        let window = &series[i - ANOMALY_WINDOW..i];
        scores[i] = window_z_score(window, series[i], config.flag_flat_window_deviation);
    }

    scores
}

/// Flag anomalous samples.
///
/// Returns one flag per input sample. Samples with fewer than
/// [`ANOMALY_WINDOW`] predecessors are never flagged.
///
/// # Example
/// ```
/// use load_reconcile::detection::{detect_anomalies, AnomalyConfig};
///
/// let mut series: Vec<f64> = (0..24).map(|i| 100.0 + (i % 3) as f64).collect();
/// series[20] = 500.0;
///
/// let flags = detect_anomalies(&series, &AnomalyConfig::default());
/// assert!(flags[20]);
/// assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
/// ```
pub fn detect_anomalies(series: &[f64], config: &AnomalyConfig) -> Vec<bool> {
    analyze_anomalies(series, config).flags
}

/// Flag anomalous samples with the default configuration.
pub fn detect_anomalies_auto(series: &[f64]) -> Vec<bool> {
    detect_anomalies(series, &AnomalyConfig::default())
}

/// Flags together with the underlying scores.
pub fn analyze_anomalies(series: &[f64], config: &AnomalyConfig) -> AnomalyResult {
    let scores = rolling_z_scores(series, config);
    let flags: Vec<bool> = scores
        .iter()
        .map(|score| score.is_some_and(|z| z > config.threshold))
        .collect();

    let result = AnomalyResult {
        flags,
        scores,
        threshold: config.threshold,
    };

    tracing::debug!(
        samples = series.len(),
        anomalies = result.anomaly_count(),
        threshold = config.threshold,
        "anomaly detection complete"
    );

    result
}

/// Sample-at-a-time form of [`detect_anomalies`].
///
/// Keeps only the last [`ANOMALY_WINDOW`] samples.
///
/// # Example
/// ```
/// use load_reconcile::detection::{detect_anomalies_auto, StreamingAnomalyDetector};
///
/// let series: Vec<f64> = (0..30).map(|i| if i == 25 { 90.0 } else { (i % 4) as f64 }).collect();
/// let mut detector = StreamingAnomalyDetector::default();
/// let streamed: Vec<bool> = series.iter().map(|&x| detector.push(x)).collect();
///
/// assert_eq!(streamed, detect_anomalies_auto(&series));
/// ```
#[derive(Debug, Clone)]
pub struct StreamingAnomalyDetector {
    config: AnomalyConfig,
    window: VecDeque<f64>,
    seen: usize,
}

impl Default for StreamingAnomalyDetector {
    fn default() -> Self {
        Self::new(AnomalyConfig::default())
    }
}

impl StreamingAnomalyDetector {
    pub fn new(config: AnomalyConfig) -> Self {
        Self {
            config,
            window: VecDeque::with_capacity(ANOMALY_WINDOW + 1),
            seen: 0,
        }
    }

    /// Score the next sample against the current window, then admit it.
    pub fn score(&mut self, value: f64) -> Option<f64> {
        let score = if self.window.len() == ANOMALY_WINDOW {
            let window = self.window.make_contiguous();
            window_z_score(window, value, self.config.flag_flat_window_deviation)
        } else {
            None
        };

        self.window.push_back(value);
        if self.window.len() > ANOMALY_WINDOW {
            self.window.pop_front();
        }
        self.seen += 1;

        score
    }

    /// Feed one sample; returns whether it is anomalous.
    pub fn push(&mut self, value: f64) -> bool {
        self.score(value).is_some_and(|z| z > self.config.threshold)
    }

    /// Number of samples consumed so far.
    pub fn samples_seen(&self) -> usize {
        self.seen
    }

    /// True once enough history exists to score the next sample.
    pub fn is_warmed_up(&self) -> bool {
        self.window.len() == ANOMALY_WINDOW
    }

    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }

    /// Forget all history.
    pub fn reset(&mut self) {
        self.window.clear();
        self.seen = 0;
    }
}
