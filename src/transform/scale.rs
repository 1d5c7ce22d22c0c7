//! Min–max normalization of load series.
//!
//! Maps a series onto `[0, 1]` and back. A constant series has no range and
//! maps to the midpoint `0.5`.

use serde::{Deserialize, Serialize};

/// Result of min–max normalization, with the parameters for the inverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleResult {
    /// Normalized data
    pub data: Vec<f64>,
    /// Minimum of the original series
    pub min: f64,
    /// Maximum of the original series
    pub max: f64,
}

impl ScaleResult {
    /// Inverse transform to recover the original scale.
    pub fn inverse(&self) -> Vec<f64> {
        self.data
            .iter()
            .map(|&x| denormalize(x, self.min, self.max))
            .collect()
    }

    /// Normalize new data with the same parameters.
    pub fn transform(&self, data: &[f64]) -> Vec<f64> {
        let range = self.max - self.min;
        if range == 0.0 {
            return vec![0.5; data.len()];
        }
        data.iter().map(|&x| (x - self.min) / range).collect()
    }
}

/// Normalize data to the `[0, 1]` range.
///
/// x_scaled = (x - min) / (max - min)
///
/// # Example
/// ```
/// use load_reconcile::transform::{denormalize, normalize};
///
/// let scaled = normalize(&[100.0, 150.0, 200.0]);
/// assert_eq!(scaled.data, vec![0.0, 0.5, 1.0]);
/// assert_eq!(denormalize(0.5, scaled.min, scaled.max), 150.0);
/// ```
pub fn normalize(series: &[f64]) -> ScaleResult {
    if series.is_empty() {
        return ScaleResult {
            data: Vec::new(),
            min: 0.0,
            max: 0.0,
        };
    }

    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let data = if range == 0.0 {
        vec![0.5; series.len()]
    } else {
        series.iter().map(|&x| (x - min) / range).collect()
    };

    ScaleResult { data, min, max }
}

/// Map a normalized value back onto `[min, max]`.
pub fn denormalize(value: f64, min: f64, max: f64) -> f64 {
    value * (max - min) + min
}
