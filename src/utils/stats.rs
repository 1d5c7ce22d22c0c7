//! Statistical utility functions.

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (n denominator).
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation (n denominator).
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Round to a fixed number of decimal places, half away from zero.
///
/// # Example
/// ```
/// use load_reconcile::utils::stats::round_to;
///
/// assert_eq!(round_to(1.234_56, 4), 1.2346);
/// assert_eq!(round_to(-0.000_04, 4), -0.0);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Largest absolute value in a slice, ignoring NaN. `0.0` for an empty slice.
pub fn max_abs(values: &[f64]) -> f64 {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(0.0, |acc: f64, v| acc.max(v.abs()))
}
