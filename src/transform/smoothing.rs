//! Savitzky–Golay trend extraction.
//!
//! A fixed 11-point, 2nd-order Savitzky–Golay filter. Only the centre
//! coefficients are used, so the first and last [`SG_HALF_WINDOW`] points
//! are passed through unchanged rather than edge-corrected.

use crate::utils::stats::round_to;

/// Window length of the filter.
pub const SG_WINDOW: usize = 11;

/// Points on either side of the centre.
pub const SG_HALF_WINDOW: usize = SG_WINDOW / 2;

/// Decimal places kept in smoothed output.
pub const SG_DECIMALS: i32 = 4;

/// Centre-point convolution coefficients for window 11, polynomial order 2.
///
/// These are the exact values `(-36, 9, 44, 69, 84, 89, ...) / 429`, which
/// round to `[-0.0839, 0.0210, 0.1026, 0.1608, 0.1958, 0.2075, ...]` and sum
/// to exactly one.
pub const SG_KERNEL: [f64; SG_WINDOW] = [
    -36.0 / 429.0,
    9.0 / 429.0,
    44.0 / 429.0,
    69.0 / 429.0,
    84.0 / 429.0,
    89.0 / 429.0,
    84.0 / 429.0,
    69.0 / 429.0,
    44.0 / 429.0,
    9.0 / 429.0,
    -36.0 / 429.0,
];

/// Smooth a load series with the fixed Savitzky–Golay kernel.
///
/// Output has the same length as the input. Interior points
/// (`SG_HALF_WINDOW <= i < n - SG_HALF_WINDOW`) are replaced by the kernel
/// response rounded to four decimals; edge points, and every point of a
/// series shorter than [`SG_WINDOW`], are copied through.
///
/// The kernel is applied at full precision rather than as its 4-decimal
/// rounding, so interior values can differ in the fourth decimal from a
/// filter using `[-0.0839, 0.0210, ...]` directly. That rounded list sums to
/// 1.0001 and would shift a constant series by a tenth of a per mille.
///
/// # Example
/// ```
/// use load_reconcile::transform::savitzky_golay;
///
/// let flat = vec![10.0; 11];
/// assert_eq!(savitzky_golay(&flat)[5], 10.0);
///
/// let short = vec![1.0, 5.0, 2.0];
/// assert_eq!(savitzky_golay(&short), short);
/// ```
pub fn savitzky_golay(series: &[f64]) -> Vec<f64> {
    let n = series.len();
    let mut smoothed = series.to_vec();

    if n < SG_WINDOW {
        return smoothed;
    }

    for (offset, window) in series.windows(SG_WINDOW).enumerate() {
        let sum: f64 = window
            .iter()
            .zip(SG_KERNEL.iter())
            .map(|(x, k)| x * k)
            .sum();
        smoothed[offset + SG_HALF_WINDOW] = round_to(sum, SG_DECIMALS);
    }

    smoothed
}
