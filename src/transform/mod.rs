//! Signal conditioning and presentation transforms for load series.
//!
//! # Example
//!
//! ```
//! use load_reconcile::transform::{choose_unit_for, normalize, savitzky_golay};
//!
//! let series: Vec<f64> = (0..24).map(|h| 150.0 + 5.0 * (h % 4) as f64).collect();
//!
//! // Denoised trend, same length as the input
//! let trend = savitzky_golay(&series);
//! assert_eq!(trend.len(), series.len());
//!
//! // Min-max normalization
//! let scaled = normalize(&series);
//! assert_eq!(scaled.data.len(), series.len());
//!
//! // Display unit for the peak magnitude
//! assert_eq!(choose_unit_for(&series).symbol(), "MW");
//! ```

pub mod scale;
pub mod smoothing;
pub mod units;

pub use scale::{denormalize, normalize, ScaleResult};
pub use smoothing::{savitzky_golay, SG_HALF_WINDOW, SG_KERNEL, SG_WINDOW};
pub use units::{choose_unit, choose_unit_for, scale, scale_values, DisplayUnit};
