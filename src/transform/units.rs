//! Display-unit selection.
//!
//! Large load figures read better in the ×1000 unit (GW rather than MW).
//! The choice depends only on the largest magnitude being shown.

use crate::utils::stats::max_abs;
use serde::Serialize;

/// Magnitude above which the aggregate unit is used.
pub const AGGREGATE_UNIT_THRESHOLD: f64 = 5000.0;

/// Ratio between the aggregate unit and the base unit.
pub const AGGREGATE_UNIT_FACTOR: f64 = 1000.0;

/// A reporting unit: values are divided by `factor` for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayUnit {
    pub factor: f64,
    pub label: &'static str,
}

impl DisplayUnit {
    /// The unit the series is measured in (e.g. MW).
    pub const BASE: DisplayUnit = DisplayUnit {
        factor: 1.0,
        label: "base-unit",
    };

    /// The ×1000 unit (e.g. GW).
    pub const AGGREGATE: DisplayUnit = DisplayUnit {
        factor: AGGREGATE_UNIT_FACTOR,
        label: "aggregate-unit",
    };

    pub fn is_aggregate(&self) -> bool {
        self.factor == AGGREGATE_UNIT_FACTOR
    }

    /// Power-unit symbol for this unit when the base is megawatts.
    pub fn symbol(&self) -> &'static str {
        if self.is_aggregate() {
            "GW"
        } else {
            "MW"
        }
    }

    /// Express a base-unit value in this unit.
    pub fn apply(&self, value: f64) -> f64 {
        scale(value, self.factor)
    }
}

impl Default for DisplayUnit {
    fn default() -> Self {
        Self::BASE
    }
}

/// Choose a display unit for values up to `max_magnitude`.
///
/// Strictly above [`AGGREGATE_UNIT_THRESHOLD`] selects the aggregate unit;
/// anything else, including zero, negative or NaN, stays in the base unit.
///
/// # Example
/// ```
/// use load_reconcile::transform::choose_unit;
///
/// assert_eq!(choose_unit(5000.0).factor, 1.0);
/// assert_eq!(choose_unit(5000.01).factor, 1000.0);
/// ```
pub fn choose_unit(max_magnitude: f64) -> DisplayUnit {
    if max_magnitude > AGGREGATE_UNIT_THRESHOLD {
        DisplayUnit::AGGREGATE
    } else {
        DisplayUnit::BASE
    }
}

/// Choose a display unit from the largest absolute value in `values`.
pub fn choose_unit_for(values: &[f64]) -> DisplayUnit {
    choose_unit(max_abs(values))
}

/// Divide a base-unit value by a unit factor.
pub fn scale(value: f64, factor: f64) -> f64 {
    value / factor
}

/// Express every value of a slice in `unit`.
pub fn scale_values(values: &[f64], unit: DisplayUnit) -> Vec<f64> {
    values.iter().map(|&v| unit.apply(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_strict() {
        assert_eq!(choose_unit(5000.0).factor, 1.0);
        assert_eq!(choose_unit(5000.01).factor, 1000.0);
        assert_eq!(choose_unit(5000.01).label, "aggregate-unit");
        assert_eq!(choose_unit(5000.0).label, "base-unit");
    }

    #[test]
    fn degenerate_magnitudes_use_base_unit() {
        assert_eq!(choose_unit(0.0), DisplayUnit::BASE);
        assert_eq!(choose_unit(-20_000.0), DisplayUnit::BASE);
        assert_eq!(choose_unit(f64::NAN), DisplayUnit::BASE);
    }

    #[test]
    fn unit_from_values_uses_absolute_peak() {
        assert!(choose_unit_for(&[120.0, -7200.0, 300.0]).is_aggregate());
        assert!(!choose_unit_for(&[120.0, 4999.0]).is_aggregate());
        assert!(!choose_unit_for(&[]).is_aggregate());
    }

    #[test]
    fn scaling() {
        assert_eq!(scale(7500.0, 1000.0), 7.5);
        assert_eq!(scale(7500.0, 1.0), 7500.0);
        assert_eq!(
            scale_values(&[6000.0, 12_500.0], DisplayUnit::AGGREGATE),
            vec![6.0, 12.5]
        );
    }

    #[test]
    fn symbols() {
        assert_eq!(DisplayUnit::BASE.symbol(), "MW");
        assert_eq!(DisplayUnit::AGGREGATE.symbol(), "GW");
        assert_eq!(DisplayUnit::default(), DisplayUnit::BASE);
    }
}
