//! Generator fleet capacity context.
//!
//! Capacity figures sit next to a reconciled timeline as reference lines and
//! reserve margins. Nothing here feeds back into reconciliation.

use crate::core::LoadPoint;
use crate::reconcile::MergedPoint;
use serde::{Deserialize, Serialize};

/// Commitment state of a generating unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitStatus {
    On,
    #[default]
    Off,
}

/// A generating unit and its capacity in base power units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorUnit {
    pub id: String,
    pub name: String,
    pub capacity: f64,
    #[serde(default)]
    pub status: UnitStatus,
}

impl GeneratorUnit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, capacity: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
            status: UnitStatus::Off,
        }
    }

    pub fn with_status(mut self, status: UnitStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_online(&self) -> bool {
        self.status == UnitStatus::On
    }
}

/// An ordered collection of generating units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fleet {
    units: Vec<GeneratorUnit>,
}

impl Fleet {
    pub fn new(units: Vec<GeneratorUnit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[GeneratorUnit] {
        &self.units
    }

    pub fn unit(&self, id: &str) -> Option<&GeneratorUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Combined capacity of every unit, committed or not.
    pub fn total_capacity(&self) -> f64 {
        self.units.iter().map(|u| u.capacity).sum()
    }

    /// Combined capacity of units currently on.
    pub fn online_capacity(&self) -> f64 {
        self.units
            .iter()
            .filter(|u| u.is_online())
            .map(|u| u.capacity)
            .sum()
    }

    /// Capacity left over at `peak_load`; negative when the fleet falls short.
    pub fn reserve_margin(&self, peak_load: f64) -> f64 {
        self.total_capacity() - peak_load
    }

    /// Reserve margin as a percentage of `peak_load`.
    ///
    /// `None` when the peak is not positive.
    pub fn reserve_margin_percent(&self, peak_load: f64) -> Option<f64> {
        (peak_load > 0.0).then(|| self.reserve_margin(peak_load) / peak_load * 100.0)
    }

    /// True when the total capacity covers `peak_load`.
    pub fn covers(&self, peak_load: f64) -> bool {
        self.reserve_margin(peak_load) >= 0.0
    }
}

/// Largest measured value of a series; `None` when it is empty.
pub fn peak_load(points: &[LoadPoint]) -> Option<f64> {
    points.iter().map(|p| p.value).reduce(f64::max)
}

/// Largest predicted value on a reconciled timeline.
pub fn peak_predicted(points: &[MergedPoint]) -> Option<f64> {
    points.iter().filter_map(|p| p.predicted).reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::reconcile;
    use approx::assert_relative_eq;

    fn fleet() -> Fleet {
        Fleet::new(vec![
            GeneratorUnit::new("U1", "Unit 1", 300.0).with_status(UnitStatus::On),
            GeneratorUnit::new("U2", "Unit 2", 250.0),
            GeneratorUnit::new("U3", "Unit 3", 200.0).with_status(UnitStatus::On),
        ])
    }

    #[test]
    fn capacities() {
        let fleet = fleet();
        assert_relative_eq!(fleet.total_capacity(), 750.0);
        assert_relative_eq!(fleet.online_capacity(), 500.0);
        assert_eq!(fleet.unit("U2").map(|u| u.capacity), Some(250.0));
        assert!(fleet.unit("U9").is_none());
    }

    #[test]
    fn reserve_margin() {
        let fleet = fleet();
        assert_relative_eq!(fleet.reserve_margin(600.0), 150.0);
        assert_relative_eq!(fleet.reserve_margin_percent(600.0).unwrap(), 25.0);
        assert!(fleet.covers(750.0));
        assert!(!fleet.covers(751.0));
        assert_eq!(fleet.reserve_margin_percent(0.0), None);
    }

    #[test]
    fn empty_fleet() {
        let fleet = Fleet::default();
        assert_eq!(fleet.total_capacity(), 0.0);
        assert!(!fleet.covers(1.0));
    }

    #[test]
    fn peaks() {
        let actual = vec![
            LoadPoint::new("2024-01-01 00:00", 410.0),
            LoadPoint::new("2024-01-01 01:00", 455.0),
        ];
        let predicted = vec![
            LoadPoint::new("2024-01-01 01:00", 460.0),
            LoadPoint::new("2024-01-01 02:00", 520.0),
        ];

        assert_eq!(peak_load(&actual), Some(455.0));
        assert_eq!(peak_load(&[]), None);

        let result = reconcile(&actual, &predicted);
        assert_eq!(peak_predicted(result.points()), Some(520.0));
    }

    #[test]
    fn deserializes_unit_records() {
        let json = r#"[{"id":"U1","name":"Unit 1","capacity":300,"status":"ON"},
                       {"id":"U2","name":"Unit 2","capacity":250}]"#;
        let fleet: Fleet = serde_json::from_str(json).unwrap();

        assert_eq!(fleet.units().len(), 2);
        assert!(fleet.units()[0].is_online());
        assert_eq!(fleet.units()[1].status, UnitStatus::Off);
    }
}
