//! Quickstart example demonstrating basic usage of load-reconcile.
//!
//! Run with: cargo run --example quickstart

use load_reconcile::core::{LoadPoint, LoadSeries};
use load_reconcile::detection::AnomalyConfig;
use load_reconcile::fleet::{peak_predicted, Fleet, GeneratorUnit, UnitStatus};
use load_reconcile::reconcile::{reconcile_with, ReconcileConfig};

fn main() {
    println!("=== load-reconcile Quickstart ===\n");

    // 1. Build 72 hours of measured load with a daily cycle
    let points: Vec<LoadPoint> = (0..72)
        .map(|i| {
            let hour = (i % 24) as f64;
            let load = 150.0
                + 100.0 * ((hour - 6.0) * std::f64::consts::PI / 12.0).sin()
                + 50.0 * ((hour - 12.0) * std::f64::consts::PI / 6.0).sin()
                + ((i * 37) % 11) as f64
                - 5.0;
            let load = if i == 60 { load + 250.0 } else { load };
            LoadPoint::new(format!("2024-01-{:02} {:02}:00", 1 + i / 24, i % 24), load)
        })
        .collect();
    let history = LoadSeries::new(points).expect("hourly timestamps are increasing");
    println!("Loaded {} hourly measurements", history.len());

    // 2. Smooth and flag anomalies
    let conditioned = history.condition(&AnomalyConfig::default());
    for p in conditioned.points().iter().filter(|p| p.is_anomaly == Some(true)) {
        println!("  anomaly at {}: {:.1} MW", p.timestamp, p.value);
    }

    // 3. A forecast overlapping the last 6 hours, in ISO timestamps
    let predicted: Vec<LoadPoint> = (66..90)
        .map(|i| {
            let hour = (i % 24) as f64;
            let load = 150.0
                + 100.0 * ((hour - 6.0) * std::f64::consts::PI / 12.0).sin()
                + 50.0 * ((hour - 12.0) * std::f64::consts::PI / 6.0).sin();
            LoadPoint::new(
                format!("2024-01-{:02}T{:02}:00:00Z", 1 + i / 24, i % 24),
                load,
            )
            .with_bounds(load * 0.95, load * 1.05)
        })
        .collect();

    // 4. Reconcile
    let config = ReconcileConfig::default().with_history_window(72);
    let result = reconcile_with(conditioned.points(), &predicted, &config);
    let report = result.report();

    println!("\n--- Accuracy over overlap ---");
    println!("Overlap points: {}", report.overlap_count);
    match report.accuracy_score {
        Some(score) => println!("Accuracy: {:.1}%", score),
        None => println!("Accuracy: N/A"),
    }
    if let Some(metrics) = &report.metrics {
        println!("MAE: {:.2}  RMSE: {:.2}", metrics.mae, metrics.rmse);
    }
    for p in &report.high_discrepancy_points {
        println!(
            "  {} delta {:.1}% (actual {:?} / predicted {:?})",
            p.display_time(),
            p.percent_error.unwrap_or(f64::NAN),
            p.actual,
            p.predicted
        );
    }

    // 5. Display unit and fleet margin
    let (unit, scaled) = result.scaled_points();
    println!("\nDisplaying {} points in {}", scaled.len(), unit.symbol());

    let fleet = Fleet::new(vec![
        GeneratorUnit::new("U1", "Unit 1", 300.0).with_status(UnitStatus::On),
        GeneratorUnit::new("U2", "Unit 2", 250.0),
        GeneratorUnit::new("U3", "Unit 3", 200.0),
    ]);
    if let Some(peak) = peak_predicted(result.points()) {
        println!(
            "Peak forecast {:.1} MW, fleet capacity {:.0} MW, margin {:.1} MW",
            peak,
            fleet.total_capacity(),
            fleet.reserve_margin(peak)
        );
    }
}
