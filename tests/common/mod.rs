//! Shared fixtures for integration tests.

#![allow(dead_code)]

use dhvani::{BearingReport, Detection, Point2D, SensorPose, TickSnapshot};

/// Sensors at `positions`, all facing the world +x axis.
pub fn poses_at(positions: &[(f64, f64)]) -> Vec<SensorPose> {
    positions
        .iter()
        .map(|&(x, y)| SensorPose::from_yaw(x, y, 0.0, 0.0))
        .collect()
}

/// Azimuth in degrees from a +x-facing sensor at `from` toward `to`.
pub fn azimuth_deg(from: (f64, f64), to: Point2D) -> f64 {
    (to.y - from.1).atan2(to.x - from.0).to_degrees()
}

/// Snapshot of +x-facing sensors, each reporting one detection toward
/// `source` offset by its entry in `noise_deg`.
pub fn snapshot_toward(positions: &[(f64, f64)], source: Point2D, noise_deg: &[f64]) -> TickSnapshot {
    let reports = positions
        .iter()
        .zip(noise_deg)
        .map(|(&p, &noise)| {
            BearingReport::from_detections(vec![Detection::new(azimuth_deg(p, source) + noise, 1.0)])
        })
        .collect();
    TickSnapshot::new(poses_at(positions), reports).unwrap()
}

/// Noise-free variant of [`snapshot_toward`].
pub fn exact_snapshot(positions: &[(f64, f64)], source: Point2D) -> TickSnapshot {
    snapshot_toward(positions, source, &vec![0.0; positions.len()])
}

/// World-frame bearings (radians) toward `source` with per-sensor noise.
pub fn bearings_toward(positions: &[(f64, f64)], source: Point2D, noise_deg: &[f64]) -> Vec<Option<f64>> {
    positions
        .iter()
        .zip(noise_deg)
        .map(|(&p, &noise)| Some((azimuth_deg(p, source) + noise).to_radians()))
        .collect()
}

/// True if `a` and `b` lie within one lattice cell of each other per axis.
pub fn within_one_cell(a: Point2D, b: Point2D, step: f64) -> bool {
    (a.x - b.x).abs() <= step + 1e-9 && (a.y - b.y).abs() <= step + 1e-9
}
