//! Bearing extraction: raw DOA reports to world-frame bearings.
//!
//! Each sensor reports azimuths relative to its own heading. The strongest
//! detection is selected and rotated into the world frame by the sensor yaw.

use serde::{Deserialize, Serialize};

use crate::core::types::{BearingReport, DetectionMask, SensorPose, TickSnapshot};
use crate::error::{Error, Result};

/// World-frame bearing toward the source from one sensor (radians).
///
/// Strongest detection's azimuth plus the sensor yaw. The result is not
/// wrapped; consumers that compare angles normalize differences themselves.
///
/// # Errors
///
/// [`Error::InvalidInput`] if `report` has no detections.
pub fn absolute_bearing(pose: &SensorPose, report: &BearingReport) -> Result<f64> {
    let strongest = report
        .strongest()
        .ok_or_else(|| Error::InvalidInput("bearing report has no detections".to_string()))?;
    Ok(strongest.azimuth_rad() + pose.yaw())
}

/// Absolute bearings and detection flags for every sensor slot in a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BearingSet {
    /// Absolute bearing per slot; `None` where the report was empty
    pub bearings: Vec<Option<f64>>,
    /// Power-threshold flags per slot
    pub mask: DetectionMask,
}

impl BearingSet {
    /// Number of sensor slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.bearings.len()
    }

    /// True if there are no sensor slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bearings.is_empty()
    }

    /// Number of slots with a defined bearing (non-empty report).
    pub fn with_bearing(&self) -> usize {
        self.bearings.iter().filter(|b| b.is_some()).count()
    }
}

/// Turns per-tick reports into absolute bearings and a detection mask.
#[derive(Debug, Clone)]
pub struct BearingExtractor {
    power_threshold: f64,
}

impl BearingExtractor {
    /// Create an extractor with the given power threshold.
    pub fn new(power_threshold: f64) -> Self {
        Self { power_threshold }
    }

    /// Power threshold a strongest detection must exceed.
    #[inline]
    pub fn power_threshold(&self) -> f64 {
        self.power_threshold
    }

    /// Extract bearings for every slot of a snapshot.
    pub fn extract(&self, snapshot: &TickSnapshot) -> BearingSet {
        let bearings = snapshot
            .poses()
            .iter()
            .zip(snapshot.reports())
            .map(|(pose, report)| absolute_bearing(pose, report).ok())
            .collect();
        let mask = DetectionMask::from_reports(snapshot.reports(), self.power_threshold);

        BearingSet { bearings, mask }
    }
}
