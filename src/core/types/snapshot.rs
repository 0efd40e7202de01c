//! Immutable per-tick input snapshot.

use serde::{Deserialize, Serialize};

use super::{BearingReport, SensorPose};
use crate::error::{Error, Result};

/// Sensor poses and bearing reports captured for one tick.
///
/// Both vectors are indexed by sensor slot and always have the same length.
/// The solve pipeline is a pure function of this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    poses: Vec<SensorPose>,
    reports: Vec<BearingReport>,
}

impl TickSnapshot {
    /// Create a snapshot; poses and reports must pair up one-to-one.
    pub fn new(poses: Vec<SensorPose>, reports: Vec<BearingReport>) -> Result<Self> {
        if poses.len() != reports.len() {
            return Err(Error::InvalidInput(format!(
                "{} sensor poses but {} bearing reports",
                poses.len(),
                reports.len()
            )));
        }
        Ok(Self { poses, reports })
    }

    /// Number of sensor slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// True if the snapshot has no sensors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Sensor poses.
    #[inline]
    pub fn poses(&self) -> &[SensorPose] {
        &self.poses
    }

    /// Bearing reports.
    #[inline]
    pub fn reports(&self) -> &[BearingReport] {
        &self.reports
    }
}
