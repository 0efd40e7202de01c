//! Tick driver.
//!
//! Owns one pose and one report buffer per sensor slot. Each tick refreshes
//! both from their sources, freezes them into a [`TickSnapshot`] and runs the
//! locator. Failed ticks are handed back to the caller; nothing is retried.

use super::locator::{Locator, LocatorOutput};
use crate::core::types::{BearingReport, SensorPose, TickSnapshot};
use crate::error::Result;
use crate::io::sources::{BearingSource, PoseSource};

/// Runs the locator once per tick on freshly refreshed inputs.
pub struct TickRunner<P, B> {
    locator: Locator,
    pose_source: P,
    bearing_source: B,
    poses: Vec<SensorPose>,
    reports: Vec<BearingReport>,
    ticks: u64,
}

impl<P: PoseSource, B: BearingSource> TickRunner<P, B> {
    /// Create a runner with buffers sized for the locator's sensor count.
    pub fn new(locator: Locator, pose_source: P, bearing_source: B) -> Self {
        let n = locator.sensor_count();
        Self {
            locator,
            pose_source,
            bearing_source,
            poses: vec![SensorPose::identity(); n],
            reports: vec![BearingReport::new(); n],
            ticks: 0,
        }
    }

    /// Refresh inputs and locate once.
    pub fn tick(&mut self) -> Result<LocatorOutput> {
        self.ticks += 1;
        self.pose_source.refresh_poses(&mut self.poses)?;
        self.bearing_source.refresh_reports(&mut self.reports)?;

        let snapshot = TickSnapshot::new(self.poses.clone(), self.reports.clone())?;
        self.locator.locate(&snapshot)
    }

    /// Number of ticks attempted so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Underlying locator.
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Pose buffer as of the last tick.
    pub fn poses(&self) -> &[SensorPose] {
        &self.poses
    }

    /// Report buffer as of the last tick.
    pub fn reports(&self) -> &[BearingReport] {
        &self.reports
    }
}
