//! Per-tick input sources.
//!
//! Pose tracking and acoustic detection run outside this crate. Their data
//! reaches the locator through [`PoseSource`] and [`BearingSource`], which
//! overwrite per-slot buffers in place once per tick.

use std::path::PathBuf;

use super::replay::load_angles;
use crate::core::types::{BearingReport, Detection, SensorPose};
use crate::error::{Error, Result};

/// Provides the current pose of every sensor slot.
pub trait PoseSource {
    /// Overwrite `poses` (one entry per slot) with the latest poses.
    fn refresh_poses(&mut self, poses: &mut [SensorPose]) -> Result<()>;
}

/// Provides the current direction-of-arrival reports of every sensor slot.
pub trait BearingSource {
    /// Overwrite `reports` (one entry per slot) with the latest reports.
    fn refresh_reports(&mut self, reports: &mut [BearingReport]) -> Result<()>;
}

/// Fixed sensor poses, e.g. from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticPoses {
    poses: Vec<SensorPose>,
}

impl StaticPoses {
    /// Create a source that always reports `poses`.
    pub fn new(poses: Vec<SensorPose>) -> Self {
        Self { poses }
    }

    /// Configured poses.
    pub fn poses(&self) -> &[SensorPose] {
        &self.poses
    }
}

impl PoseSource for StaticPoses {
    fn refresh_poses(&mut self, poses: &mut [SensorPose]) -> Result<()> {
        if poses.len() != self.poses.len() {
            return Err(Error::InvalidInput(format!(
                "{} static poses for {} sensor slots",
                self.poses.len(),
                poses.len()
            )));
        }
        poses.copy_from_slice(&self.poses);
        Ok(())
    }
}

/// Replayed azimuths, one always-detected detection per sensor.
///
/// When backed by a file, the file is re-read on every refresh so that
/// edits take effect on the next tick.
#[derive(Debug, Clone)]
pub struct ReplayBearings {
    path: Option<PathBuf>,
    angles: Vec<f64>,
}

impl ReplayBearings {
    /// Replay a fixed list of azimuths (degrees).
    pub fn from_angles(angles: Vec<f64>) -> Self {
        Self { path: None, angles }
    }

    /// Replay the azimuths of an angle file, re-reading it every tick.
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            angles: Vec::new(),
        }
    }

    /// Azimuths used by the last refresh.
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }
}

impl BearingSource for ReplayBearings {
    fn refresh_reports(&mut self, reports: &mut [BearingReport]) -> Result<()> {
        if let Some(path) = &self.path {
            self.angles = load_angles(path)?;
        }
        if self.angles.len() < reports.len() {
            return Err(Error::InvalidInput(format!(
                "{} replay angles for {} sensors",
                self.angles.len(),
                reports.len()
            )));
        }
        for (report, &azimuth) in reports.iter_mut().zip(&self.angles) {
            report.clear();
            report.push(Detection::always_detected(azimuth));
        }
        Ok(())
    }
}
